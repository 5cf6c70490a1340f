//! Random demo frames for the widget gallery.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Column-major table of random values.
#[derive(Debug, Clone)]
pub struct SampleFrame {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// One standard-normal draw (Box-Muller).
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

impl SampleFrame {
    /// `rows` x `columns` standard-normal values in columns named A, B, C...
    pub fn random(rows: usize, columns: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let names = (0..columns)
            .map(|i| char::from(b'A' + (i % 26) as u8).to_string())
            .collect();
        let values = (0..columns)
            .map(|_| (0..rows).map(|_| standard_normal(&mut rng)).collect())
            .collect();
        Self {
            columns: names,
            values,
        }
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.values.get(idx).map(Vec::as_slice)
    }

    /// `n` random `[lon, lat]` points scattered around `center` (`(lat, lon)`).
    pub fn map_points(n: usize, center: (f64, f64), seed: u64) -> Vec<[f64; 2]> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let lat = standard_normal(&mut rng) / 50.0 + center.0;
                let lon = standard_normal(&mut rng) / 50.0 + center.1;
                [lon, lat]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_frame_shape_and_names() {
        let frame = SampleFrame::random(20, 3, 7);
        assert_eq!(frame.columns, vec!["A", "B", "C"]);
        assert_eq!(frame.column("B").map(<[f64]>::len), Some(20));
        assert!(frame.column("D").is_none());
    }

    #[test]
    fn same_seed_same_values() {
        let a = SampleFrame::random(5, 2, 42);
        let b = SampleFrame::random(5, 2, 42);
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn map_points_stay_near_center() {
        let points = SampleFrame::map_points(100, (37.76, -122.4), 1);
        assert_eq!(points.len(), 100);
        // Ten standard deviations is far outside anything a seeded draw produces.
        assert!(points
            .iter()
            .all(|[lon, lat]| (lat - 37.76).abs() < 0.2 && (lon + 122.4).abs() < 0.2));
    }
}
