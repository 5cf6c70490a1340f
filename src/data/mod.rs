//! Data module - CSV loading, caching and overview metrics

mod cache;
mod loader;
mod overview;

pub use cache::{CacheKey, CacheStats, DataCache, DEFAULT_CAPACITY as DEFAULT_CACHE_CAPACITY};
pub use loader::{load_csv, numeric_columns, DataLoader};
pub use overview::Overview;
