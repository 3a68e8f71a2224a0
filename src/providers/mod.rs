pub mod forex_api;

// Re-export so providers and call sites share one cache type path.
pub use crate::cache::RateCache;
