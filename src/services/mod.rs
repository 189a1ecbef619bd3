pub mod cache;
pub mod rating_store;
pub mod signals;

pub use cache::Cache;
pub use rating_store::{normalize_symbol, Batch, RatingStore};
pub use signals::{RatingEngine, Signal};
