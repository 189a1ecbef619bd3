pub mod bar;
pub mod rating;
pub mod timeframe;

pub use bar::*;
pub use rating::*;
pub use timeframe::*;
