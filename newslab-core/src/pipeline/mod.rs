//! Feature derivation and the news/price alignment pipeline.

pub mod align;
pub mod derive;

pub use align::{align, AlignOptions};
pub use derive::{daily_returns, derive, drop_incomplete, rolling_std, DerivedPrices};
