//! Domain types for swinglab

pub mod point;
pub mod series;
pub mod trade;

pub use point::PricePoint;
pub use series::{Series, SeriesError};
pub use trade::{return_pct, Trade};
