mod interval;
mod models;
mod timestamp;

pub use interval::Interval;
pub use models::{AssetKind, Candle};
pub use timestamp::UtcDateTime;
