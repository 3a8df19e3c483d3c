pub mod engine;
pub mod fallback;
pub mod merge;
pub mod normalize;
pub mod selection;

pub use crate::domain::model::{ChartRow, CountrySeries, FetchOutcome, SeriesCollection, SeriesPoint};
pub use crate::domain::ports::{ConfigProvider, GdpSource};
pub use crate::utils::error::Result;
