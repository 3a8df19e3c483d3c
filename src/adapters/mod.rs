// Adapters layer: concrete GDP sources behind the `GdpSource` port.

pub mod http;
pub mod offline;

pub use http::TradingEconomicsSource;
pub use offline::OfflineSource;
