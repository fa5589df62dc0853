/*
[INPUT]:  Wire schema and normalized schema definitions
[OUTPUT]: Public type surface of the data layer
[POS]:    Data layer - module wiring
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod models;

pub use enums::TradeSide;
pub use models::{BalanceEntry, MarketInfo, RawTrade, Ticker, TradeRecord, TradeTable};
