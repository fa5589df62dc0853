/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed wire structs and the normalized trade schema
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::DateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::http::error::{BtcMarketsError, Result};
use crate::types::enums::TradeSide;

/// Ticker for one market
///
/// GET /v3/markets/{marketId}/ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub market_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_bid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_ask: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub last_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume24h: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price24h: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub low24h: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub high24h: Option<Decimal>,
    pub timestamp: String,
}

/// One entry of the account balance list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub asset_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
}

/// Market metadata from the market list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub market_id: String,
    pub base_asset_name: String,
    pub quote_asset_name: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub min_order_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub max_order_amount: Option<Decimal>,
    #[serde(default)]
    pub amount_decimals: u32,
    #[serde(default)]
    pub price_decimals: u32,
}

/// One trade exactly as the exchange reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    pub id: String,
    pub market_id: String,
    /// RFC 3339 wire timestamp, e.g. "2020-09-13T12:26:40.000000Z"
    pub timestamp: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub side: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub value_in_quote_asset: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Fees are charged in the quote currency of the AUD pairs this
/// adapter reports on
const COMMISSION_ASSET: &str = "AUD";

/// One normalized trade record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub price: f64,
    pub qty: f64,
    pub quote_qty: f64,
    pub commission: f64,
    pub commission_asset: String,
    pub commission_asset_usd_price: f64,
    pub side: TradeSide,
}

impl TradeRecord {
    /// Normalize one raw trade, independently of any other record
    pub fn from_raw(raw: &RawTrade) -> Result<Self> {
        let timestamp = parse_wire_timestamp(&raw.timestamp)?;

        Ok(Self {
            id: raw.id.clone(),
            timestamp,
            price: to_f64(raw.price),
            qty: to_f64(raw.amount),
            // the v3 trade payload carries no quote quantity field
            quote_qty: 1.0,
            commission: to_f64(raw.fee),
            commission_asset: COMMISSION_ASSET.to_string(),
            commission_asset_usd_price: to_f64(raw.value_in_quote_asset),
            side: TradeSide::from_wire(&raw.side),
        })
    }
}

/// Wire timestamp to epoch milliseconds
fn parse_wire_timestamp(wire: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(wire)
        .map(|datetime| datetime.timestamp_millis())
        .map_err(|err| {
            BtcMarketsError::MalformedResponse(format!("bad trade timestamp {wire:?}: {err}"))
        })
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Normalized trade history, ordered by timestamp descending and
/// indexed by trade id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeTable {
    rows: Vec<TradeRecord>,
}

impl TradeTable {
    /// Column order of the rendered table
    pub const COLUMNS: [&'static str; 8] = [
        "price",
        "qty",
        "quoteQty",
        "commission",
        "commissionAsset",
        "side",
        "commissionAssetUsdPrice",
        "timestamp",
    ];

    pub fn new(mut rows: Vec<TradeRecord>) -> Self {
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { rows }
    }

    pub fn rows(&self) -> &[TradeRecord] {
        &self.rows
    }

    /// Look up one record by trade id
    pub fn trade(&self, id: &str) -> Option<&TradeRecord> {
        self.rows.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
