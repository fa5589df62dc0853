/*
[INPUT]:  Market id and a [startTime, endTime] window
[OUTPUT]: Normalized trade history table
[POS]:    HTTP layer - trade page fetch and history aggregation
[UPDATE]: When pagination policy or normalization rules change
*/

use tracing::{debug, warn};

use crate::http::client::{BtcMarketsClient, TRADES_PATH};
use crate::http::error::{BtcMarketsError, Result};
use crate::http::request::RequestSpec;
use crate::types::{RawTrade, TradeRecord, TradeTable};

impl BtcMarketsClient {
    /// Fetch one raw page of own trades
    ///
    /// GET /v3/trades?marketId={marketId}&startTime={startTime}&limit={limit}
    pub async fn my_trades(&self, market_id: &str, start_time: i64) -> Result<Vec<RawTrade>> {
        let spec = RequestSpec::get(TRADES_PATH)
            .authenticated()
            .param("marketId", market_id)
            .param("startTime", start_time.to_string())
            .param("limit", self.config.trade_page_size.to_string());

        self.request_json(spec).await
    }

    /// Trade history for a market over `[start_time, end_time]`
    ///
    /// Fetches one page per invocation. Records after the window end are
    /// dropped; the rest are normalized and returned newest-first. A
    /// rate-limited page waits out the configured cooldown and surfaces
    /// `RateLimited` so the caller can retry; any other page failure is
    /// logged and treated as an empty page. An empty result set fails
    /// with `NoTradesFound`.
    pub async fn trade_history(
        &self,
        symbol: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<TradeTable> {
        let mut records: Vec<TradeRecord> = Vec::new();

        if start_time <= end_time {
            match self.my_trades(symbol, start_time).await {
                Ok(page) => {
                    debug!(symbol, page_len = page.len(), "fetched trade page");
                    let mut page_records = page
                        .iter()
                        .map(TradeRecord::from_raw)
                        .collect::<Result<Vec<_>>>()?;
                    page_records.retain(|record| record.timestamp <= end_time);
                    // pages merge newest-first ahead of older accumulated rows
                    page_records.append(&mut records);
                    records = page_records;
                }
                Err(err) if err.is_rate_limit() => {
                    warn!(
                        symbol,
                        cooldown_secs = self.config.rate_limit_cooldown.as_secs(),
                        "rate limited, cooling down"
                    );
                    tokio::time::sleep(self.config.rate_limit_cooldown).await;
                    return Err(err);
                }
                Err(err) => {
                    warn!(symbol, error = %err, "trade page request failed");
                }
            }
        }

        if records.is_empty() {
            return Err(BtcMarketsError::NoTradesFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(TradeTable::new(records))
    }
}
