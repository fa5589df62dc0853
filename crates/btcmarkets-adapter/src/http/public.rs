/*
[INPUT]:  Market identifiers
[OUTPUT]: Market data (ticker, market list)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::client::{BtcMarketsClient, MARKETS_PATH};
use crate::http::error::Result;
use crate::http::request::RequestSpec;
use crate::types::{MarketInfo, Ticker};

impl BtcMarketsClient {
    /// Query the ticker for one market
    ///
    /// GET /v3/markets/{marketId}/ticker
    pub async fn ticker(&self, market_id: &str) -> Result<Ticker> {
        let path = format!("{MARKETS_PATH}/{market_id}/ticker");
        self.request_json(RequestSpec::get(path)).await
    }

    /// List all markets the exchange trades
    ///
    /// GET /v3/markets
    pub async fn markets(&self) -> Result<Vec<MarketInfo>> {
        self.request_json(RequestSpec::get(MARKETS_PATH)).await
    }
}
