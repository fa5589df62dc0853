/*
[INPUT]:  Asset and trading-pair identifiers
[OUTPUT]: Account balances, market lookups, AUD price quotes
[POS]:    HTTP layer - authenticated account endpoints
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use rust_decimal::prelude::ToPrimitive;

use crate::http::client::{BALANCES_PATH, BtcMarketsClient};
use crate::http::error::{BtcMarketsError, Result};
use crate::http::request::RequestSpec;
use crate::types::{BalanceEntry, MarketInfo};

/// Assets quoted at parity instead of through a ticker lookup
const STABLE_ASSETS: [&str; 1] = ["AUD"];

impl BtcMarketsClient {
    /// List all account balances
    ///
    /// GET /v3/accounts/me/balances
    pub async fn balances(&self) -> Result<Vec<BalanceEntry>> {
        self.request_json(RequestSpec::get(BALANCES_PATH).authenticated())
            .await
    }

    /// Balance of one asset
    ///
    /// Scans the balance list by asset name. A missing asset is
    /// `NotFound`, never a zero balance.
    pub async fn asset_balance(&self, asset: &str) -> Result<BalanceEntry> {
        let balances = self.balances().await?;

        balances
            .into_iter()
            .find(|entry| entry.asset_name == asset)
            .ok_or_else(|| BtcMarketsError::NotFound {
                key: asset.to_string(),
            })
    }

    /// Metadata of one trading pair
    ///
    /// Scans the market list by market id; a missing pair is `NotFound`.
    pub async fn market_info(&self, trading_pair: &str) -> Result<MarketInfo> {
        let markets = self.markets().await?;

        markets
            .into_iter()
            .find(|market| market.market_id == trading_pair)
            .ok_or_else(|| BtcMarketsError::NotFound {
                key: trading_pair.to_string(),
            })
    }

    /// Quote-currency price of an asset
    ///
    /// Stable quote assets are worth 1.0 by definition; anything else is
    /// priced from the last trade of its AUD market.
    pub async fn usd_price_for(&self, asset: &str) -> Result<f64> {
        if STABLE_ASSETS.contains(&asset) {
            return Ok(1.0);
        }

        let ticker = self
            .ticker(&format!("{asset}-AUD"))
            .await
            .map_err(|_| BtcMarketsError::NotFound {
                key: asset.to_string(),
            })?;

        Ok(ticker.last_price.to_f64().unwrap_or(0.0))
    }
}
