use crate::coins::parse_number;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Stats {
    /// Coins matching the request's filters.
    pub total: u64,
    pub total_coins: u64,
    pub total_markets: u64,
    pub total_exchanges: u64,
    pub total_market_cap: Option<f64>,
    pub total_24h_volume: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    pub total: u64,
    pub total_coins: u64,
    pub total_markets: u64,
    pub total_exchanges: u64,
    pub total_market_cap: Option<String>,
    #[serde(rename = "total24hVolume")]
    pub total_24h_volume: Option<String>,
}

impl RawStats {
    pub fn normalize(self) -> Result<Stats> {
        Ok(Stats {
            total: self.total,
            total_coins: self.total_coins,
            total_markets: self.total_markets,
            total_exchanges: self.total_exchanges,
            total_market_cap: parse_number("totalMarketCap", self.total_market_cap)?,
            total_24h_volume: parse_number("total24hVolume", self.total_24h_volume)?,
        })
    }
}
