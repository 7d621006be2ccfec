use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A coin as the rest of the application sees it.
///
/// Prices are `None` where the API sends `null`, which it does for coins
/// without enough trading activity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Coin {
    pub uuid: String,
    pub symbol: String,
    pub name: String,
    pub color: Option<String>,
    pub icon_url: String,
    pub market_cap: Option<f64>,
    pub price: Option<f64>,
    /// Unix seconds.
    pub listed_at: Option<i64>,
    pub tier: Option<u8>,
    /// Percentage over the last 24 hours.
    pub change: Option<f64>,
    pub rank: u32,
    pub sparkline: Vec<Option<f64>>,
    pub low_volume: bool,
    pub coinranking_url: String,
    pub volume_24h: Option<f64>,
    pub btc_price: Option<f64>,
}

/// Wire shape of a coin, turned into [`Coin`] right after decoding.
pub trait RawCoin: DeserializeOwned {
    fn normalize(self) -> Result<Coin>;
}

/// v2 shape: large and fractional numbers are sent as strings.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TextCoin {
    pub uuid: String,
    pub symbol: String,
    pub name: String,
    pub color: Option<String>,
    pub icon_url: String,
    pub market_cap: Option<String>,
    pub price: Option<String>,
    pub listed_at: Option<i64>,
    pub tier: Option<u8>,
    pub change: Option<String>,
    pub rank: u32,
    #[serde(default)]
    pub sparkline: Vec<Option<String>>,
    pub low_volume: bool,
    pub coinranking_url: String,
    #[serde(rename = "24hVolume")]
    pub volume_24h: Option<String>,
    pub btc_price: Option<String>,
}

/// Older shape: market cap and prices are JSON numbers.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NumericCoin {
    pub uuid: String,
    pub symbol: String,
    pub name: String,
    pub color: Option<String>,
    pub icon_url: String,
    pub market_cap: Option<f64>,
    pub price: Option<f64>,
    pub listed_at: Option<i64>,
    pub tier: Option<u8>,
    pub change: Option<String>,
    pub rank: u32,
    #[serde(default)]
    pub sparkline: Vec<Option<f64>>,
    pub low_volume: bool,
    pub coinranking_url: String,
    #[serde(rename = "24hVolume")]
    pub volume_24h: Option<f64>,
    pub btc_price: Option<f64>,
}

impl RawCoin for TextCoin {
    fn normalize(self) -> Result<Coin> {
        let sparkline = self
            .sparkline
            .into_iter()
            .map(|sample| parse_number("sparkline", sample))
            .collect::<Result<Vec<_>>>()?;

        Ok(Coin {
            market_cap: parse_number("marketCap", self.market_cap)?,
            price: parse_number("price", self.price)?,
            change: parse_number("change", self.change)?,
            volume_24h: parse_number("24hVolume", self.volume_24h)?,
            btc_price: parse_number("btcPrice", self.btc_price)?,
            sparkline,
            uuid: self.uuid,
            symbol: self.symbol,
            name: self.name,
            color: self.color,
            icon_url: self.icon_url,
            listed_at: self.listed_at,
            tier: self.tier,
            rank: self.rank,
            low_volume: self.low_volume,
            coinranking_url: self.coinranking_url,
        })
    }
}

impl RawCoin for NumericCoin {
    fn normalize(self) -> Result<Coin> {
        Ok(Coin {
            change: parse_number("change", self.change)?,
            uuid: self.uuid,
            symbol: self.symbol,
            name: self.name,
            color: self.color,
            icon_url: self.icon_url,
            market_cap: self.market_cap,
            price: self.price,
            listed_at: self.listed_at,
            tier: self.tier,
            rank: self.rank,
            sparkline: self.sparkline,
            low_volume: self.low_volume,
            coinranking_url: self.coinranking_url,
            volume_24h: self.volume_24h,
            btc_price: self.btc_price,
        })
    }
}

pub(crate) fn parse_number(field: &'static str, value: Option<String>) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(text) => match text.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(Error::Normalize { field, value: text }),
        },
    }
}
