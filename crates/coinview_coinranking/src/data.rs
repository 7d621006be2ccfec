use crate::coins::{Coin, RawCoin};
use crate::error::Result;
use crate::stats::{RawStats, Stats};
use serde::{Deserialize, Serialize};

/// Stats plus one page of coins, as returned for paged, search and
/// favorites requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Data {
    pub stats: Stats,
    pub coins: Vec<Coin>,
}

/// `{"status": "success", "data": ...}`
#[derive(Deserialize, Debug)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Deserialize, Debug)]
#[serde(bound = "C: RawCoin")]
pub(crate) struct RawData<C> {
    pub stats: RawStats,
    pub coins: Vec<C>,
}

#[derive(Deserialize, Debug)]
#[serde(bound = "C: RawCoin")]
pub(crate) struct RawCoins<C> {
    pub coins: Vec<C>,
}

impl<C: RawCoin> RawData<C> {
    pub fn normalize(self) -> Result<Data> {
        Ok(Data {
            stats: self.stats.normalize()?,
            coins: normalize_all(self.coins)?,
        })
    }
}

impl<C: RawCoin> RawCoins<C> {
    pub fn normalize(self) -> Result<Vec<Coin>> {
        normalize_all(self.coins)
    }
}

fn normalize_all<C: RawCoin>(coins: Vec<C>) -> Result<Vec<Coin>> {
    coins.into_iter().map(RawCoin::normalize).collect()
}
