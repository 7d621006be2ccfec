pub mod coins;
pub mod config;
pub mod data;
pub mod error;
pub mod method;
pub mod stats;

pub use coins::Coin;
pub use config::{CoinrankingConfig, Encoding};
pub use data::Data;
pub use error::{Error, Result};
pub use stats::Stats;

use coinview_store::{Favorites, KeyValueStore};
use data::{Envelope, RawCoins, RawData};
use method::{CoinsByUuid, CoinsPage, ListCoins, MAX_COINS_PER_REQUEST, Method, SearchCoins};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

pub struct CoinrankingClient {
    reqwest: Client,
    base_url: String,
    encoding: Encoding,
}

impl CoinrankingClient {
    pub fn new(config: CoinrankingConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut token = HeaderValue::from_str(&config.token)
            .map_err(|_| Error::InvalidHeader(ACCESS_TOKEN_HEADER))?;
        token.set_sensitive(true);
        default_headers.insert(ACCESS_TOKEN_HEADER, token);

        let reqwest = ClientBuilder::new()
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            reqwest,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            encoding: config.encoding,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(CoinrankingConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    // Coins endpoint, first page with default ordering
    pub async fn get_cryptocurrencies(&self) -> Result<Vec<Coin>> {
        match self.encoding {
            Encoding::Text => self
                .call::<_, RawCoins<coins::TextCoin>>(&ListCoins)
                .await?
                .normalize(),
            Encoding::Numeric => self
                .call::<_, RawCoins<coins::NumericCoin>>(&ListCoins)
                .await?
                .normalize(),
        }
    }

    // Coins endpoint with pagination, `None` is the first page
    pub async fn get_coins_currencies(&self, offset: Option<u32>) -> Result<Data> {
        let offset = offset.unwrap_or(0);
        self.call_data(&CoinsPage { offset }).await
    }

    // Coins endpoint filtered by name or symbol
    pub async fn get_search_coins_currencies(&self, term: Option<&str>) -> Result<Data> {
        self.call_data(&SearchCoins::new(term)).await
    }

    /// Coins whose uuids are stored as favorites in `store`.
    ///
    /// Returns `Ok(None)` without touching the network when no favorites are
    /// stored.
    pub async fn get_favorites_coins_currencies<S: KeyValueStore>(
        &self,
        store: &S,
    ) -> Result<Option<Data>> {
        let uuids = Favorites::new(store).load().await?;
        self.get_coins_by_uuids(uuids).await
    }

    pub async fn get_coins_by_uuids(&self, uuids: Vec<String>) -> Result<Option<Data>> {
        if uuids.is_empty() {
            tracing::debug!("no coin uuids given, skipping request");
            return Ok(None);
        }

        // Stats come from the first batch; `total` counts every batch.
        let mut merged: Option<Data> = None;
        for batch in uuids.chunks(MAX_COINS_PER_REQUEST) {
            let data = self
                .call_data(&CoinsByUuid {
                    uuids: batch.to_vec(),
                })
                .await?;

            match merged.as_mut() {
                Some(merged) => {
                    merged.stats.total += data.stats.total;
                    merged.coins.extend(data.coins);
                }
                None => merged = Some(data),
            }
        }

        Ok(merged)
    }

    /// Issues `method` and normalizes the `{stats, coins}` payload.
    pub async fn call_data<M: Method>(&self, method: &M) -> Result<Data> {
        match self.encoding {
            Encoding::Text => self
                .call::<_, RawData<coins::TextCoin>>(method)
                .await?
                .normalize(),
            Encoding::Numeric => self
                .call::<_, RawData<coins::NumericCoin>>(method)
                .await?
                .normalize(),
        }
    }

    async fn call<M: Method, R: DeserializeOwned>(&self, method: &M) -> Result<R> {
        self.get(M::PATH, &method.query()).await
    }

    // Generic GET request, unwraps the `data` field of the envelope
    async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "GET");

        let mut request = self.reqwest.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = Error::from_failure(status, &body);
            tracing::warn!(%url, %status, "request rejected: {err}");
            return Err(err);
        }

        let envelope: Envelope<R> = serde_json::from_slice(&body).inspect_err(|e| {
            tracing::warn!(%url, "unexpected response body: {e}");
        })?;

        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client = CoinrankingClient::new(
            CoinrankingConfig::builder()
                .base_url("http://127.0.0.1:1/")
                .token("t")
                .build(),
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://127.0.0.1:1");
        assert_eq!(client.encoding(), Encoding::Text);
    }

    #[test]
    fn token_must_be_a_valid_header_value() {
        let result = CoinrankingClient::new(
            CoinrankingConfig::builder().token("line\nbreak").build(),
        );

        assert!(matches!(
            result,
            Err(Error::InvalidHeader(ACCESS_TOKEN_HEADER))
        ));
    }

    #[tokio::test]
    async fn empty_favorites_never_reach_the_network() {
        // Nothing listens on port 1; a request would fail.
        let client = CoinrankingClient::new(
            CoinrankingConfig::builder()
                .base_url("http://127.0.0.1:1")
                .token("t")
                .build(),
        )
        .unwrap();

        let store = coinview_store::MemoryStore::new();
        assert_eq!(client.get_favorites_coins_currencies(&store).await.unwrap(), None);

        let store = coinview_store::MemoryStore::with_entries([("uuid", "undefined")]);
        assert_eq!(client.get_favorites_coins_currencies(&store).await.unwrap(), None);
    }
}
