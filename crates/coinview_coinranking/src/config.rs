use crate::error::{Error, Result};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

// Base URL for Coinranking API
pub const BASE_URL: &str = "https://api.coinranking.com";

pub const TOKEN_ENV: &str = "COINRANKING_TOKEN";
pub const BASE_URL_ENV: &str = "COINRANKING_BASE_URL";
pub const ENCODING_ENV: &str = "COINRANKING_ENCODING";

/// How the API encodes `price`, `marketCap`, `btcPrice` and friends.
///
/// Older API versions send JSON numbers, v2 sends strings. A client decodes
/// with exactly one of them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Numeric,
    #[default]
    Text,
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" | "number" => Ok(Encoding::Numeric),
            "text" | "string" => Ok(Encoding::Text),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Numeric => write!(f, "numeric"),
            Encoding::Text => write!(f, "text"),
        }
    }
}

#[derive(Clone, Builder)]
#[builder(on(String, into))]
pub struct CoinrankingConfig {
    #[builder(default = BASE_URL.to_string())]
    pub base_url: String,
    pub token: String,
    #[builder(default)]
    pub encoding: Encoding,
}

impl CoinrankingConfig {
    /// Reads `$COINRANKING_TOKEN` (required), `$COINRANKING_BASE_URL` and
    /// `$COINRANKING_ENCODING`.
    pub fn from_env() -> Result<Self> {
        let token = env::var(TOKEN_ENV).map_err(|_| Error::MissingEnv(TOKEN_ENV))?;

        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| BASE_URL.to_string());

        let encoding = match env::var(ENCODING_ENV) {
            Ok(value) => value.parse()?,
            Err(_) => Encoding::default(),
        };

        Ok(Self {
            base_url,
            token,
            encoding,
        })
    }
}

impl fmt::Debug for CoinrankingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinrankingConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("encoding", &self.encoding)
            .finish()
    }
}
