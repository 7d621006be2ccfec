use coinview_store::StoreError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API responded {status}: {message}")]
    Api {
        status: StatusCode,
        kind: Option<String>,
        message: String,
    },
    #[error("Error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Field `{field}` is not a number: {value:?}")]
    Normalize { field: &'static str, value: String },
    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),
    #[error("{0} environment variable not found")]
    MissingEnv(&'static str),
    #[error("Unknown encoding {0:?}, expected `text` or `numeric`")]
    UnknownEncoding(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Body Coinranking sends with a 4xx/5xx.
#[derive(Deserialize, Debug)]
struct FailureBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

impl Error {
    pub(crate) fn from_failure(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<FailureBody>(body) {
            Ok(FailureBody {
                kind,
                message: Some(message),
            }) => Error::Api {
                status,
                kind,
                message,
            },
            _ => Error::Api {
                status,
                kind: None,
                message: String::from_utf8_lossy(body).trim().to_string(),
            },
        }
    }

    /// HTTP status for rejected requests, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}
