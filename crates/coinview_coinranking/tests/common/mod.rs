#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use coinview_coinranking::{CoinrankingClient, CoinrankingConfig, Encoding};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub token: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Arc<String>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// A stand-in for api.coinranking.com that answers every `/v2/coins`
/// request with one canned response and records what it was asked.
pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: Arc::new(body.into()),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v2/coins", get(coins))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock listener");
        let addr = listener.local_addr().expect("Mock listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn client(&self, encoding: Encoding) -> CoinrankingClient {
        CoinrankingClient::new(
            CoinrankingConfig::builder()
                .base_url(self.base_url.as_str())
                .token(TOKEN)
                .encoding(encoding)
                .build(),
        )
        .expect("Failed to build client")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

async fn coins(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        token: header_text("x-access-token"),
        content_type: header_text("content-type"),
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.as_ref().clone(),
    )
}

pub const TEXT_DATA: &str = r##"{
  "status": "success",
  "data": {
    "stats": {
      "total": 2,
      "totalCoins": 28410,
      "totalMarkets": 40122,
      "totalExchanges": 179,
      "totalMarketCap": "2418855271820",
      "total24hVolume": "91345412311"
    },
    "coins": [
      {
        "uuid": "Qwsogvtv82FCd",
        "symbol": "BTC",
        "name": "Bitcoin",
        "color": "#f7931A",
        "iconUrl": "https://cdn.coinranking.com/bOabBYkcX/bitcoin_btc.svg",
        "marketCap": "1214509431229",
        "price": "61523.05",
        "listedAt": 1330214400,
        "tier": 1,
        "change": "-1.25",
        "rank": 1,
        "sparkline": ["61800.1", "61711.4", null, "61523.05"],
        "lowVolume": false,
        "coinrankingUrl": "https://coinranking.com/coin/Qwsogvtv82FCd+bitcoin-btc",
        "24hVolume": "30112233445",
        "btcPrice": "1"
      },
      {
        "uuid": "razxDUgYGNAdQ",
        "symbol": "ETH",
        "name": "Ethereum",
        "color": "#3C3C3D",
        "iconUrl": "https://cdn.coinranking.com/rk4RKHOuW/eth.svg",
        "marketCap": "402117328913",
        "price": "3342.19",
        "listedAt": 1438905600,
        "tier": 1,
        "change": "0.87",
        "rank": 2,
        "sparkline": ["3310.2", "3342.19"],
        "lowVolume": false,
        "coinrankingUrl": "https://coinranking.com/coin/razxDUgYGNAdQ+ethereum-eth",
        "24hVolume": "14422123678",
        "btcPrice": "0.05432"
      }
    ]
  }
}"##;

pub const NUMERIC_DATA: &str = r##"{
  "status": "success",
  "data": {
    "stats": {
      "total": 1,
      "totalCoins": 28410,
      "totalMarkets": 40122,
      "totalExchanges": 179,
      "totalMarketCap": "2418855271820",
      "total24hVolume": "91345412311"
    },
    "coins": [
      {
        "uuid": "Qwsogvtv82FCd",
        "symbol": "BTC",
        "name": "Bitcoin",
        "color": "#f7931A",
        "iconUrl": "https://cdn.coinranking.com/bOabBYkcX/bitcoin_btc.svg",
        "marketCap": 1214509431229,
        "price": 61523.05,
        "listedAt": 1330214400,
        "tier": 1,
        "change": "-1.25",
        "rank": 1,
        "sparkline": [61800.1, 61711.4, null, 61523.05],
        "lowVolume": false,
        "coinrankingUrl": "https://coinranking.com/coin/Qwsogvtv82FCd+bitcoin-btc",
        "btcPrice": 1
      }
    ]
  }
}"##;

pub const UNAUTHORIZED: &str =
    r#"{"status":"fail","type":"HTTP-401","message":"Invalid or missing API key"}"#;
