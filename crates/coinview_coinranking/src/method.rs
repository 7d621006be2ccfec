/// An endpoint and the query it sends.
pub trait Method {
    const PATH: &'static str;

    fn query(&self) -> Vec<(&'static str, String)>;
}

pub const COINS_PATH: &str = "/v2/coins";

/// Largest `limit` the coins endpoint accepts.
pub const MAX_COINS_PER_REQUEST: usize = 100;

/// `GET /v2/coins`
pub struct ListCoins;

impl Method for ListCoins {
    const PATH: &'static str = COINS_PATH;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// `GET /v2/coins?offset=N`
pub struct CoinsPage {
    pub offset: u32,
}

impl Method for CoinsPage {
    const PATH: &'static str = COINS_PATH;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("offset", self.offset.to_string())]
    }
}

/// `GET /v2/coins?search=S`. Without a usable term no filter is sent.
pub struct SearchCoins {
    pub term: Option<String>,
}

impl SearchCoins {
    pub fn new(term: Option<&str>) -> Self {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self { term }
    }
}

impl Method for SearchCoins {
    const PATH: &'static str = COINS_PATH;

    fn query(&self) -> Vec<(&'static str, String)> {
        match &self.term {
            Some(term) => vec![("search", term.clone())],
            None => Vec::new(),
        }
    }
}

/// `GET /v2/coins?uuids[]=a&uuids[]=b&limit=2`
///
/// Without `limit` the API answers with its default page of 50, so the limit
/// always covers every uuid. Callers keep batches within
/// [`MAX_COINS_PER_REQUEST`].
pub struct CoinsByUuid {
    pub uuids: Vec<String>,
}

impl Method for CoinsByUuid {
    const PATH: &'static str = COINS_PATH;

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<_> = self
            .uuids
            .iter()
            .map(|uuid| ("uuids[]", uuid.clone()))
            .collect();
        let limit = self.uuids.len().min(MAX_COINS_PER_REQUEST);
        query.push(("limit", limit.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_sends_no_filter() {
        assert!(SearchCoins::new(None).query().is_empty());
        assert!(SearchCoins::new(Some("   ")).query().is_empty());
        assert_eq!(
            SearchCoins::new(Some(" btc ")).query(),
            vec![("search", "btc".to_string())]
        );
    }

    #[test]
    fn uuids_repeat_the_key() {
        let method = CoinsByUuid {
            uuids: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            method.query(),
            vec![
                ("uuids[]", "a".to_string()),
                ("uuids[]", "b".to_string()),
                ("limit", "2".to_string())
            ]
        );
    }
}
