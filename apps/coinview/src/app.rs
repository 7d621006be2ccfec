use crate::router::{Router, View};
use crate::views;
use anyhow::Context;
use coinview_coinranking::{CoinrankingClient, CoinrankingConfig};
use coinview_store::{FileStore, Favorites, KeyValueStore, MemoryStore, RedisStore};

/// Any of the stores the binary can be pointed at.
pub enum AppStore {
    Memory(MemoryStore),
    File(FileStore),
    Redis(RedisStore),
}

impl KeyValueStore for AppStore {
    async fn get(&self, key: &str) -> coinview_store::Result<Option<String>> {
        match self {
            AppStore::Memory(store) => store.get(key).await,
            AppStore::File(store) => store.get(key).await,
            AppStore::Redis(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> coinview_store::Result<()> {
        match self {
            AppStore::Memory(store) => store.set(key, value).await,
            AppStore::File(store) => store.set(key, value).await,
            AppStore::Redis(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> coinview_store::Result<()> {
        match self {
            AppStore::Memory(store) => store.remove(key).await,
            AppStore::File(store) => store.remove(key).await,
            AppStore::Redis(store) => store.remove(key).await,
        }
    }
}

/// What the home view shows.
#[derive(Debug, Clone, Default)]
pub struct HomeQuery {
    pub offset: Option<u32>,
    pub search: Option<String>,
}

pub struct App<S> {
    client: CoinrankingClient,
    store: S,
    router: Router,
}

impl<S: KeyValueStore> App<S> {
    /// Builds the API client and installs the default router.
    pub fn bootstrap(config: CoinrankingConfig, store: S) -> anyhow::Result<Self> {
        tracing::info!(base_url = %config.base_url, encoding = %config.encoding, "bootstrapping");
        let client =
            CoinrankingClient::new(config).context("Failed to build Coinranking client")?;

        Ok(Self {
            client,
            store,
            router: Router::default(),
        })
    }

    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Resolves `path` and renders the view it lands on.
    pub async fn mount(&self, path: &str, query: &HomeQuery) -> anyhow::Result<String> {
        let resolved = self
            .router
            .resolve(path)
            .with_context(|| format!("No route matches {path}"))?;

        if let Some(from) = &resolved.redirected_from {
            tracing::info!(from = %from, to = resolved.path, "redirected");
        }
        tracing::debug!(route = resolved.name, "mounting view");

        match resolved.view {
            View::Home => self.home(query).await,
            View::Favorites => self.favorites().await,
        }
    }

    /// Search results are a single page, so `search` and `offset` are exclusive.
    pub async fn home(&self, query: &HomeQuery) -> anyhow::Result<String> {
        if query.search.is_some() {
            if let Some(offset) = query.offset {
                anyhow::bail!("A search cannot be combined with offset {offset}");
            }
            return self.search(query.search.as_deref()).await;
        }

        let data = self
            .client
            .get_coins_currencies(query.offset)
            .await
            .context("Failed to fetch coins")?;

        Ok(views::render_home(&data, &self.load_favorites().await?))
    }

    /// Home view filtered by `term`; a missing or blank term lists everything.
    pub async fn search(&self, term: Option<&str>) -> anyhow::Result<String> {
        let data = self
            .client
            .get_search_coins_currencies(term)
            .await
            .with_context(|| format!("Failed to search coins for {:?}", term.unwrap_or_default()))?;

        Ok(views::render_home(&data, &self.load_favorites().await?))
    }

    pub async fn coins(&self) -> anyhow::Result<String> {
        let coins = self
            .client
            .get_cryptocurrencies()
            .await
            .context("Failed to list coins")?;

        Ok(views::render_coins(&coins, &self.load_favorites().await?))
    }

    pub async fn favorites(&self) -> anyhow::Result<String> {
        let data = self
            .client
            .get_favorites_coins_currencies(&self.store)
            .await
            .context("Failed to fetch favorite coins")?;

        Ok(views::render_favorites(data.as_ref()))
    }

    async fn load_favorites(&self) -> anyhow::Result<Vec<String>> {
        Favorites::new(&self.store)
            .load()
            .await
            .context("Failed to read favorites")
    }
}
