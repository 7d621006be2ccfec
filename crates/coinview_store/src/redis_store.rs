use crate::{KeyValueStore, Result};
use redis::{AsyncCommands, Client};
use std::env;

const KEY_PREFIX: &str = "coinview:";

pub fn get_redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string())
}

/// Shares storage across machines. Keys are namespaced under `coinview:`.
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn open(redis_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::open(redis_url)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::open(&get_redis_url())
    }

    fn key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut con = self.client.get_async_connection().await?;
        let value: Option<String> = con.get(Self::key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut con = self.client.get_async_connection().await?;
        con.set::<_, _, ()>(Self::key(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut con = self.client.get_async_connection().await?;
        con.del::<_, ()>(Self::key(key)).await?;
        Ok(())
    }
}
