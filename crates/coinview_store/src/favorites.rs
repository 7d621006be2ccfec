use crate::{KeyValueStore, Result};

/// Key the favorites set lives under.
pub const FAVORITES_KEY: &str = "uuid";

/// The user's favorite coins, kept as a JSON array of coin uuids.
pub struct Favorites<'a, S> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> Favorites<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Stored uuids in insertion order. Empty when nothing is stored.
    pub async fn load(&self) -> Result<Vec<String>> {
        let raw = self.store.get(FAVORITES_KEY).await?;
        Ok(raw.as_deref().map(parse_favorites).unwrap_or_default())
    }

    pub async fn contains(&self, uuid: &str) -> Result<bool> {
        Ok(self.load().await?.iter().any(|u| u == uuid.trim()))
    }

    /// Returns `true` if the uuid was not already a favorite.
    pub async fn add(&self, uuid: &str) -> Result<bool> {
        let uuid = uuid.trim();
        if uuid.is_empty() {
            return Ok(false);
        }

        let mut uuids = self.load().await?;
        if uuids.iter().any(|u| u == uuid) {
            return Ok(false);
        }

        uuids.push(uuid.to_string());
        self.save(&uuids).await?;
        Ok(true)
    }

    /// Returns `true` if the uuid was a favorite.
    pub async fn remove(&self, uuid: &str) -> Result<bool> {
        let uuid = uuid.trim();
        let mut uuids = self.load().await?;
        let before = uuids.len();
        uuids.retain(|u| u != uuid);
        if uuids.len() == before {
            return Ok(false);
        }

        self.save(&uuids).await?;
        Ok(true)
    }

    /// Flips membership; returns whether the uuid is a favorite afterwards.
    pub async fn toggle(&self, uuid: &str) -> Result<bool> {
        if self.remove(uuid).await? {
            Ok(false)
        } else {
            self.add(uuid).await
        }
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(FAVORITES_KEY).await
    }

    async fn save(&self, uuids: &[String]) -> Result<()> {
        if uuids.is_empty() {
            return self.clear().await;
        }

        let value = serde_json::to_string(uuids)?;
        self.store.set(FAVORITES_KEY, &value).await
    }
}

/// Reads a stored favorites value.
///
/// Accepts the JSON array this crate writes, the older raw query-string form
/// (`uuids[]=a&uuids[]=b`) and plain comma-separated text. Blanks and the
/// literals `null`/`undefined` are dropped; duplicates keep their first position.
pub fn parse_favorites(raw: &str) -> Vec<String> {
    let raw = raw.trim();

    let candidates: Vec<String> = if raw.starts_with('[') {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(list) => list,
            Err(_) => split_legacy(raw),
        }
    } else {
        split_legacy(raw)
    };

    let mut uuids: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let candidate = candidate.trim();
        if is_placeholder(candidate) || uuids.iter().any(|u| u == candidate) {
            continue;
        }
        uuids.push(candidate.to_string());
    }

    uuids
}

fn split_legacy(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    for segment in raw.trim_start_matches('?').split('&') {
        let value = match segment.split_once('=') {
            Some((key, value)) if is_uuids_key(key) => value,
            // Other query parameters are not coin ids.
            Some(_) => continue,
            None => segment,
        };
        items.extend(value.split(',').map(str::to_string));
    }
    items
}

fn is_uuids_key(key: &str) -> bool {
    let key = key.trim();
    key == "uuids[]" || key.eq_ignore_ascii_case("uuids%5B%5D")
}

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == "null" || value == "undefined"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn parses_json_array() {
        assert_eq!(
            parse_favorites(r#"["Qwsogvtv82FCd","razxDUgYGNAdQ"]"#),
            vec!["Qwsogvtv82FCd", "razxDUgYGNAdQ"]
        );
    }

    #[test]
    fn parses_legacy_query_string() {
        assert_eq!(
            parse_favorites("uuids[]=Qwsogvtv82FCd&uuids[]=razxDUgYGNAdQ"),
            vec!["Qwsogvtv82FCd", "razxDUgYGNAdQ"]
        );
        assert_eq!(
            parse_favorites("?uuids%5B%5D=Qwsogvtv82FCd"),
            vec!["Qwsogvtv82FCd"]
        );
    }

    #[test]
    fn other_query_parameters_are_not_favorites() {
        assert_eq!(
            parse_favorites("uuids[]=Qwsogvtv82FCd&orderBy=price&timePeriod=24h"),
            vec!["Qwsogvtv82FCd"]
        );
        assert_eq!(
            parse_favorites("search=x&uuids%5b%5d=a,b&uuids[]=c"),
            vec!["a", "b", "c"]
        );
        assert!(parse_favorites("orderBy=price").is_empty());
    }

    #[test]
    fn parses_comma_separated_and_dedups() {
        assert_eq!(
            parse_favorites(" a , b,,a ,c "),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn placeholders_mean_nothing_stored() {
        assert!(parse_favorites("").is_empty());
        assert!(parse_favorites("undefined").is_empty());
        assert!(parse_favorites("null").is_empty());
        assert!(parse_favorites("[]").is_empty());
        assert!(parse_favorites("uuids[]=undefined").is_empty());
    }

    #[tokio::test]
    async fn add_remove_toggle() {
        let store = MemoryStore::new();
        let favorites = Favorites::new(&store);

        assert!(favorites.load().await.unwrap().is_empty());
        assert!(favorites.add("Qwsogvtv82FCd").await.unwrap());
        assert!(!favorites.add("Qwsogvtv82FCd").await.unwrap());
        assert!(favorites.add(" razxDUgYGNAdQ ").await.unwrap());
        assert!(!favorites.add("   ").await.unwrap());

        assert_eq!(
            store.get(FAVORITES_KEY).await.unwrap().as_deref(),
            Some(r#"["Qwsogvtv82FCd","razxDUgYGNAdQ"]"#)
        );

        assert!(!favorites.toggle("Qwsogvtv82FCd").await.unwrap());
        assert!(!favorites.contains("Qwsogvtv82FCd").await.unwrap());
        assert!(favorites.toggle("Qwsogvtv82FCd").await.unwrap());
        assert_eq!(
            favorites.load().await.unwrap(),
            vec!["razxDUgYGNAdQ", "Qwsogvtv82FCd"]
        );

        assert!(favorites.remove("razxDUgYGNAdQ").await.unwrap());
        assert!(!favorites.remove("razxDUgYGNAdQ").await.unwrap());
    }

    #[tokio::test]
    async fn removing_the_last_favorite_clears_the_key() {
        let store = MemoryStore::with_entries([(FAVORITES_KEY, "uuids[]=Qwsogvtv82FCd")]);
        let favorites = Favorites::new(&store);

        assert!(favorites.contains("Qwsogvtv82FCd").await.unwrap());
        assert!(favorites.remove("Qwsogvtv82FCd").await.unwrap());
        assert_eq!(store.get(FAVORITES_KEY).await.unwrap(), None);
    }
}
