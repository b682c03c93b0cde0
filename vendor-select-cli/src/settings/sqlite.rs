//! SQLite settings backend with in-memory cache.
//!
//! Keys of the form `<view>.<setting>` are stored as one row per view and
//! setting, so every setting of a view can be listed or dropped together.

use std::path::Path;

use async_sqlite::rusqlite::params;
use async_sqlite::{Client, ClientBuilder, JournalMode};
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::{SettingsBackend, SettingsError};

/// SQLite-backed settings storage with DashMap read cache.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the settings database at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Opening settings database at {}", path.as_ref().display());
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }

    async fn init_schema(client: &Client) -> Result<(), SettingsError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS view_settings (
                        view TEXT NOT NULL,
                        setting TEXT NOT NULL,
                        value BLOB NOT NULL,
                        PRIMARY KEY (view, setting)
                    )",
                    [],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

/// Splits `vendor-select.table_state` into `("vendor-select", "table_state")`.
/// Keys without a dot belong to the unnamed view `""`.
fn split_key(key: &str) -> (&str, &str) {
    key.rsplit_once('.').unwrap_or(("", key))
}

fn join_key(view: &str, setting: &str) -> String {
    if view.is_empty() {
        setting.to_string()
    } else {
        format!("{}.{}", view, setting)
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let (view, setting) = split_key(key);
        let (view, setting) = (view.to_string(), setting.to_string());
        let result = self
            .client
            .conn(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT value FROM view_settings WHERE view = ? AND setting = ?")?;
                let mut rows = stmt.query([&view, &setting])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let (view, setting) = split_key(key);
        let (view, setting) = (view.to_string(), setting.to_string());
        let stored = value.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO view_settings (view, setting, value) VALUES (?, ?, ?)
                     ON CONFLICT(view, setting) DO UPDATE SET value = excluded.value",
                    params![&view, &setting, &stored],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let (view, setting) = split_key(key);
        let (view, setting) = (view.to_string(), setting.to_string());

        self.client
            .conn(move |conn| {
                conn.execute(
                    "DELETE FROM view_settings WHERE view = ? AND setting = ?",
                    [&view, &setting],
                )
            })
            .await?;

        self.cache.remove(key);

        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let keys: Vec<String> = self
            .client
            .conn(|conn| {
                let mut stmt =
                    conn.prepare("SELECT view, setting FROM view_settings ORDER BY view, setting")?;
                let rows = stmt.query_map([], |row| {
                    Ok(join_key(&row.get::<_, String>(0)?, &row.get::<_, String>(1)?))
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;

        Ok(keys.into_iter().filter(|key| key.starts_with(prefix)).collect())
    }
}

#[cfg(test)]
mod tests {
    use vendor_select_lib::listing::{Filter, OrderBy, Pagination, TableState};

    use super::*;
    use crate::settings::{SettingsProvider, ViewPreferences};

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("vendor-select.table_state"), ("vendor-select", "table_state"));
        assert_eq!(split_key("a.b.c"), ("a.b", "c"));
        assert_eq!(split_key("flag"), ("", "flag"));
        assert_eq!(join_key("", "flag"), "flag");
        assert_eq!(join_key("a.b", "c"), "a.b.c");
    }

    #[tokio::test]
    async fn test_view_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");

        let state = TableState::new()
            .with_sorters(OrderBy::desc("name"))
            .with_filter(Filter::contains("name", "poly"))
            .with_pagination(Pagination::server(2, 5));
        {
            let settings = SettingsProvider::new(SqliteBackend::open(&path).await.unwrap());
            let vendors = ViewPreferences::new(settings.clone(), "vendor_select");
            vendors.save(&TableState::new()).await.unwrap();
            vendors.save(&state).await.unwrap();
            ViewPreferences::new(settings, "vendorXselect")
                .save(&TableState::new())
                .await
                .unwrap();
        }

        let settings = SettingsProvider::new(SqliteBackend::open(&path).await.unwrap());
        let vendors = ViewPreferences::new(settings.clone(), "vendor_select");
        assert_eq!(vendors.load().await.unwrap(), Some(state));
        assert_eq!(
            ViewPreferences::stored_views(&settings).await.unwrap(),
            vec!["vendorXselect", "vendor_select"]
        );
        assert_eq!(
            settings.keys_with_prefix("vendor_").await.unwrap(),
            vec!["vendor_select.table_state"]
        );

        vendors.reset().await.unwrap();
        assert_eq!(vendors.load().await.unwrap(), None);
        assert_eq!(
            ViewPreferences::stored_views(&settings).await.unwrap(),
            vec!["vendorXselect"]
        );
    }

    #[tokio::test]
    async fn test_undotted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            SettingsProvider::new(SqliteBackend::open(dir.path().join("s.db")).await.unwrap());

        settings.set("flag", &true).await.unwrap();
        assert_eq!(settings.get::<bool>("flag").await.unwrap(), Some(true));
        assert_eq!(settings.keys_with_prefix("").await.unwrap(), vec!["flag"]);

        settings.delete("flag").await.unwrap();
        assert_eq!(settings.get::<bool>("flag").await.unwrap(), None);
    }
}
