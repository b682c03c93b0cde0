//! Per-view table state persistence.

use vendor_select_lib::listing::TableState;

use super::{SettingsError, SettingsProvider};

const TABLE_STATE_SUFFIX: &str = ".table_state";

/// Remembers the table state of one named view.
#[derive(Clone)]
pub struct ViewPreferences {
    settings: SettingsProvider,
    view: String,
}

impl ViewPreferences {
    /// Preferences for `view`, stored through `settings`.
    pub fn new(settings: SettingsProvider, view: impl Into<String>) -> Self {
        Self {
            settings,
            view: view.into(),
        }
    }

    fn key(&self) -> String {
        format!("{}{}", self.view, TABLE_STATE_SUFFIX)
    }

    /// Names of every view with stored preferences, sorted.
    pub async fn stored_views(settings: &SettingsProvider) -> Result<Vec<String>, SettingsError> {
        let mut views: Vec<String> = settings
            .keys_with_prefix("")
            .await?
            .into_iter()
            .filter_map(|key| key.strip_suffix(TABLE_STATE_SUFFIX).map(str::to_string))
            .collect();
        views.sort();
        Ok(views)
    }

    /// The stored table state, if any.
    pub async fn load(&self) -> Result<Option<TableState>, SettingsError> {
        self.settings.get(&self.key()).await
    }

    /// Stores the table state.
    pub async fn save(&self, state: &TableState) -> Result<(), SettingsError> {
        self.settings.set(&self.key(), state).await
    }

    /// Forgets the stored table state.
    pub async fn reset(&self) -> Result<(), SettingsError> {
        self.settings.delete(&self.key()).await
    }
}

#[cfg(test)]
mod tests {
    use vendor_select_lib::listing::{Filter, OrderBy, Pagination};

    use super::*;
    use crate::settings::MemoryBackend;

    #[tokio::test]
    async fn test_views_are_stored_separately() {
        let settings = SettingsProvider::new(MemoryBackend::new());
        let vendors = ViewPreferences::new(settings.clone(), "vendor-select");
        let spools = ViewPreferences::new(settings.clone(), "spool-select");

        let state = TableState::new()
            .with_sorters(OrderBy::desc("registered").then_asc("name"))
            .with_filter(Filter::contains("name", "poly"))
            .with_filter(Filter::is_in("id", [1i64, 2]))
            .with_pagination(Pagination::server(3, 25));
        vendors.save(&state).await.unwrap();

        assert_eq!(vendors.load().await.unwrap(), Some(state));
        assert_eq!(spools.load().await.unwrap(), None);
        assert_eq!(
            settings.keys_with_prefix("vendor-select").await.unwrap(),
            vec!["vendor-select.table_state"]
        );

        spools.save(&TableState::new()).await.unwrap();
        assert_eq!(
            ViewPreferences::stored_views(&settings).await.unwrap(),
            vec!["spool-select", "vendor-select"]
        );

        vendors.reset().await.unwrap();
        assert_eq!(vendors.load().await.unwrap(), None);
    }
}
