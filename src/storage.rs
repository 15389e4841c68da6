use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::error;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const SIDEBAR_MINIMIZED_KEY: &str = "sidebarMinimized";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: &str);

    fn get_flag(&self, key: &str) -> Option<bool> {
        self.get(key).map(|value| value == "true")
    }

    fn set_flag(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    entries: BTreeMap<String, String>,
}

impl Preferences {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys whose value differs from `previous`, with the new value (`None` if removed).
    pub fn changes_since(&self, previous: &Preferences) -> Vec<(String, Option<String>)> {
        let mut changes: Vec<(String, Option<String>)> = self
            .entries
            .iter()
            .filter(|(key, value)| previous.entries.get(*key) != Some(*value))
            .map(|(key, value)| (key.clone(), Some(value.clone())))
            .collect();

        changes.extend(
            previous
                .entries
                .keys()
                .filter(|key| !self.entries.contains_key(*key))
                .map(|key| (key.clone(), None)),
        );
        changes
    }
}

impl KeyValueStore for Preferences {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageChange {
    pub key: String,
    pub value: Option<String>,
    #[serde(skip)]
    pub origin: Option<String>,
}

impl StorageChange {
    pub fn is_visible_to(&self, tab: Option<&str>) -> bool {
        match (self.origin.as_deref(), tab) {
            (Some(origin), Some(tab)) => origin != tab,
            _ => true,
        }
    }
}

pub async fn load_preferences(path: &Path) -> Preferences {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                Preferences::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
        Err(err) => {
            error!("failed to read preferences file: {err}");
            Preferences::default()
        }
    }
}

pub async fn persist_preferences(path: &Path, data: &Preferences) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_round_trip_as_strings() {
        let mut prefs = Preferences::default();
        prefs.set_flag(DARK_MODE_KEY, true);
        assert_eq!(prefs.get(DARK_MODE_KEY), Some("true"));
        assert_eq!(prefs.get_flag(DARK_MODE_KEY), Some(true));

        prefs.set(DARK_MODE_KEY, "yes");
        assert_eq!(prefs.get_flag(DARK_MODE_KEY), Some(false));
        assert_eq!(prefs.get_flag(SIDEBAR_MINIMIZED_KEY), None);
    }

    #[test]
    fn changes_ignore_rewrites_of_same_value() {
        let mut before = Preferences::default();
        before.set_flag(DARK_MODE_KEY, true);
        before.set_flag("emailNotifications", false);

        let mut after = before.clone();
        after.set_flag(DARK_MODE_KEY, true);
        after.set_flag("emailNotifications", true);

        assert_eq!(
            after.changes_since(&before),
            vec![("emailNotifications".to_string(), Some("true".to_string()))]
        );
    }

    #[test]
    fn change_is_hidden_from_its_writer() {
        let change = StorageChange {
            key: DARK_MODE_KEY.to_string(),
            value: Some("true".to_string()),
            origin: Some("tab-a".to_string()),
        };
        assert!(!change.is_visible_to(Some("tab-a")));
        assert!(change.is_visible_to(Some("tab-b")));
        assert!(change.is_visible_to(None));
    }

    #[test]
    fn preferences_serialize_as_flat_object() {
        let mut prefs = Preferences::default();
        prefs.set_flag(SIDEBAR_MINIMIZED_KEY, false);
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json, serde_json::json!({ "sidebarMinimized": "false" }));
    }
}
