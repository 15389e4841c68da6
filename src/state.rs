use crate::errors::AppError;
use crate::orders::OrderStore;
use crate::profile::PersonalInfo;
use crate::storage::{Preferences, StorageChange, persist_preferences};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub orders: Arc<Mutex<OrderStore>>,
    pub preferences: Arc<Mutex<Preferences>>,
    pub profile: Arc<Mutex<PersonalInfo>>,
    pub changes: broadcast::Sender<StorageChange>,
}

impl AppState {
    pub fn new(data_path: PathBuf, orders: OrderStore, preferences: Preferences) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            data_path,
            orders: Arc::new(Mutex::new(orders)),
            preferences: Arc::new(Mutex::new(preferences)),
            profile: Arc::new(Mutex::new(PersonalInfo::sample())),
            changes,
        }
    }

    /// Changed values are persisted and announced to every tab other than
    /// `origin`. A failed write leaves the preferences as they were.
    pub async fn update_preferences<T>(
        &self,
        origin: Option<&str>,
        apply: impl FnOnce(&mut Preferences) -> T,
    ) -> Result<T, AppError> {
        let mut preferences = self.preferences.lock().await;
        let before = preferences.clone();
        let output = apply(&mut *preferences);

        let changes = preferences.changes_since(&before);
        if !changes.is_empty() {
            if let Err(err) = persist_preferences(&self.data_path, &preferences).await {
                error!(path = %self.data_path.display(), "failed to persist preferences: {}", err.message);
                *preferences = before;
                return Err(err);
            }
            for (key, value) in changes {
                debug!(%key, ?value, ?origin, "preference changed");
                // Err only means no tab is subscribed.
                let _ = self.changes.send(StorageChange {
                    key,
                    value,
                    origin: origin.map(str::to_string),
                });
            }
        }
        Ok(output)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }
}
