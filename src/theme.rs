use crate::models::Notice;
use crate::storage::{DARK_MODE_KEY, KeyValueStore, SIDEBAR_MINIMIZED_KEY};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const COLOR_SCHEME_HINT_HEADER: &str = "sec-ch-prefers-color-scheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationCategory {
    Email,
    Sms,
    Promotional,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 3] = [
        NotificationCategory::Email,
        NotificationCategory::Sms,
        NotificationCategory::Promotional,
    ];

    pub fn key(self) -> &'static str {
        match self {
            NotificationCategory::Email => "emailNotifications",
            NotificationCategory::Sms => "smsNotifications",
            NotificationCategory::Promotional => "promotionalEmails",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationCategory::Email => "Email Notifications",
            NotificationCategory::Sms => "SMS Notifications",
            NotificationCategory::Promotional => "Promotional Emails",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_hint(value: Option<&str>) -> Self {
        match value.map(|value| value.trim().trim_matches('"').to_ascii_lowercase()) {
            Some(value) if value == "dark" => ColorScheme::Dark,
            _ => ColorScheme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

pub struct Palette {
    pub name: &'static str,
    pub properties: &'static [(&'static str, &'static str)],
}

pub const DARK_PALETTE: Palette = Palette {
    name: "dark",
    properties: &[
        ("--bg-gradient", "linear-gradient(135deg, #1a1a2e, #16213e, #0f1419)"),
        ("--sidebar-bg", "rgba(26,26,46,0.95)"),
        ("--card-bg", "rgba(0,0,0,0.3)"),
        ("--input-bg", "rgba(255,255,255,0.1)"),
        ("--input-text", "#fff"),
        ("--text-primary", "#ffffff"),
        ("--text-secondary", "rgba(255,255,255,0.8)"),
        ("--border-color", "rgba(255,255,255,0.1)"),
        ("--toggle-active", "#64b5f6"),
        ("--button-bg", "#64b5f6"),
    ],
};

pub const LIGHT_PALETTE: Palette = Palette {
    name: "light",
    properties: &[
        ("--bg-gradient", "linear-gradient(135deg, #2d5a5a, #1a3d3d, #0f2626)"),
        ("--sidebar-bg", "rgba(45,90,90,0.9)"),
        ("--card-bg", "rgba(255,255,255,0.1)"),
        ("--input-bg", "rgba(255,255,255,0.9)"),
        ("--input-text", "#333333"),
        ("--text-primary", "#000000"),
        ("--text-secondary", "rgba(0,0,0,0.6)"),
        ("--border-color", "rgba(0,0,0,0.2)"),
        ("--toggle-active", "#4ecdc4"),
        ("--button-bg", "#4ecdc4"),
    ],
};

pub fn palette(dark_mode: bool) -> &'static Palette {
    if dark_mode { &DARK_PALETTE } else { &LIGHT_PALETTE }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub dark_mode: bool,
    pub sidebar_minimized: bool,
    pub notifications: BTreeMap<String, bool>,
}

impl ThemeState {
    pub fn notification(&self, category: NotificationCategory) -> bool {
        self.notifications
            .get(category.key())
            .copied()
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssProperty {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeApplication {
    pub body_class: Option<&'static str>,
    pub data_theme: &'static str,
    pub properties: Vec<CssProperty>,
}

impl ThemeApplication {
    pub fn for_mode(dark_mode: bool) -> Self {
        let palette = palette(dark_mode);
        Self {
            body_class: dark_mode.then_some(DARK_MODE_CLASS),
            data_theme: palette.name,
            properties: palette
                .properties
                .iter()
                .map(|&(name, value)| CssProperty { name, value })
                .collect(),
        }
    }

    pub fn css_declarations(&self) -> String {
        self.properties
            .iter()
            .map(|property| format!("{}: {};", property.name, property.value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSnapshot {
    pub state: ThemeState,
    pub theme: ThemeApplication,
}

#[derive(Debug, Clone)]
pub struct ThemeManager {
    state: ThemeState,
}

impl ThemeManager {
    /// Reads persisted flags. A missing dark-mode flag falls back to the
    /// client's color-scheme preference, which is then persisted.
    pub fn load(store: &mut impl KeyValueStore, preferred: ColorScheme) -> Self {
        let dark_mode = match store.get_flag(DARK_MODE_KEY) {
            Some(value) => value,
            None => {
                let value = preferred.is_dark();
                store.set_flag(DARK_MODE_KEY, value);
                debug!(dark_mode = value, "dark mode seeded from color-scheme preference");
                value
            }
        };

        let notifications = NotificationCategory::ALL
            .into_iter()
            .map(|category| {
                let enabled = store.get_flag(category.key()).unwrap_or(false);
                (category.key().to_string(), enabled)
            })
            .collect();

        Self {
            state: ThemeState {
                dark_mode,
                sidebar_minimized: store.get_flag(SIDEBAR_MINIMIZED_KEY).unwrap_or(false),
                notifications,
            },
        }
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    pub fn is_dark(&self) -> bool {
        self.state.dark_mode
    }

    pub fn application(&self) -> ThemeApplication {
        ThemeApplication::for_mode(self.state.dark_mode)
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            state: self.state.clone(),
            theme: self.application(),
        }
    }

    pub fn set_dark_mode(
        &mut self,
        store: &mut impl KeyValueStore,
        enabled: bool,
    ) -> ThemeApplication {
        self.state.dark_mode = enabled;
        store.set_flag(DARK_MODE_KEY, enabled);
        info!(dark_mode = enabled, "theme changed");
        self.application()
    }

    pub fn set_notification(
        &mut self,
        store: &mut impl KeyValueStore,
        category: NotificationCategory,
        enabled: bool,
    ) -> Notice {
        self.state
            .notifications
            .insert(category.key().to_string(), enabled);
        store.set_flag(category.key(), enabled);
        info!(category = category.key(), enabled, "notification preference changed");
        Notice::success(format!(
            "{} {}",
            category.label(),
            if enabled { "enabled" } else { "disabled" }
        ))
    }

    /// Mirrors a value another tab wrote. Returns whether live state changed.
    pub fn on_storage_event(&mut self, key: &str, value: Option<&str>) -> bool {
        let flag = value == Some("true");
        let slot = if key == DARK_MODE_KEY {
            &mut self.state.dark_mode
        } else if key == SIDEBAR_MINIMIZED_KEY {
            &mut self.state.sidebar_minimized
        } else if let Some(category) = NotificationCategory::from_key(key) {
            self.state
                .notifications
                .entry(category.key().to_string())
                .or_insert(false)
        } else {
            return false;
        };

        let changed = *slot != flag;
        *slot = flag;
        changed
    }
}
