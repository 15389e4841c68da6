use crate::storage::{KeyValueStore, SIDEBAR_MINIMIZED_KEY};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub logout: bool,
}

impl NavEntry {
    const fn page(label: &'static str, href: &'static str, icon: &'static str) -> Self {
        Self {
            label,
            href,
            icon,
            logout: false,
        }
    }

    pub fn page_id(&self) -> &'static str {
        self.href.split('.').next().unwrap_or(self.href)
    }
}

pub static NAV_ENTRIES: [NavEntry; 6] = [
    NavEntry::page("Dashboard", "index.html", "fa-chart-line"),
    NavEntry::page("Home", "home.html", "fa-house"),
    NavEntry::page("Orders", "orders.html", "fa-basket-shopping"),
    NavEntry::page("Profile", "profile.html", "fa-user"),
    NavEntry::page("Settings", "settings.html", "fa-gear"),
    NavEntry {
        label: "Log out",
        href: "#",
        icon: "fa-right-from-bracket",
        logout: true,
    },
];

pub fn page_from_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    let stem = last.split('.').next().unwrap_or_default();

    match stem {
        "" | "dashboard" => "index".to_string(),
        stem => stem.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub entry: &'static NavEntry,
    pub active: bool,
}

pub fn set_active_item(path: &str) -> Vec<NavItem> {
    let page = page_from_path(path);
    let mut items: Vec<NavItem> = NAV_ENTRIES
        .iter()
        .map(|entry| NavItem {
            entry,
            active: false,
        })
        .collect();

    if let Some(item) = items
        .iter_mut()
        .find(|item| !item.entry.logout && item.entry.page_id() == page)
    {
        item.active = true;
    }
    items
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarMode {
    #[default]
    Expanded,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarLayout {
    pub width_class: &'static str,
    pub content_margin_class: &'static str,
    pub expanded_header_hidden: bool,
    pub minimized_header_hidden: bool,
    pub nav_text_hidden: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarController {
    mode: SidebarMode,
}

impl SidebarController {
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mode = match store.get_flag(SIDEBAR_MINIMIZED_KEY) {
            Some(true) => SidebarMode::Minimized,
            _ => SidebarMode::Expanded,
        };
        Self { mode }
    }

    pub fn mode(&self) -> SidebarMode {
        self.mode
    }

    pub fn minimize(&mut self, store: &mut impl KeyValueStore) -> SidebarLayout {
        self.transition(store, SidebarMode::Minimized)
    }

    pub fn maximize(&mut self, store: &mut impl KeyValueStore) -> SidebarLayout {
        self.transition(store, SidebarMode::Expanded)
    }

    fn transition(&mut self, store: &mut impl KeyValueStore, mode: SidebarMode) -> SidebarLayout {
        let minimized = mode == SidebarMode::Minimized;
        if self.mode != mode {
            info!(minimized, "sidebar width changed");
        }
        self.mode = mode;
        store.set_flag(SIDEBAR_MINIMIZED_KEY, minimized);
        self.layout()
    }

    pub fn layout(&self) -> SidebarLayout {
        match self.mode {
            SidebarMode::Expanded => SidebarLayout {
                width_class: "w-64",
                content_margin_class: "lg:ml-64",
                expanded_header_hidden: false,
                minimized_header_hidden: true,
                nav_text_hidden: false,
            },
            SidebarMode::Minimized => SidebarLayout {
                width_class: "w-20",
                content_margin_class: "lg:ml-20",
                expanded_header_hidden: true,
                minimized_header_hidden: false,
                nav_text_hidden: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MobileSidebar {
    Open,
    #[default]
    Closed,
}

impl MobileSidebar {
    pub fn class(self) -> &'static str {
        match self {
            MobileSidebar::Open => "",
            MobileSidebar::Closed => "-translate-x-full",
        }
    }
}
