pub mod app;
pub mod charts;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod home;
pub mod modal;
pub mod models;
pub mod nav;
pub mod orders;
pub mod profile;
pub mod settings;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_preferences;
