use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/index.html", get(handlers::dashboard_page))
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/home", get(handlers::home_page))
        .route("/home.html", get(handlers::home_page))
        .route("/orders", get(handlers::orders_page))
        .route("/orders.html", get(handlers::orders_page))
        .route("/orders/new", post(handlers::create_order_form))
        .route("/orders/:id/receipt", get(handlers::order_receipt))
        .route("/profile", get(handlers::profile_page))
        .route("/profile.html", get(handlers::profile_page))
        .route("/settings", get(handlers::settings_page))
        .route("/settings.html", get(handlers::settings_page))
        .route(
            "/api/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/api/orders/:id", get(handlers::order_modal))
        .route("/api/orders/:id/status", post(handlers::update_order_status))
        .route("/api/settings", get(handlers::get_settings))
        .route("/api/settings/dark-mode", post(handlers::set_dark_mode))
        .route(
            "/api/settings/notifications/:key",
            post(handlers::set_notification),
        )
        .route("/api/settings/events", get(handlers::settings_events))
        .route("/api/settings/export", get(handlers::export_settings))
        .route("/api/settings/import", post(handlers::import_settings))
        .route("/api/feedback", post(handlers::submit_feedback_form))
        .route("/api/sidebar", post(handlers::set_sidebar))
        .route("/api/charts/:name", get(handlers::chart))
        .route("/api/profile", post(handlers::update_profile))
        .route("/api/profile/password", post(handlers::update_password))
        .route("/api/ratings", post(handlers::submit_rating))
        .route("/api/membership", post(handlers::submit_membership))
        .with_state(state)
}
