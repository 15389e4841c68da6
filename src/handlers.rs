use crate::charts::{ChartConfig, ChartName};
use crate::errors::AppError;
use crate::home::{MembershipForm, RatingSheet, apply_membership};
use crate::modal::{self, OrderModalView};
use crate::models::{
    ImportResponse, NewOrderRequest, Notice, OrderRecord, OrdersResponse, SidebarRequest,
    StatusUpdateRequest, ToggleRequest,
};
use crate::nav::SidebarController;
use crate::profile::{
    PasswordChange, PersonalInfo, change_password, derive_display_name, update_personal_info,
};
use crate::settings::{
    EXPORT_FILENAME, FeedbackForm, apply_import, export, parse_import, submit_feedback,
};
use crate::state::AppState;
use crate::storage::StorageChange;
use crate::theme::{
    COLOR_SCHEME_HINT_HEADER, ColorScheme, NotificationCategory, ThemeManager, ThemeSnapshot,
};
use crate::ui::{self, PageContext};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{
        Html, IntoResponse, Redirect,
        sse::{Event, KeepAlive, Sse},
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_stream::{
    Stream, StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};
use tracing::{info, warn};

/// Set by the page script on every write so a tab can skip its own changes.
pub const TAB_ID_HEADER: &str = "x-tab-id";

fn tab_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TAB_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn color_scheme(headers: &HeaderMap) -> ColorScheme {
    ColorScheme::from_hint(
        headers
            .get(COLOR_SCHEME_HINT_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
}

async fn load_chrome(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(ThemeManager, SidebarController), AppError> {
    let scheme = color_scheme(headers);
    state
        .update_preferences(tab_id(headers).as_deref(), |prefs| {
            let theme = ThemeManager::load(prefs, scheme);
            (theme, SidebarController::load(&*prefs))
        })
        .await
}

async fn load_theme(state: &AppState, headers: &HeaderMap) -> Result<ThemeManager, AppError> {
    Ok(load_chrome(state, headers).await?.0)
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let (theme, sidebar) = load_chrome(&state, &headers).await?;
    let summary = state.orders.lock().await.summary();
    let ctx = PageContext {
        path: uri.path(),
        theme: &theme,
        sidebar,
    };
    Ok(Html(ui::render_dashboard(&ctx, &summary)))
}

pub async fn home_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let (theme, sidebar) = load_chrome(&state, &headers).await?;
    let ctx = PageContext {
        path: uri.path(),
        theme: &theme,
        sidebar,
    };
    Ok(Html(ui::render_home(&ctx)))
}

pub async fn orders_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let (theme, sidebar) = load_chrome(&state, &headers).await?;
    let store = state.orders.lock().await;
    let ctx = PageContext {
        path: uri.path(),
        theme: &theme,
        sidebar,
    };
    Ok(Html(ui::render_orders_page(&ctx, &store)))
}

pub async fn profile_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let (theme, sidebar) = load_chrome(&state, &headers).await?;
    let info = state.profile.lock().await.clone();
    let ctx = PageContext {
        path: uri.path(),
        theme: &theme,
        sidebar,
    };
    Ok(Html(ui::render_profile(&ctx, &info)))
}

pub async fn settings_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let (theme, sidebar) = load_chrome(&state, &headers).await?;
    let ctx = PageContext {
        path: uri.path(),
        theme: &theme,
        sidebar,
    };
    Ok(Html(ui::render_settings(&ctx)))
}

pub async fn list_orders(State(state): State<AppState>) -> Json<OrdersResponse> {
    let store = state.orders.lock().await;
    Json(OrdersResponse {
        orders: store.newest_first().cloned().collect(),
        summary: store.summary(),
    })
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<NewOrderRequest>,
) -> Result<(StatusCode, Json<OrderRecord>), AppError> {
    let record = insert_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn create_order_form(
    State(state): State<AppState>,
    Form(payload): Form<NewOrderRequest>,
) -> Result<Redirect, AppError> {
    insert_order(&state, payload).await?;
    Ok(Redirect::to("/orders"))
}

async fn insert_order(state: &AppState, request: NewOrderRequest) -> Result<OrderRecord, AppError> {
    let mut store = state.orders.lock().await;
    let record = store
        .create_order(request)
        .inspect_err(|err| warn!(%err, "order rejected"))?;
    Ok(record.clone())
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<OrderRecord>, AppError> {
    let mut store = state.orders.lock().await;
    let record = store
        .update_status(&id, &payload.status)
        .inspect_err(|err| warn!(order_id = %id, %err, "status update rejected"))?;
    Ok(Json(record.clone()))
}

pub async fn order_modal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderModalView>, AppError> {
    let store = state.orders.lock().await;
    modal::open(&store, &id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("order {id} not found")))
}

pub async fn order_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = state.orders.lock().await;
    modal::print(&store, &id)
        .map(Html)
        .ok_or_else(|| AppError::not_found(format!("order {id} not found")))
}

pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ThemeSnapshot>, AppError> {
    Ok(Json(load_theme(&state, &headers).await?.snapshot()))
}

pub async fn set_dark_mode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ThemeSnapshot>, AppError> {
    let scheme = color_scheme(&headers);
    let snapshot = state
        .update_preferences(tab_id(&headers).as_deref(), |prefs| {
            let mut manager = ThemeManager::load(prefs, scheme);
            manager.set_dark_mode(prefs, payload.enabled);
            manager.snapshot()
        })
        .await?;
    Ok(Json(snapshot))
}

pub async fn set_notification(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Notice>, AppError> {
    let category = NotificationCategory::from_key(&key)
        .ok_or_else(|| AppError::not_found(format!("unknown notification setting {key}")))?;
    let scheme = color_scheme(&headers);
    let notice = state
        .update_preferences(tab_id(&headers).as_deref(), |prefs| {
            let mut manager = ThemeManager::load(prefs, scheme);
            manager.set_notification(prefs, category, payload.enabled)
        })
        .await?;
    Ok(Json(notice))
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    tab: Option<String>,
}

pub async fn settings_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let receiver = state.subscribe();
    let scheme = color_scheme(&headers);
    let mirror = Arc::new(Mutex::new(load_theme(&state, &headers).await?));
    let tab = query.tab;
    info!(tab = ?tab, "settings listener connected");

    let stream = BroadcastStream::new(receiver)
        .then(move |received| {
            let state = state.clone();
            let mirror = Arc::clone(&mirror);
            let tab = tab.clone();
            async move { next_snapshot(&state, &mirror, tab.as_deref(), scheme, received).await }
        })
        .filter_map(|snapshot| {
            snapshot.map(|snapshot| Event::default().event("theme").json_data(snapshot))
        });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Applies one broadcast to a tab's mirror. After missed broadcasts the
/// mirror is reloaded from the store so it cannot drift.
async fn next_snapshot(
    state: &AppState,
    mirror: &Mutex<ThemeManager>,
    tab: Option<&str>,
    scheme: ColorScheme,
    received: Result<StorageChange, BroadcastStreamRecvError>,
) -> Option<ThemeSnapshot> {
    let mut mirror = mirror.lock().await;
    match received {
        Ok(change) if change.is_visible_to(tab) => {
            if !mirror.on_storage_event(&change.key, change.value.as_deref()) {
                return None;
            }
        }
        Ok(_) => return None,
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(skipped, "settings listener fell behind, reloading");
            match state
                .update_preferences(tab, |prefs| ThemeManager::load(prefs, scheme))
                .await
            {
                Ok(reloaded) => *mirror = reloaded,
                Err(err) => {
                    warn!("failed to reload settings listener: {}", err.message);
                    return None;
                }
            }
        }
    }
    Some(mirror.snapshot())
}

pub async fn export_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let manager = load_theme(&state, &headers).await?;
    let body = serde_json::to_string_pretty(&export(manager.state())).map_err(AppError::internal)?;
    info!("settings exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

pub async fn import_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let import = parse_import(&body).inspect_err(|err| warn!(%err, "settings import rejected"))?;
    let scheme = color_scheme(&headers);
    let response = state
        .update_preferences(tab_id(&headers).as_deref(), |prefs| {
            let mut manager = ThemeManager::load(prefs, scheme);
            let notice = apply_import(&mut manager, prefs, &import);
            ImportResponse {
                notice,
                snapshot: manager.snapshot(),
            }
        })
        .await?;
    Ok(Json(response))
}

pub async fn submit_feedback_form(Json(form): Json<FeedbackForm>) -> Result<Json<Notice>, AppError> {
    Ok(Json(submit_feedback(&form)?))
}

pub async fn set_sidebar(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SidebarRequest>,
) -> Result<StatusCode, AppError> {
    state
        .update_preferences(tab_id(&headers).as_deref(), |prefs| {
            let mut sidebar = SidebarController::load(&*prefs);
            if payload.minimized {
                sidebar.minimize(prefs);
            } else {
                sidebar.maximize(prefs);
            }
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChartConfig>, AppError> {
    let chart = ChartName::parse(&name)
        .ok_or_else(|| AppError::not_found(format!("unknown chart {name}")))?;
    let summary = state.orders.lock().await.summary();
    Ok(Json(chart.build(&summary)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(mut info): Json<PersonalInfo>,
) -> Result<Json<Notice>, AppError> {
    if info.display_name.trim().is_empty() {
        if let Some(name) = derive_display_name(&info.first_name, &info.last_name) {
            info.display_name = name;
        }
    }
    let notice = update_personal_info(&info)?;
    *state.profile.lock().await = info;
    Ok(Json(notice))
}

pub async fn update_password(Json(change): Json<PasswordChange>) -> Result<Json<Notice>, AppError> {
    Ok(Json(change_password(&change)?))
}

pub async fn submit_rating(Json(sheet): Json<RatingSheet>) -> Result<Json<Notice>, AppError> {
    Ok(Json(sheet.submit()?))
}

pub async fn submit_membership(Json(form): Json<MembershipForm>) -> Result<Json<Notice>, AppError> {
    Ok(Json(apply_membership(&form)?))
}
