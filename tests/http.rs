use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    id: String,
    customer_name: String,
    service_type: String,
    status: String,
    date: String,
    estimated: String,
    amount: String,
    payment: String,
    notes: String,
}

#[derive(Debug, Deserialize)]
struct Summary {
    pending: usize,
    #[serde(rename = "in-progress")]
    in_progress: usize,
    ready: usize,
    completed: usize,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Vec<OrderRecord>,
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Notice {
    message: String,
    kind: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "laundry_desk_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/orders")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_laundry_desk"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn list_orders(client: &Client, base_url: &str) -> OrdersResponse {
    client
        .get(format!("{base_url}/api/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn create_order(client: &Client, base_url: &str, body: Value) -> OrderRecord {
    let response = client
        .post(format!("{base_url}/api/orders"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn get_settings(client: &Client, base_url: &str) -> Value {
    client
        .get(format!("{base_url}/api/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn set_dark_mode(client: &Client, base_url: &str, tab: &str, enabled: bool) {
    let response = client
        .post(format!("{base_url}/api/settings/dark-mode"))
        .header("X-Tab-Id", tab)
        .json(&json!({ "enabled": enabled }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn http_create_order_prices_by_weight() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_orders(&client, &server.base_url).await;
    let order = create_order(
        &client,
        &server.base_url,
        json!({ "customerName": "Ana Cruz", "serviceType": "Wash & Dry", "weight": 5 }),
    )
    .await;

    assert!(order.id.starts_with("ORD-"));
    assert_eq!(order.amount, "$25.00");
    assert_eq!(order.status, "pending");
    assert_eq!(order.payment, "Pending");
    assert_eq!(order.estimated, "Processing...");
    assert_eq!(order.notes, "No instructions provided.");

    let after = list_orders(&client, &server.base_url).await;
    assert_eq!(after.orders.len(), before.orders.len() + 1);
    assert_eq!(after.orders[0], order);
    assert_eq!(after.summary.pending, before.summary.pending + 1);
    let total = after.summary.pending
        + after.summary.in_progress
        + after.summary.ready
        + after.summary.completed;
    assert_eq!(total, after.orders.len());
}

#[tokio::test]
async fn http_create_order_rejects_missing_customer() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_orders(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/orders", server.base_url))
        .json(&json!({ "customerName": "  ", "serviceType": "Iron Only" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/orders", server.base_url))
        .json(&json!({ "customerName": "Ana", "serviceType": "Iron Only", "weight": "1e308" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after = list_orders(&client, &server.base_url).await;
    assert_eq!(after.orders, before.orders);
}

#[tokio::test]
async fn http_form_order_redirects_to_orders_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/orders/new", server.base_url))
        .form(&[
            ("customerName", "Form Customer"),
            ("serviceType", "Dry Clean"),
            ("weight", "2.5"),
            ("notes", ""),
        ])
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.url().path(), "/orders");
    let body = response.text().await.unwrap();
    assert!(body.contains("Form Customer"));

    let orders = list_orders(&client, &server.base_url).await;
    assert_eq!(orders.orders[0].customer_name, "Form Customer");
    assert_eq!(orders.orders[0].amount, "$12.50");
}

#[tokio::test]
async fn http_status_update_touches_only_target() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let order = create_order(
        &client,
        &server.base_url,
        json!({ "customerName": "Status Target", "serviceType": "Iron Only" }),
    )
    .await;
    let before = list_orders(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/orders/{}/status", server.base_url, order.id))
        .json(&json!({ "status": "Completed" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let updated: OrderRecord = response.json().await.unwrap();
    assert_eq!(updated.status, "completed");

    let after = list_orders(&client, &server.base_url).await;
    for (old, new) in before.orders.iter().zip(&after.orders) {
        if old.id == order.id {
            assert_eq!(new.status, "completed");
        } else {
            assert_eq!(old, new);
        }
    }
}

#[tokio::test]
async fn http_invalid_status_leaves_record_unchanged() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_orders(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/orders/ORD-002/status", server.base_url))
        .json(&json!({ "status": "bogus" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().starts_with("Invalid status!"));

    let after = list_orders(&client, &server.base_url).await;
    assert_eq!(after.orders, before.orders);
}

#[tokio::test]
async fn http_modal_for_unknown_order_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_orders(&client, &server.base_url).await;
    let response = client
        .get(format!("{}/api/orders/ORD-999", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = list_orders(&client, &server.base_url).await;
    assert_eq!(after.orders, before.orders);

    let view: Value = client
        .get(format!("{}/api/orders/ORD-001", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["orderId"], "#ORD-001");
    assert_eq!(view["receiptUrl"], "/orders/ORD-001/receipt");
}

#[tokio::test]
async fn http_receipt_escapes_customer_text() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let order = create_order(
        &client,
        &server.base_url,
        json!({
            "customerName": "<script>alert(1)</script>",
            "serviceType": "Wash & Dry",
            "notes": "<b>fragile</b>"
        }),
    )
    .await;

    let response = client
        .get(format!("{}/orders/{}/receipt", server.base_url, order.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains(&format!("Receipt - {}", order.id)));
    assert!(body.contains("&lt;script&gt;alert(1)"));
    assert!(!body.contains("<script>alert"));
    assert!(!body.contains("<b>fragile"));
}

#[tokio::test]
async fn http_dark_mode_survives_reload() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    set_dark_mode(&client, &server.base_url, "tab-a", true).await;
    let first = get_settings(&client, &server.base_url).await;
    let second = get_settings(&client, &server.base_url).await;
    assert_eq!(first["state"]["darkMode"], true);
    assert_eq!(first["theme"]["dataTheme"], "dark");
    assert_eq!(first["theme"]["properties"], second["theme"]["properties"]);

    let page = client
        .get(format!("{}/settings.html", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<body class="dark-mode">"#));
    assert!(page.contains(r#"id="darkModeToggle" checked"#));

    set_dark_mode(&client, &server.base_url, "tab-a", false).await;
    let settings = get_settings(&client, &server.base_url).await;
    assert_eq!(settings["state"]["darkMode"], false);
    assert_eq!(settings["theme"]["dataTheme"], "light");
}

#[tokio::test]
async fn http_settings_export_then_import_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    set_dark_mode(&client, &server.base_url, "tab-a", true).await;
    let notice: Notice = client
        .post(format!(
            "{}/api/settings/notifications/smsNotifications",
            server.base_url
        ))
        .json(&json!({ "enabled": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notice.message, "SMS Notifications enabled");
    assert_eq!(notice.kind, "success");

    let expected = get_settings(&client, &server.base_url).await["state"].clone();
    let response = client
        .get(format!("{}/api/settings/export", server.base_url))
        .send()
        .await
        .unwrap();
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("settings.json"));
    let exported = response.text().await.unwrap();
    let document: Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(document["theme"], "dark");
    assert_eq!(document["smsNotifications"], true);

    set_dark_mode(&client, &server.base_url, "tab-a", false).await;
    client
        .post(format!(
            "{}/api/settings/notifications/smsNotifications",
            server.base_url
        ))
        .json(&json!({ "enabled": false }))
        .send()
        .await
        .unwrap();

    let imported: Value = client
        .post(format!("{}/api/settings/import", server.base_url))
        .body(exported)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(imported["notice"]["message"], "Settings imported successfully");
    assert_eq!(get_settings(&client, &server.base_url).await["state"], expected);

    set_dark_mode(&client, &server.base_url, "tab-a", false).await;
}

#[tokio::test]
async fn http_malformed_import_applies_nothing() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_settings(&client, &server.base_url).await;
    for body in [
        "not json",
        "[1, 2]",
        r#"{"unrelated": true}"#,
        r#"{"theme": "dark", "emailNotifications": "yes"}"#,
    ] {
        let response = client
            .post(format!("{}/api/settings/import", server.base_url))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
    assert_eq!(get_settings(&client, &server.base_url).await, before);
}

#[tokio::test]
async fn http_other_tabs_receive_theme_changes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    set_dark_mode(&client, &server.base_url, "tab-a", false).await;
    let mut events = client
        .get(format!("{}/api/settings/events?tab=tab-b", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(events.status().is_success());

    set_dark_mode(&client, &server.base_url, "tab-a", true).await;

    let received = timeout(Duration::from_secs(3), async {
        let mut buffer = String::new();
        while let Some(chunk) = events.chunk().await.unwrap() {
            buffer.push_str(&String::from_utf8_lossy(&chunk));
            if buffer.contains("event: theme") && buffer.contains("\"darkMode\":true") {
                return buffer;
            }
        }
        buffer
    })
    .await
    .expect("no theme event before timeout");
    assert!(received.contains("event: theme"));
    assert!(received.contains("\"dataTheme\":\"dark\""));

    set_dark_mode(&client, &server.base_url, "tab-a", false).await;
}

#[tokio::test]
async fn http_sidebar_state_is_persisted() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/sidebar", server.base_url))
        .json(&json!({ "minimized": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let page = client
        .get(format!("{}/orders.html", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("lg:ml-20"));
    assert!(page.contains(r#"href="orders.html" class="nav-item flex items-center gap-3 px-4 py-3 rounded-lg active""#));

    client
        .post(format!("{}/api/sidebar", server.base_url))
        .json(&json!({ "minimized": false }))
        .send()
        .await
        .unwrap();
    let settings = get_settings(&client, &server.base_url).await;
    assert_eq!(settings["state"]["sidebarMinimized"], false);
}

#[tokio::test]
async fn http_charts_by_name() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let chart: Value = client
        .get(format!("{}/api/charts/dashboard-orders", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(chart["type"], "bar");
    assert_eq!(chart["data"]["datasets"][0]["data"], json!([4, 6, 5, 3]));

    let response = client
        .get(format!("{}/api/charts/nope", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_profile_validation_and_display_name() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut info = json!({
        "firstName": "Maria Clara",
        "lastName": "Santos",
        "displayName": "",
        "email": "not-an-email",
        "address": "1 Rizal Ave",
        "phoneNumber": "+63 912 345 6789"
    });
    let response = client
        .post(format!("{}/api/profile", server.base_url))
        .json(&info)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().await.unwrap(),
        "Please enter a valid email address."
    );

    info["email"] = json!("maria@example.com");
    let notice: Notice = client
        .post(format!("{}/api/profile", server.base_url))
        .json(&info)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notice.message, "Personal information updated successfully!");

    let page = client
        .get(format!("{}/profile", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"value="Clara Santos""#));
}

#[tokio::test]
async fn http_home_widgets_validate_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/ratings", server.base_url))
        .json(&json!({ "ratings": [0, 0, 0, 0, 0] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let notice: Notice = client
        .post(format!("{}/api/ratings", server.base_url))
        .json(&json!({ "ratings": [5, 4, 0, 0, 0] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notice.message, "Thank you! Average rating: 1.8 stars");

    let response = client
        .post(format!("{}/api/membership", server.base_url))
        .json(&json!({ "fullName": "Ana Cruz", "contactNumber": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
