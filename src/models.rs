use crate::theme::ThemeSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Ready,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> String {
        self.as_str().replace('-', " ")
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|status| status.as_str() == wanted)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub customer_name: String,
    pub service_type: String,
    pub status: OrderStatus,
    pub date: String,
    pub estimated: String,
    pub amount: String,
    pub payment: PaymentStatus,
    pub notes: String,
}

/// Weight arrives as a number from JSON clients and as text from HTML forms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub weight: Option<WeightInput>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub pending: usize,
    #[serde(rename = "in-progress")]
    pub in_progress: usize,
    pub ready: usize,
    pub completed: usize,
}

impl OrderSummary {
    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::InProgress => self.in_progress,
            OrderStatus::Ready => self.ready,
            OrderStatus::Completed => self.completed,
        }
    }

    pub fn record(&mut self, status: OrderStatus) {
        match status {
            OrderStatus::Pending => self.pending += 1,
            OrderStatus::InProgress => self.in_progress += 1,
            OrderStatus::Ready => self.ready += 1,
            OrderStatus::Completed => self.completed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.ready + self.completed
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderRecord>,
    pub summary: OrderSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NoticeKind {
    pub const ALL: [NoticeKind; 4] = [
        NoticeKind::Success,
        NoticeKind::Error,
        NoticeKind::Info,
        NoticeKind::Warning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NoticeKind::Success => "#28a745",
            NoticeKind::Error => "#dc3545",
            NoticeKind::Info => "#17a2b8",
            NoticeKind::Warning => "#ffc107",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SidebarRequest {
    pub minimized: bool,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub notice: Notice,
    pub snapshot: ThemeSnapshot,
}
