use crate::models::{OrderStatus, OrderSummary};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    One(&'static str),
    Each(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub data: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

impl Dataset {
    fn new(label: Option<&'static str>, data: Vec<u32>) -> Self {
        Self {
            label,
            data,
            border_color: None,
            background_color: None,
            fill: None,
            tension: None,
            border_width: None,
            border_radius: None,
        }
    }

    fn smooth_area(label: &'static str, data: Vec<u32>, line: &'static str, area: &'static str) -> Self {
        Self {
            border_color: Some(line),
            background_color: Some(Colors::One(area)),
            fill: Some(true),
            tension: Some(0.4),
            ..Self::new(Some(label), data)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartName {
    DashboardSales,
    DashboardOrders,
    HomeSales,
    HomeSpending,
    OrderStatus,
}

impl ChartName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "dashboard-sales" => Some(ChartName::DashboardSales),
            "dashboard-orders" => Some(ChartName::DashboardOrders),
            "home-sales" => Some(ChartName::HomeSales),
            "home-spending" => Some(ChartName::HomeSpending),
            "order-status" => Some(ChartName::OrderStatus),
            _ => None,
        }
    }

    pub fn build(self, summary: &OrderSummary) -> ChartConfig {
        match self {
            ChartName::DashboardSales => dashboard_sales(),
            ChartName::DashboardOrders => dashboard_orders(),
            ChartName::HomeSales => home_sales(),
            ChartName::HomeSpending => home_spending(),
            ChartName::OrderStatus => order_status(summary),
        }
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn dashboard_sales() -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels(&MONTHS),
            datasets: vec![
                Dataset::smooth_area("2023", vec![80, 55, 60, 40, 75, 50, 85, 45, 65, 90, 70, 80], "#6A5ACD", "#6A5ACD10"),
                Dataset::smooth_area("2024", vec![65, 80, 70, 50, 60, 45, 70, 85, 40, 75, 55, 95], "#3CB371", "#3CB37110"),
                Dataset::smooth_area("2025", vec![90, 70, 85, 65, 40, 75, 95, 50, 80, 60, 75, 90], "#FF6347", "#FF634710"),
            ],
        },
        options: Some(json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "bottom" } },
            "scales": { "y": { "beginAtZero": true } }
        })),
    }
}

pub fn dashboard_orders() -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(&["Week 1", "Week 2", "Week 3", "Week 4"]),
            datasets: vec![Dataset {
                border_color: Some("rgba(95,158,160,1)"),
                background_color: Some(Colors::One("rgba(95,158,160,0.8)")),
                border_width: Some(1),
                border_radius: Some(6),
                ..Dataset::new(Some("Orders"), vec![4, 6, 5, 3])
            }],
        },
        options: Some(json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "display": false } },
            "scales": {
                "y": { "beginAtZero": true, "display": false, "max": 7 },
                "x": { "grid": { "display": false }, "ticks": { "font": { "size": 10 } } }
            }
        })),
    }
}

pub fn home_sales() -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels(&MONTHS[..6]),
            datasets: vec![Dataset::smooth_area(
                "Sales ($)",
                vec![1200, 1900, 3000, 5000, 2000, 3000],
                "#3498db",
                "rgba(52, 152, 219, 0.1)",
            )],
        },
        options: Some(json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": {
                "x": { "ticks": { "color": "#bdc3c7" } },
                "y": { "ticks": { "color": "#bdc3c7" } }
            }
        })),
    }
}

pub fn home_spending() -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: labels(&["Washing", "Drying", "Ironing", "Special Services"]),
            datasets: vec![Dataset {
                background_color: Some(Colors::Each(vec!["#3498db", "#27ae60", "#f39c12", "#e74c3c"])),
                border_width: Some(0),
                ..Dataset::new(None, vec![400, 300, 350, 200])
            }],
        },
        options: None,
    }
}

pub fn order_status(summary: &OrderSummary) -> ChartConfig {
    let counts = OrderStatus::ALL
        .into_iter()
        .map(|status| u32::try_from(summary.count(status)).unwrap_or(u32::MAX))
        .collect();

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: OrderStatus::ALL.into_iter().map(OrderStatus::label).collect(),
            datasets: vec![Dataset {
                background_color: Some(Colors::Each(vec!["#f39c12", "#3498db", "#4ecdc4", "#27ae60"])),
                border_width: Some(0),
                ..Dataset::new(Some("Orders"), counts)
            }],
        },
        options: Some(json!({ "plugins": { "legend": { "position": "bottom" } } })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_chart_has_a_line_per_year() {
        let chart = dashboard_sales();
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.data.labels.len(), 12);
        assert_eq!(chart.data.datasets.len(), 3);
        assert!(chart.data.datasets.iter().all(|set| set.data.len() == 12));
    }

    #[test]
    fn config_serializes_in_chartjs_shape() {
        let json = serde_json::to_value(dashboard_orders()).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["data"]["datasets"][0]["borderRadius"], 6);
        assert_eq!(json["data"]["datasets"][0]["backgroundColor"], "rgba(95,158,160,0.8)");
        assert_eq!(json["options"]["scales"]["y"]["max"], 7);
        assert!(json["data"]["datasets"][0].get("tension").is_none());

        let json = serde_json::to_value(home_spending()).unwrap();
        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["data"]["datasets"][0]["backgroundColor"][3], "#e74c3c");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn status_chart_tracks_summary() {
        let summary = OrderSummary {
            pending: 2,
            in_progress: 1,
            ready: 0,
            completed: 4,
        };
        let chart = ChartName::parse("order-status").unwrap().build(&summary);
        assert_eq!(chart.data.datasets[0].data, vec![2, 1, 0, 4]);
        assert_eq!(chart.data.labels[1], "in progress");
        assert!(ChartName::parse("pie").is_none());
    }
}
