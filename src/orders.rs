use crate::models::{
    NewOrderRequest, OrderRecord, OrderStatus, OrderSummary, PaymentStatus, WeightInput,
};
use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::info;

pub const PRICE_PER_WEIGHT_UNIT: f64 = 5.0;
pub const DEFAULT_NOTES: &str = "No instructions provided.";
pub const NEW_ORDER_ESTIMATE: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    UnknownOrder(String),
    #[error("Invalid status! Use: pending, in-progress, ready, or completed.")]
    InvalidStatus(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid weight: {0}")]
    InvalidWeight(String),
}

#[derive(Debug, Clone)]
pub struct OrderStore {
    orders: Vec<OrderRecord>,
    next_number: u32,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            next_number: 1,
        }
    }

    pub fn seeded() -> Self {
        let mut store = Self::new();
        for record in fixture_orders() {
            store.insert_existing(record);
        }
        store
    }

    fn insert_existing(&mut self, record: OrderRecord) {
        if let Some(number) = order_number(&record.id) {
            self.next_number = self.next_number.max(number.saturating_add(1));
        }
        self.orders.push(record);
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&OrderRecord> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &OrderRecord> {
        self.orders.iter().rev()
    }

    pub fn summary(&self) -> OrderSummary {
        let mut summary = OrderSummary::default();
        for order in &self.orders {
            summary.record(order.status);
        }
        summary
    }

    pub fn create_order(&mut self, request: NewOrderRequest) -> Result<&OrderRecord, OrderError> {
        self.create_order_on(Local::now().date_naive(), request)
    }

    pub fn create_order_on(
        &mut self,
        date: NaiveDate,
        request: NewOrderRequest,
    ) -> Result<&OrderRecord, OrderError> {
        let customer_name = required(&request.customer_name, "customer name")?;
        let service_type = required(&request.service_type, "service type")?;
        let weight = parse_weight(request.weight.as_ref())?;
        let amount = weight * PRICE_PER_WEIGHT_UNIT;
        if !amount.is_finite() {
            return Err(OrderError::InvalidWeight(weight.to_string()));
        }
        let notes = match request.notes.trim() {
            "" => DEFAULT_NOTES.to_string(),
            notes => notes.to_string(),
        };

        let id = format_order_id(self.next_number);
        self.next_number = self.next_number.saturating_add(1);

        info!(order_id = %id, customer = %customer_name, "order created");
        self.orders.push(OrderRecord {
            id,
            customer_name,
            service_type,
            status: OrderStatus::Pending,
            date: date.format("%Y-%m-%d").to_string(),
            estimated: NEW_ORDER_ESTIMATE.to_string(),
            amount: format_amount(amount),
            payment: PaymentStatus::Pending,
            notes,
        });

        // Just pushed.
        Ok(&self.orders[self.orders.len() - 1])
    }

    pub fn update_status(&mut self, id: &str, new_status: &str) -> Result<&OrderRecord, OrderError> {
        let status = OrderStatus::parse(new_status)
            .ok_or_else(|| OrderError::InvalidStatus(new_status.to_string()))?;
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| OrderError::UnknownOrder(id.to_string()))?;

        info!(order_id = %id, from = %order.status, to = %status, "order status updated");
        order.status = status;
        Ok(order)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, OrderError> {
    match value.trim() {
        "" => Err(OrderError::MissingField(field)),
        value => Ok(value.to_string()),
    }
}

/// Missing or blank weight counts as zero.
pub fn parse_weight(input: Option<&WeightInput>) -> Result<f64, OrderError> {
    let weight = match input {
        None => 0.0,
        Some(WeightInput::Number(value)) => *value,
        Some(WeightInput::Text(text)) => match text.trim() {
            "" => 0.0,
            text => text
                .parse::<f64>()
                .map_err(|_| OrderError::InvalidWeight(text.to_string()))?,
        },
    };

    if !weight.is_finite() || weight < 0.0 {
        return Err(OrderError::InvalidWeight(weight.to_string()));
    }
    Ok(weight)
}

pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn format_order_id(number: u32) -> String {
    format!("ORD-{number:03}")
}

fn order_number(id: &str) -> Option<u32> {
    id.strip_prefix("ORD-")?.parse().ok()
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: &str,
    customer_name: &str,
    service_type: &str,
    status: OrderStatus,
    date: &str,
    estimated: &str,
    amount: &str,
    payment: PaymentStatus,
    notes: &str,
) -> OrderRecord {
    OrderRecord {
        id: id.to_string(),
        customer_name: customer_name.to_string(),
        service_type: service_type.to_string(),
        status,
        date: date.to_string(),
        estimated: estimated.to_string(),
        amount: amount.to_string(),
        payment,
        notes: notes.to_string(),
    }
}

#[rustfmt::skip]
fn fixture_orders() -> Vec<OrderRecord> {
    use OrderStatus::*;
    vec![
        fixture("ORD-001", "John Smith", "Wash & Dry", Pending, "2024-01-15", "2024-01-16 14:00", "$25.00", PaymentStatus::Paid, "Handle with care. Extra fabric softener."),
        fixture("ORD-002", "Khrysha Español", "Wash, Dry & Fold", InProgress, "2024-01-15", "2024-01-16 16:00", "$35.00", PaymentStatus::Paid, "Separate whites and colors."),
        fixture("ORD-003", "Amber Pagusara", "Iron Only", Ready, "2024-01-14", "2024-01-15 10:00", "$15.00", PaymentStatus::Paid, "Business shirts - high starch."),
        fixture("ORD-004", "Emily Davis", "Full Service", Completed, "2024-01-14", "2024-01-15 12:00", "$45.00", PaymentStatus::Paid, "Delicate items included."),
        fixture("ORD-005", "David Wilson", "Wash & Dry", InProgress, "2024-01-15", "2024-01-16 15:00", "$28.00", PaymentStatus::Pending, "Large load - comforters."),
        fixture("ORD-006", "Lisa Anderson", "Dry Clean", Pending, "2024-01-15", "2024-01-17 11:00", "$55.00", PaymentStatus::Paid, "Formal wear - wedding dress."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, weight: Option<WeightInput>, notes: &str) -> NewOrderRequest {
        NewOrderRequest {
            customer_name: name.to_string(),
            service_type: "Wash & Dry".to_string(),
            weight,
            notes: notes.to_string(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn create_forces_pending_and_prices_by_weight() {
        let mut store = OrderStore::seeded();
        let order = store
            .create_order_on(day(), request("Ana", Some(WeightInput::Number(5.0)), ""))
            .unwrap()
            .clone();

        assert_eq!(order.id, "ORD-007");
        assert_eq!(order.amount, "$25.00");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment, PaymentStatus::Pending);
        assert_eq!(order.date, "2026-03-02");
        assert_eq!(order.estimated, NEW_ORDER_ESTIMATE);
        assert_eq!(order.notes, DEFAULT_NOTES);
    }

    #[test]
    fn blank_weight_costs_nothing() {
        let mut store = OrderStore::new();
        let order = store
            .create_order_on(day(), request("Ana", Some(WeightInput::Text(" ".into())), "Cold wash"))
            .unwrap();
        assert_eq!(order.amount, "$0.00");
        assert_eq!(order.notes, "Cold wash");
        assert_eq!(order.id, "ORD-001");

        let order = store.create_order_on(day(), request("Ben", None, "")).unwrap();
        assert_eq!(order.amount, "$0.00");
    }

    #[test]
    fn create_rejects_bad_input_without_consuming_an_id() {
        let mut store = OrderStore::new();
        assert_eq!(
            store.create_order_on(day(), request("  ", None, "")).unwrap_err(),
            OrderError::MissingField("customer name")
        );
        assert!(matches!(
            store.create_order_on(day(), request("Ana", Some(WeightInput::Text("heavy".into())), "")),
            Err(OrderError::InvalidWeight(_))
        ));
        assert!(matches!(
            store.create_order_on(day(), request("Ana", Some(WeightInput::Number(-1.0)), "")),
            Err(OrderError::InvalidWeight(_))
        ));
        assert!(store.is_empty());

        let order = store.create_order_on(day(), request("Ana", None, "")).unwrap();
        assert_eq!(order.id, "ORD-001");
    }

    #[test]
    fn weight_too_large_to_price_is_rejected() {
        let mut store = OrderStore::new();
        assert!(matches!(
            store.create_order_on(day(), request("Ana", Some(WeightInput::Text("1e308".into())), "")),
            Err(OrderError::InvalidWeight(_))
        ));
        assert!(matches!(
            store.create_order_on(day(), request("Ana", Some(WeightInput::Number(f64::MAX)), "")),
            Err(OrderError::InvalidWeight(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn summary_partitions_every_record() {
        let mut store = OrderStore::seeded();
        store.create_order_on(day(), request("Ana", None, "")).unwrap();
        let summary = store.summary();

        assert_eq!(summary.total(), store.len());
        assert_eq!(summary.pending, 3);
        assert_eq!(summary.in_progress, 2);
        assert_eq!(summary.ready, 1);
        assert_eq!(summary.completed, 1);
    }

    #[test]
    fn newest_first_reverses_insertion_order() {
        let mut store = OrderStore::seeded();
        store.create_order_on(day(), request("Ana", None, "")).unwrap();
        let ids: Vec<&str> = store.newest_first().map(|order| order.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"ORD-007"));
        assert_eq!(ids.last(), Some(&"ORD-001"));
    }

    #[test]
    fn update_status_touches_only_the_target() {
        let mut store = OrderStore::seeded();
        let before: Vec<OrderRecord> = store.newest_first().cloned().collect();

        store.update_status("ORD-002", "COMPLETED").unwrap();

        for (old, new) in before.iter().zip(store.newest_first()) {
            if new.id == "ORD-002" {
                assert_eq!(new.status, OrderStatus::Completed);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn invalid_status_leaves_record_alone() {
        let mut store = OrderStore::seeded();
        let err = store.update_status("ORD-001", "bogus").unwrap_err();
        assert_eq!(err, OrderError::InvalidStatus("bogus".to_string()));
        assert_eq!(store.get("ORD-001").unwrap().status, OrderStatus::Pending);

        let err = store.update_status("ORD-999", "ready").unwrap_err();
        assert_eq!(err, OrderError::UnknownOrder("ORD-999".to_string()));
    }

    #[test]
    fn ids_keep_counting_past_three_digits() {
        assert_eq!(format_order_id(7), "ORD-007");
        assert_eq!(format_order_id(1234), "ORD-1234");
        assert_eq!(order_number("ORD-042"), Some(42));
        assert_eq!(order_number("42"), None);
    }
}
