use crate::models::OrderRecord;
use crate::orders::OrderStore;
use serde::Serialize;
use tracing::warn;
use v_htmlescape::escape;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderModalView {
    pub order_id: String,
    pub customer_name: String,
    pub service_type: String,
    pub date: String,
    pub estimated: String,
    pub amount: String,
    pub notes: String,
    pub status_text: String,
    pub status_class: String,
    pub receipt_url: String,
}

impl OrderModalView {
    pub fn from_record(order: &OrderRecord) -> Self {
        Self {
            order_id: format!("#{}", order.id),
            customer_name: order.customer_name.clone(),
            service_type: order.service_type.clone(),
            date: order.date.clone(),
            estimated: order.estimated.clone(),
            amount: order.amount.clone(),
            notes: order.notes.clone(),
            status_text: order.status.as_str().to_uppercase(),
            status_class: format!("status-badge {}", order.status),
            receipt_url: receipt_url(&order.id),
        }
    }
}

pub fn receipt_url(id: &str) -> String {
    format!("/orders/{id}/receipt")
}

pub fn open(store: &OrderStore, id: &str) -> Option<OrderModalView> {
    match store.get(id) {
        Some(order) => Some(OrderModalView::from_record(order)),
        None => {
            warn!(order_id = %id, "modal requested for unknown order");
            None
        }
    }
}

pub fn print(store: &OrderStore, id: &str) -> Option<String> {
    match store.get(id) {
        Some(order) => Some(render_receipt(order)),
        None => {
            warn!(order_id = %id, "receipt requested for unknown order");
            None
        }
    }
}

pub fn render_receipt(order: &OrderRecord) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Receipt - {id}</title>
  <style>
    body {{ font-family: sans-serif; padding: 40px; line-height: 1.6; color: #333; }}
    .header {{ text-align: center; border-bottom: 2px solid #58A5A2; padding-bottom: 10px; margin-bottom: 20px; }}
    .row {{ display: flex; justify-content: space-between; margin: 10px 0; border-bottom: 1px solid #eee; padding-bottom: 5px; }}
    .total {{ font-weight: bold; font-size: 1.2em; border-top: 2px solid #58A5A2; margin-top: 20px; padding-top: 10px; }}
  </style>
</head>
<body>
  <div class="header"><h1>WASH &amp; FOLD</h1><p>OFFICIAL RECEIPT</p></div>
  <div class="row"><span>Order ID:</span> <span>#{id}</span></div>
  <div class="row"><span>Customer:</span> <span>{customer}</span></div>
  <div class="row"><span>Service:</span> <span>{service}</span></div>
  <div class="row"><span>Date:</span> <span>{date}</span></div>
  <div class="row total"><span>Total Amount:</span> <span>{amount}</span></div>
  <p><strong>Notes:</strong><br>{notes}</p>
  <script>window.onload = () => {{ window.print(); window.close(); }}</script>
</body>
</html>
"#,
        id = escape(&order.id),
        customer = escape(&order.customer_name),
        service = escape(&order.service_type),
        date = escape(&order.date),
        amount = escape(&order.amount),
        notes = escape(&order.notes),
    )
}
