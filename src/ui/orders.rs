use super::{PageContext, esc, render_layout};
use crate::models::OrderStatus;
use crate::orders::OrderStore;

pub fn render_order_rows(store: &OrderStore) -> String {
    store
        .newest_first()
        .map(|order| {
            format!(
                r#"<tr class="hover:bg-white/5 transition duration-150 group" data-status="{status}">
              <td class="py-5 px-2 font-bold text-secondary">#{id}</td>
              <td class="py-5 px-2 font-medium">{customer}</td>
              <td class="py-5 px-2 opacity-80">{service}</td>
              <td class="py-5 px-2"><span class="status-badge {status}">{label}</span></td>
              <td class="py-5 px-2 text-center">
                <button type="button" class="view-order text-secondary opacity-50 group-hover:opacity-100 transition" data-order-id="{id}" aria-label="View order {id}">
                  <i class="fas fa-eye text-lg"></i>
                </button>
              </td>
            </tr>"#,
                status = order.status,
                id = esc(&order.id),
                customer = esc(&order.customer_name),
                service = esc(&order.service_type),
                label = order.status.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ")
}

pub fn render_orders_page(ctx: &PageContext<'_>, store: &OrderStore) -> String {
    let summary = store.summary();
    let mut content = ORDERS_HTML.to_string();
    for status in OrderStatus::ALL {
        content = content.replace(
            &format!("{{{{COUNT_{}}}}}", status.as_str()),
            &summary.count(status).to_string(),
        );
    }
    let content = content
        .replace("{{TOTAL}}", &store.len().to_string())
        .replace("{{ROWS}}", &render_order_rows(store));

    render_layout(ctx, "Orders", &content, ORDERS_SCRIPT)
}

const ORDERS_HTML: &str = r#"    <header class="flex flex-wrap items-center justify-between gap-4 mb-8">
      <div>
        <h1 class="text-3xl font-bold">Orders</h1>
        <p class="text-secondary">{{TOTAL}} orders in this session</p>
      </div>
      <button type="button" class="new-order-btn primary-button"><i class="fas fa-plus mr-2"></i>New Order</button>
    </header>

    <section class="grid grid-cols-2 lg:grid-cols-4 gap-4 mb-8">
      <div class="card p-5"><p class="text-secondary text-sm">Pending</p><p id="count-pending" class="text-3xl font-bold">{{COUNT_pending}}</p></div>
      <div class="card p-5"><p class="text-secondary text-sm">In Progress</p><p id="count-in-progress" class="text-3xl font-bold">{{COUNT_in-progress}}</p></div>
      <div class="card p-5"><p class="text-secondary text-sm">Ready</p><p id="count-ready" class="text-3xl font-bold">{{COUNT_ready}}</p></div>
      <div class="card p-5"><p class="text-secondary text-sm">Completed</p><p id="count-completed" class="text-3xl font-bold">{{COUNT_completed}}</p></div>
    </section>

    <section class="card p-6 overflow-x-auto">
      <table class="w-full text-left">
        <thead>
          <tr class="text-secondary text-sm uppercase">
            <th class="py-3 px-2">Order</th>
            <th class="py-3 px-2">Customer</th>
            <th class="py-3 px-2">Service</th>
            <th class="py-3 px-2">Status</th>
            <th class="py-3 px-2 text-center">View</th>
          </tr>
        </thead>
        <tbody id="ordersTableBody">
            {{ROWS}}
        </tbody>
      </table>
    </section>

    <div id="orderModal" class="hidden fixed inset-0 z-50 bg-black/60 flex items-center justify-center p-4" role="dialog" aria-modal="true" aria-labelledby="modalOrderId">
      <div class="card p-8 w-full max-w-lg">
        <div class="flex items-center justify-between mb-6">
          <h2 id="modalOrderId" class="text-2xl font-bold"></h2>
          <span id="modalStatus" class="status-badge"></span>
        </div>
        <dl class="grid grid-cols-2 gap-4 mb-6">
          <dt class="text-secondary">Customer</dt><dd id="modalCustomerName"></dd>
          <dt class="text-secondary">Service</dt><dd id="modalServiceType"></dd>
          <dt class="text-secondary">Date</dt><dd id="modalDate"></dd>
          <dt class="text-secondary">Estimated</dt><dd id="modalEstimated"></dd>
          <dt class="text-secondary">Amount</dt><dd id="modalAmount"></dd>
        </dl>
        <p class="text-secondary mb-1">Notes</p>
        <p id="modalNotes" class="mb-6"></p>
        <div class="flex flex-wrap gap-3 justify-end">
          <button type="button" class="secondary-button" id="closeOrderModal">Close</button>
          <button type="button" class="secondary-button" id="updateStatusButton">Update Status</button>
          <button type="button" class="primary-button" id="printReceiptButton"><i class="fas fa-print mr-2"></i>Print Receipt</button>
        </div>
      </div>
    </div>

    <div id="newOrderModal" class="hidden fixed inset-0 z-50 bg-black/60 flex items-center justify-center p-4" role="dialog" aria-modal="true">
      <form id="newOrderForm" method="post" action="/orders/new" class="card p-8 w-full max-w-lg flex flex-col gap-4">
        <h2 class="text-2xl font-bold">New Order</h2>
        <label>Customer name<input id="newCustomerName" name="customerName" required /></label>
        <label>Service
          <select id="newServiceType" name="serviceType">
            <option>Wash &amp; Dry</option>
            <option>Wash, Dry &amp; Fold</option>
            <option>Iron Only</option>
            <option>Dry Clean</option>
            <option>Full Service</option>
          </select>
        </label>
        <label>Weight (kg)<input id="newWeight" name="weight" type="number" min="0" step="0.1" placeholder="0.0" /></label>
        <label>Notes<textarea id="newNotes" name="notes" rows="3"></textarea></label>
        <div class="flex gap-3 justify-end">
          <button type="button" class="secondary-button" id="cancelNewOrder">Cancel</button>
          <button type="submit" class="primary-button">Create Order</button>
        </div>
      </form>
    </div>"#;

const ORDERS_SCRIPT: &str = r#"
    const orderModal = document.getElementById('orderModal');
    const newOrderModal = document.getElementById('newOrderModal');
    let currentOrderId = null;

    const openOrderModal = async (orderId) => {
      const res = await fetch(`/api/orders/${encodeURIComponent(orderId)}`);
      if (!res.ok) {
        console.warn(`order ${orderId} not found`);
        return;
      }
      const view = await res.json();
      currentOrderId = orderId;
      document.getElementById('modalOrderId').textContent = view.orderId;
      document.getElementById('modalCustomerName').textContent = view.customerName;
      document.getElementById('modalServiceType').textContent = view.serviceType;
      document.getElementById('modalDate').textContent = view.date;
      document.getElementById('modalEstimated').textContent = view.estimated;
      document.getElementById('modalAmount').textContent = view.amount;
      document.getElementById('modalNotes').textContent = view.notes;
      const statusEl = document.getElementById('modalStatus');
      statusEl.textContent = view.statusText;
      statusEl.className = view.statusClass;
      document.getElementById('printReceiptButton').onclick = () => window.open(view.receiptUrl, '_blank');
      orderModal.classList.remove('hidden');
    };

    const closeOrderModal = () => orderModal.classList.add('hidden');

    const promptUpdateStatus = async () => {
      if (!currentOrderId) return;
      const current = document.getElementById('modalStatus').textContent.toLowerCase();
      const next = prompt(`Enter new status for ${currentOrderId}:\n(pending, in-progress, ready, completed)`, current);
      if (!next) return;
      try {
        await send(`/api/orders/${encodeURIComponent(currentOrderId)}/status`, { status: next });
        alert(`Order ${currentOrderId} updated to ${next.toUpperCase()}`);
        window.location.reload();
      } catch (err) {
        alert(err.message);
      }
    };

    document.querySelectorAll('.view-order').forEach((button) => {
      button.addEventListener('click', () => openOrderModal(button.dataset.orderId));
    });
    document.getElementById('closeOrderModal').addEventListener('click', closeOrderModal);
    document.getElementById('updateStatusButton').addEventListener('click', promptUpdateStatus);
    document.querySelector('.new-order-btn').addEventListener('click', () => newOrderModal.classList.toggle('hidden'));
    document.getElementById('cancelNewOrder').addEventListener('click', () => newOrderModal.classList.add('hidden'));
    document.getElementById('newOrderForm').addEventListener('submit', async (e) => {
      e.preventDefault();
      try {
        const order = await send('/api/orders', Object.fromEntries(new FormData(e.target)));
        alert(`Order ${order.id} created successfully!`);
        window.location.reload();
      } catch (err) {
        alert(err.message);
      }
    });
"#;
