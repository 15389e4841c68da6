use super::{PageContext, render_layout};
use crate::models::OrderSummary;

pub fn render_dashboard(ctx: &PageContext<'_>, summary: &OrderSummary) -> String {
    let content = DASHBOARD_HTML
        .replace("{{TOTAL}}", &summary.total().to_string())
        .replace("{{ACTIVE}}", &(summary.pending + summary.in_progress).to_string())
        .replace("{{READY}}", &summary.ready.to_string());
    render_layout(ctx, "Dashboard", &content, DASHBOARD_SCRIPT)
}

const DASHBOARD_HTML: &str = r#"    <header class="mb-8">
      <h1 class="text-3xl font-bold">Dashboard</h1>
      <p class="text-secondary">Shop activity at a glance.</p>
    </header>

    <div class="grid grid-cols-12 gap-6">
      <div class="col-span-12 xl:col-span-8 flex flex-col gap-6">
        <section class="card p-6">
          <h2 class="text-xl font-semibold mb-4">Orders per month</h2>
          <div class="h-72"><canvas id="salesChart"></canvas></div>
        </section>
        <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
          <a href="orders.html" class="quick-action card p-5 block"><p class="text-secondary text-sm">Orders this session</p><p class="text-3xl font-bold">{{TOTAL}}</p></a>
          <a href="orders.html" class="quick-action card p-5 block"><p class="text-secondary text-sm">In the machines</p><p class="text-3xl font-bold">{{ACTIVE}}</p></a>
          <a href="orders.html" class="quick-action card p-5 block"><p class="text-secondary text-sm">Ready for pickup</p><p class="text-3xl font-bold">{{READY}}</p></a>
        </section>
      </div>
      <div class="col-span-12 xl:col-span-4 flex flex-col gap-6">
        <section class="card p-6">
          <h2 class="text-xl font-semibold mb-4">Orders this month</h2>
          <div class="h-48"><canvas id="spendingChart"></canvas></div>
        </section>
        <section class="card p-6">
          <h2 class="text-xl font-semibold mb-4">Order status</h2>
          <div class="h-48"><canvas id="statusChart"></canvas></div>
        </section>
      </div>
    </div>"#;

const DASHBOARD_SCRIPT: &str = r#"
    const mountChart = async (canvasId, name) => {
      const canvas = document.getElementById(canvasId);
      if (!canvas || typeof Chart === 'undefined') {
        console.warn('Chart.js library not loaded.');
        return;
      }
      try {
        const res = await fetch(`/api/charts/${name}`);
        new Chart(canvas.getContext('2d'), await res.json());
      } catch (err) {
        console.error(`${name} chart error:`, err);
      }
    };

    mountChart('salesChart', 'dashboard-sales');
    mountChart('spendingChart', 'dashboard-orders');
    mountChart('statusChart', 'order-status');
"#;
