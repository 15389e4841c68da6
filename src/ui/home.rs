use super::{PageContext, render_layout};
use crate::home::{MAX_STARS, RATING_TOPICS};

const SERVICES: [(&str, &str, &str); 4] = [
    ("Wash & Dry", "fa-soap", "Everyday loads washed, dried and ready in a day."),
    ("Wash, Dry & Fold", "fa-shirt", "Neatly folded and bagged for pickup."),
    ("Iron Only", "fa-temperature-high", "Crisp shirts and trousers, starch on request."),
    ("Dry Clean", "fa-vest", "Gentle care for formal wear and delicates."),
];

fn render_services() -> String {
    SERVICES
        .iter()
        .map(|(name, icon, blurb)| {
            format!(
                r#"<div class="service-card card p-5 cursor-pointer" tabindex="0" role="button" aria-label="Learn more about {name} service">
            <i class="fas {icon} text-2xl mb-3"></i>
            <h3 class="font-semibold">{name}</h3>
            <p class="text-secondary text-sm">{blurb}</p>
          </div>"#,
                name = super::esc(name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

fn render_rating_rows() -> String {
    RATING_TOPICS
        .iter()
        .enumerate()
        .map(|(row, topic)| {
            let stars = (1..=MAX_STARS)
                .map(|star| {
                    format!(r#"<i class="fas fa-star star cursor-pointer" data-row="{row}" data-star="{star}"></i>"#)
                })
                .collect::<String>();
            format!(
                r#"<div class="star-row flex items-center justify-between gap-4" data-row="{row}"><span>{topic}</span><span>{stars}</span></div>"#,
                topic = super::esc(topic),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

pub fn render_home(ctx: &PageContext<'_>) -> String {
    let content = HOME_HTML
        .replace("{{SERVICES}}", &render_services())
        .replace("{{RATINGS}}", &render_rating_rows());
    render_layout(ctx, "Home", &content, HOME_SCRIPT)
}

const HOME_HTML: &str = r#"    <section class="welcome-section mb-8">
      <h1 class="text-3xl font-bold">Welcome back!</h1>
      <p class="text-secondary">Fresh laundry, zero hassle.</p>
    </section>

    <section class="services-section grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4 mb-8">
          {{SERVICES}}
    </section>

    <div class="grid grid-cols-1 xl:grid-cols-2 gap-6 mb-8">
      <section class="card p-6 chart-container">
        <h2 class="text-xl font-semibold mb-4">Sales</h2>
        <div class="h-64"><canvas id="salesChart"></canvas></div>
      </section>
      <section class="card p-6 spending-chart">
        <h2 class="text-xl font-semibold mb-4">Spending by service</h2>
        <div class="h-64"><canvas id="spendingChart"></canvas></div>
      </section>
    </div>

    <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
      <section class="card p-6">
        <h2 class="text-xl font-semibold mb-4">Rate our service</h2>
        <div id="starRatingGrid" class="flex flex-col gap-3 mb-4">
          {{RATINGS}}
        </div>
        <button type="button" id="submitRating" class="primary-button">Submit Rating</button>
      </section>
      <section class="card p-6">
        <h2 class="text-xl font-semibold mb-2">Become a member</h2>
        <p class="text-secondary mb-4">Priority pickup and member pricing on every load.</p>
        <button type="button" id="openMembership" class="primary-button">Join Now</button>
      </section>
    </div>

    <div id="membershipModal" class="modal hidden fixed inset-0 z-50 bg-black/60 flex items-center justify-center p-4">
      <form id="membershipForm" class="card p-8 w-full max-w-md flex flex-col gap-4">
        <h2 class="text-2xl font-bold">Membership</h2>
        <label>Full name<input name="fullName" required /></label>
        <label>Contact number<input name="contactNumber" required /></label>
        <label>Email<input name="email" type="email" /></label>
        <label>Plan
          <select name="plan"><option>Basic</option><option>Premium</option></select>
        </label>
        <div class="flex gap-3 justify-end">
          <button type="button" class="secondary-button" id="closeMembership">Cancel</button>
          <button type="submit" class="primary-button">Apply</button>
        </div>
      </form>
    </div>"#;

const HOME_SCRIPT: &str = r#"
    const ratings = [0, 0, 0, 0, 0];
    const paintRow = (row, value, hover) => {
      document.querySelectorAll(`.star[data-row="${row}"]`).forEach((star, i) => {
        star.style.color = i < value ? (hover ? '#f39c12' : '#f1c40f') : '#7f8c8d';
      });
    };
    document.querySelectorAll('.star').forEach((star) => {
      const row = Number(star.dataset.row);
      const value = Number(star.dataset.star);
      star.addEventListener('click', () => { ratings[row] = value; paintRow(row, value, false); });
      star.addEventListener('mouseenter', () => paintRow(row, value, true));
    });
    document.querySelectorAll('.star-row').forEach((rowEl) => {
      const row = Number(rowEl.dataset.row);
      rowEl.addEventListener('mouseleave', () => paintRow(row, ratings[row], false));
      paintRow(row, 0, false);
    });
    document.getElementById('submitRating').addEventListener('click', async () => {
      try {
        const notice = await send('/api/ratings', { ratings });
        alert(notice.message);
        ratings.fill(0);
        ratings.forEach((_, row) => paintRow(row, 0, false));
      } catch (err) {
        alert(err.message);
      }
    });

    const membershipModal = document.getElementById('membershipModal');
    const closeMembership = () => {
      membershipModal.classList.add('hidden');
      document.getElementById('membershipForm').reset();
    };
    document.getElementById('openMembership').addEventListener('click', () => membershipModal.classList.remove('hidden'));
    document.getElementById('closeMembership').addEventListener('click', closeMembership);
    membershipModal.addEventListener('click', (e) => { if (e.target === membershipModal) closeMembership(); });
    document.addEventListener('keydown', (e) => { if (e.key === 'Escape') closeMembership(); });
    document.getElementById('membershipForm').addEventListener('submit', async (e) => {
      e.preventDefault();
      const data = Object.fromEntries(new FormData(e.target));
      try {
        const notice = await send('/api/membership', data);
        closeMembership();
        showNotification(notice.message, notice.kind);
      } catch (err) {
        alert(err.message);
      }
    });

    const mountChart = async (canvasId, name) => {
      const canvas = document.getElementById(canvasId);
      if (!canvas || typeof Chart === 'undefined') return;
      const res = await fetch(`/api/charts/${name}`);
      new Chart(canvas, await res.json());
    };
    mountChart('salesChart', 'home-sales');
    mountChart('spendingChart', 'home-spending');
"#;
