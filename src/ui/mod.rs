mod dashboard;
mod home;
mod orders;
mod profile;
mod settings;

pub use dashboard::render_dashboard;
pub use home::render_home;
pub use orders::{render_order_rows, render_orders_page};
pub use profile::render_profile;
pub use settings::render_settings;

use crate::models::NoticeKind;
use crate::nav::{MobileSidebar, NavItem, SidebarController, set_active_item};
use crate::theme::ThemeManager;
use v_htmlescape::escape;

pub struct PageContext<'a> {
    pub path: &'a str,
    pub theme: &'a ThemeManager,
    pub sidebar: SidebarController,
}

pub(crate) fn esc(value: &str) -> String {
    escape(value).to_string()
}

pub(crate) fn hidden(flag: bool) -> &'static str {
    if flag { " hidden" } else { "" }
}

pub(crate) fn checked(flag: bool) -> &'static str {
    if flag { " checked" } else { "" }
}

fn render_nav(items: &[NavItem], text_hidden: bool) -> String {
    items
        .iter()
        .map(|item| {
            let mut class = String::from("nav-item flex items-center gap-3 px-4 py-3 rounded-lg");
            if item.active {
                class.push_str(" active");
            }
            if item.entry.logout {
                class.push_str(" logout");
            }
            format!(
                r#"<a href="{href}" class="{class}"><i class="fas {icon} w-5 text-center"></i><span class="nav-text{hidden}">{label}</span></a>"#,
                href = item.entry.href,
                icon = item.entry.icon,
                hidden = hidden(text_hidden),
                label = item.entry.label,
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn notice_colors() -> String {
    let entries = NoticeKind::ALL
        .into_iter()
        .map(|kind| format!("{}: '{}'", kind.as_str(), kind.color()))
        .collect::<Vec<_>>();
    format!("{{ {} }}", entries.join(", "))
}

/// Wraps page content in the shared layout. `content` goes in last so text
/// inside it is never mistaken for a placeholder.
pub fn render_layout(ctx: &PageContext<'_>, title: &str, content: &str, page_script: &str) -> String {
    let theme = ctx.theme.application();
    let sidebar = ctx.sidebar.layout();
    let nav = render_nav(&set_active_item(ctx.path), sidebar.nav_text_hidden);

    LAYOUT_HTML
        .replace("{{TITLE}}", &esc(title))
        .replace("{{DATA_THEME}}", theme.data_theme)
        .replace("{{BODY_CLASS}}", theme.body_class.unwrap_or(""))
        .replace("{{THEME_VARS}}", &theme.css_declarations())
        .replace("{{SIDEBAR_WIDTH}}", sidebar.width_class)
        .replace("{{CONTENT_MARGIN}}", sidebar.content_margin_class)
        .replace("{{EXPANDED_HIDDEN}}", hidden(sidebar.expanded_header_hidden))
        .replace("{{MINIMIZED_HIDDEN}}", hidden(sidebar.minimized_header_hidden))
        .replace("{{MOBILE_CLASS}}", MobileSidebar::default().class())
        .replace("{{NAV}}", &nav)
        .replace("{{LAYOUT_SCRIPT}}", LAYOUT_SCRIPT)
        .replace("{{NOTICE_COLORS}}", &notice_colors())
        .replace("{{PAGE_SCRIPT}}", page_script)
        .replace("{{CONTENT}}", content)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{DATA_THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} | Wash &amp; Fold</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" />
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <style>
    :root { {{THEME_VARS}} }

    body {
      min-height: 100vh;
      background: var(--bg-gradient);
      color: var(--text-primary);
      font-family: "Poppins", "Segoe UI", sans-serif;
      transition: background 300ms ease, color 300ms ease;
    }

    #sidebar { background: var(--sidebar-bg); transition: width 200ms ease, transform 200ms ease; }
    .card { background: var(--card-bg); border: 1px solid var(--border-color); border-radius: 18px; backdrop-filter: blur(10px); }
    .nav-item { color: var(--text-secondary); transition: background 150ms ease; }
    .nav-item:hover, .nav-item.active { background: rgba(255, 255, 255, 0.15); color: var(--text-primary); }
    input, select, textarea { background: var(--input-bg); color: var(--input-text); border: 1px solid var(--border-color); border-radius: 10px; padding: 10px 12px; width: 100%; }
    .primary-button { background: var(--button-bg); color: #fff; border-radius: 999px; padding: 10px 20px; font-weight: 600; }
    .secondary-button { border: 1px solid var(--border-color); border-radius: 999px; padding: 10px 20px; }
    .text-secondary { color: var(--text-secondary); }
    .status-badge { border-radius: 999px; padding: 4px 12px; font-size: 0.8rem; text-transform: capitalize; }
    .status-badge.pending { background: rgba(243, 156, 18, 0.25); }
    .status-badge.in-progress { background: rgba(52, 152, 219, 0.25); }
    .status-badge.ready { background: rgba(78, 205, 196, 0.25); }
    .status-badge.completed { background: rgba(39, 174, 96, 0.25); }
    .toggle input:checked + span { background: var(--toggle-active); }
    .notification { position: fixed; top: 20px; right: 20px; color: #fff; padding: 15px 20px; border-radius: 8px; z-index: 1000; display: flex; gap: 12px; align-items: center; max-width: 350px; font-size: 14px; animation: slideInRight 0.3s ease; }
    @keyframes slideInRight { from { transform: translateX(100%); opacity: 0; } to { transform: translateX(0); opacity: 1; } }
  </style>
</head>
<body class="{{BODY_CLASS}}">
  <button id="menu-toggle" class="lg:hidden fixed top-4 left-4 z-40 p-2 rounded-lg card" aria-label="Open menu"><i class="fas fa-bars"></i></button>
  <aside id="sidebar" class="fixed inset-y-0 left-0 z-50 {{SIDEBAR_WIDTH}} {{MOBILE_CLASS}} lg:translate-x-0 flex flex-col p-4 gap-2">
    <div id="expanded-header" class="flex items-center justify-between mb-6{{EXPANDED_HIDDEN}}">
      <span class="text-xl font-bold">Wash &amp; Fold</span>
      <button id="minimizeSidebar" class="hidden lg:block" aria-label="Collapse sidebar"><i class="fas fa-angles-left"></i></button>
      <button id="close-sidebar" class="lg:hidden" aria-label="Close menu"><i class="fas fa-xmark"></i></button>
    </div>
    <div id="minimized-header" class="flex justify-center mb-6{{MINIMIZED_HIDDEN}}">
      <button id="maximizeSidebar" aria-label="Expand sidebar"><i class="fas fa-angles-right"></i></button>
    </div>
    <nav class="flex flex-col gap-1">
        {{NAV}}
    </nav>
  </aside>
  <main id="content-area" class="{{CONTENT_MARGIN}} p-6 lg:p-10 transition-all">
{{CONTENT}}
  </main>
  <script>
{{LAYOUT_SCRIPT}}
  </script>
  <script>
{{PAGE_SCRIPT}}
  </script>
</body>
</html>
"#;

const LAYOUT_SCRIPT: &str = r#"
    const tabId = sessionStorage.getItem('tabId') || (crypto.randomUUID ? crypto.randomUUID() : String(Date.now() + Math.random()));
    sessionStorage.setItem('tabId', tabId);

    const noticeColors = {{NOTICE_COLORS}};

    const showNotification = (message, kind = 'info') => {
      document.querySelectorAll('.notification').forEach((n) => n.remove());
      const box = document.createElement('div');
      box.className = `notification notification-${kind}`;
      box.style.background = noticeColors[kind] || noticeColors.info;
      const text = document.createElement('span');
      text.textContent = message;
      const close = document.createElement('button');
      close.textContent = '×';
      close.onclick = () => box.remove();
      box.append(text, close);
      document.body.appendChild(box);
      setTimeout(() => box.remove(), 4000);
    };

    const send = async (url, body, method = 'POST') => {
      const res = await fetch(url, {
        method,
        headers: { 'Content-Type': 'application/json', 'X-Tab-Id': tabId },
        body: typeof body === 'string' ? body : JSON.stringify(body),
      });
      if (!res.ok) {
        throw new Error(await res.text());
      }
      const type = res.headers.get('content-type') || '';
      return type.includes('application/json') ? res.json() : res.text();
    };

    const applySidebar = (minimized) => {
      const sidebar = document.getElementById('sidebar');
      const content = document.getElementById('content-area');
      sidebar.classList.toggle('w-20', minimized);
      sidebar.classList.toggle('w-64', !minimized);
      content.classList.toggle('lg:ml-20', minimized);
      content.classList.toggle('lg:ml-64', !minimized);
      document.getElementById('expanded-header').classList.toggle('hidden', minimized);
      document.getElementById('minimized-header').classList.toggle('hidden', !minimized);
      document.querySelectorAll('.nav-text').forEach((el) => el.classList.toggle('hidden', minimized));
    };

    const applyTheme = (snapshot) => {
      const { state, theme } = snapshot;
      document.body.classList.toggle('dark-mode', state.darkMode);
      document.documentElement.setAttribute('data-theme', theme.dataTheme);
      theme.properties.forEach((p) => document.documentElement.style.setProperty(p.name, p.value));
      const darkToggle = document.getElementById('darkModeToggle');
      if (darkToggle) darkToggle.checked = state.darkMode;
      Object.entries(state.notifications).forEach(([key, enabled]) => {
        const toggle = document.getElementById(key);
        if (toggle) toggle.checked = enabled;
      });
      applySidebar(state.sidebarMinimized);
    };

    const events = new EventSource(`/api/settings/events?tab=${encodeURIComponent(tabId)}`);
    events.addEventListener('theme', (e) => applyTheme(JSON.parse(e.data)));

    const setMinimized = (minimized) => {
      applySidebar(minimized);
      send('/api/sidebar', { minimized }).catch((err) => showNotification(err.message, 'error'));
    };
    document.getElementById('minimizeSidebar')?.addEventListener('click', () => setMinimized(true));
    document.getElementById('maximizeSidebar')?.addEventListener('click', () => setMinimized(false));

    const sidebarEl = document.getElementById('sidebar');
    document.getElementById('menu-toggle')?.addEventListener('click', () => sidebarEl.classList.toggle('-translate-x-full'));
    document.getElementById('close-sidebar')?.addEventListener('click', () => sidebarEl.classList.add('-translate-x-full'));

    document.querySelectorAll('.nav-item.logout').forEach((item) => {
      item.addEventListener('click', (e) => {
        e.preventDefault();
        if (confirm('Are you sure you want to log out?')) {
          console.log('Logging out...');
        }
      });
    });

    document.addEventListener('keydown', (e) => {
      if (e.key === 'Escape') {
        document.querySelectorAll('.notification').forEach((n) => n.remove());
      }
    });
"#;
