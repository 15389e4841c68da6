use super::{PageContext, checked, render_layout};
use crate::theme::NotificationCategory;

fn render_notification_toggles(ctx: &PageContext<'_>) -> String {
    NotificationCategory::ALL
        .into_iter()
        .map(|category| {
            format!(
                r#"<label class="toggle flex items-center justify-between py-3">
            <span>{label}</span>
            <input type="checkbox" id="{key}" class="notification-toggle"{checked} />
          </label>"#,
                label = category.label(),
                key = category.key(),
                checked = checked(ctx.theme.state().notification(category)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

pub fn render_settings(ctx: &PageContext<'_>) -> String {
    let content = SETTINGS_HTML
        .replace("{{DARK_CHECKED}}", checked(ctx.theme.is_dark()))
        .replace("{{NOTIFICATIONS}}", &render_notification_toggles(ctx));
    render_layout(ctx, "Settings", &content, SETTINGS_SCRIPT)
}

const SETTINGS_HTML: &str = r#"    <header class="mb-8">
      <h1 class="text-3xl font-bold">Settings</h1>
      <p class="text-secondary">Preferences are shared by every open tab.</p>
    </header>

    <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
      <section class="card p-6">
        <h2 class="text-xl font-semibold mb-4">Appearance</h2>
        <label class="toggle flex items-center justify-between py-3">
          <span>Dark mode <span class="text-secondary text-sm">(Ctrl+D)</span></span>
          <input type="checkbox" id="darkModeToggle"{{DARK_CHECKED}} />
        </label>
      </section>

      <section class="card p-6">
        <h2 class="text-xl font-semibold mb-4">Notifications</h2>
          {{NOTIFICATIONS}}
      </section>

      <section class="card p-6">
        <h2 class="text-xl font-semibold mb-4">Backup</h2>
        <div class="flex flex-wrap gap-3">
          <a href="/api/settings/export" class="primary-button" download="settings.json">Export Settings</a>
          <label class="secondary-button cursor-pointer">Import Settings<input type="file" id="importSettings" accept="application/json" class="hidden" /></label>
        </div>
      </section>

      <section class="card p-6">
        <h2 class="text-xl font-semibold mb-4">Feedback</h2>
        <form id="feedbackForm" class="flex flex-col gap-4">
          <input id="feedbackName" name="name" placeholder="Your name" />
          <textarea id="feedbackMessage" name="message" rows="4" placeholder="Tell us how we are doing"></textarea>
          <button type="submit" class="primary-button self-end">Send Feedback</button>
        </form>
      </section>
    </div>"#;

const SETTINGS_SCRIPT: &str = r#"
    const darkModeToggle = document.getElementById('darkModeToggle');

    const toggleDarkMode = async (enabled) => {
      try {
        const snapshot = await send('/api/settings/dark-mode', { enabled });
        applyTheme(snapshot);
        showNotification(`${enabled ? 'Dark' : 'Light'} mode activated`, 'success');
      } catch (err) {
        darkModeToggle.checked = !enabled;
        showNotification(err.message, 'error');
      }
    };

    darkModeToggle.addEventListener('change', () => toggleDarkMode(darkModeToggle.checked));

    document.querySelectorAll('.notification-toggle').forEach((toggle) => {
      toggle.addEventListener('change', async () => {
        try {
          const notice = await send(`/api/settings/notifications/${toggle.id}`, { enabled: toggle.checked });
          showNotification(notice.message, notice.kind);
        } catch (err) {
          toggle.checked = !toggle.checked;
          showNotification(err.message, 'error');
        }
      });
    });

    document.addEventListener('keydown', (e) => {
      if ((e.ctrlKey || e.metaKey) && e.key === 'd') {
        e.preventDefault();
        darkModeToggle.checked = !darkModeToggle.checked;
        toggleDarkMode(darkModeToggle.checked);
      }
    });

    document.getElementById('importSettings').addEventListener('change', async (e) => {
      const file = e.target.files[0];
      if (!file) return;
      try {
        const result = await send('/api/settings/import', await file.text());
        applyTheme(result.snapshot);
        showNotification(result.notice.message, result.notice.kind);
      } catch (err) {
        console.error('Import error:', err);
        showNotification(err.message, 'error');
      }
      e.target.value = '';
    });

    document.getElementById('feedbackForm').addEventListener('submit', async (e) => {
      e.preventDefault();
      try {
        const notice = await send('/api/feedback', Object.fromEntries(new FormData(e.target)));
        showNotification(notice.message, notice.kind);
        e.target.reset();
      } catch (err) {
        showNotification(err.message, 'error');
      }
    });
"#;
