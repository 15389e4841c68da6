use super::{PageContext, esc, render_layout};
use crate::profile::PersonalInfo;

pub fn render_profile(ctx: &PageContext<'_>, info: &PersonalInfo) -> String {
    // Content goes in as one piece so field values are never re-scanned for placeholders.
    let content = format!(
        r#"    <header class="flex flex-wrap items-center gap-6 mb-8">
      <div class="profile-picture w-24 h-24 rounded-full card flex items-center justify-center text-4xl cursor-pointer" title="Click to change profile picture"><i class="fas fa-user"></i></div>
      <div>
        <h1 class="text-3xl font-bold">{display_name}</h1>
        <p class="text-secondary">{email}</p>
      </div>
      <button type="button" class="edit-profile-btn secondary-button ml-auto">Edit Profile</button>
    </header>

    <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
      <form id="personalInfoForm" class="card p-6 flex flex-col gap-4">
        <h2 class="text-xl font-semibold">Personal Information</h2>
        <label>First name<input id="firstName" name="firstName" value="{first_name}" required /></label>
        <label>Last name<input id="lastName" name="lastName" value="{last_name}" required /></label>
        <label>Display name<input id="displayName" name="displayName" value="{display_name}" required /></label>
        <label>Email<input id="email" name="email" type="email" value="{email}" required /></label>
        <label>Address<input id="address" name="address" value="{address}" required /></label>
        <label>Phone number<input id="phoneNumber" name="phoneNumber" value="{phone}" required /></label>
        <button type="submit" class="primary-button self-end">Save Changes</button>
      </form>

      <form id="passwordForm" class="card p-6 flex flex-col gap-4">
        <h2 class="text-xl font-semibold">Change Password</h2>
        <label>Current password<input name="currentPassword" type="password" autocomplete="current-password" /></label>
        <label>New password<input name="newPassword" type="password" autocomplete="new-password" /></label>
        <label>Confirm password<input name="confirmPassword" type="password" autocomplete="new-password" /></label>
        <button type="submit" class="primary-button self-end">Update Password</button>
      </form>
    </div>"#,
        first_name = esc(&info.first_name),
        last_name = esc(&info.last_name),
        display_name = esc(&info.display_name),
        email = esc(&info.email),
        address = esc(&info.address),
        phone = esc(&info.phone_number),
    );

    render_layout(ctx, "Profile", &content, PROFILE_SCRIPT)
}

const PROFILE_SCRIPT: &str = r#"
    const formJson = (form) => Object.fromEntries(new FormData(form));

    document.getElementById('personalInfoForm').addEventListener('submit', async (e) => {
      e.preventDefault();
      try {
        const notice = await send('/api/profile', formJson(e.target));
        alert(notice.message);
      } catch (err) {
        alert(err.message);
      }
    });

    document.getElementById('passwordForm').addEventListener('submit', async (e) => {
      e.preventDefault();
      try {
        const notice = await send('/api/profile/password', formJson(e.target));
        alert(notice.message);
        e.target.reset();
      } catch (err) {
        alert(err.message);
      }
    });

    const firstNameInput = document.getElementById('firstName');
    const lastNameInput = document.getElementById('lastName');
    const displayNameInput = document.getElementById('displayName');
    const updateDisplayName = () => {
      const first = firstNameInput.value.trim();
      const last = lastNameInput.value.trim();
      if (first && last) {
        const parts = first.split(/\s+/);
        displayNameInput.value = `${parts[parts.length - 1]} ${last}`;
      }
    };
    firstNameInput.addEventListener('input', updateDisplayName);
    lastNameInput.addEventListener('input', updateDisplayName);

    document.querySelector('.edit-profile-btn').addEventListener('click', () => {
      firstNameInput.focus();
      firstNameInput.select();
    });

    document.querySelectorAll('input[required]').forEach((input) => {
      input.addEventListener('blur', () => {
        input.style.borderColor = input.value.trim() === '' ? 'rgba(255, 100, 100, 0.5)' : '';
      });
    });
"#;
