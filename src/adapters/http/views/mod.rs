//! Server-rendered HTML.
//!
//! Pages are plain functions returning escaped markup. Every value that came from
//! a user or the backend goes through [`html_escape`].

mod account;
mod feed;
mod resource;

pub use account::{about_page, admin_page, login_page, profile_page, register_page};
pub use feed::index_page;
pub use resource::{comments_page, create_page, edit_page, EditForm};

use axum::response::Html;

use crate::domain::user::SessionUser;

/// Escapes text for use in element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wraps a page body in the shared document shell and navigation.
fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> Html<String> {
    let nav = match user {
        Some(user) => {
            let admin = if user.is_admin {
                r#"<a href="/admin">Admin</a>"#
            } else {
                ""
            };
            format!(
                r#"<a href="/create_post">Share a resource</a> <a href="/profile">{}</a> {} <a href="/logout">Log out</a>"#,
                html_escape(user.display_name()),
                admin
            )
        }
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Campus Share</title>
<style>{css}</style>
</head>
<body>
<header><a class="brand" href="/">Campus Share</a> <a href="/about">About</a> <nav>{nav}</nav></header>
<main>
{body}
</main>
<script>{script}</script>
</body>
</html>"#,
        title = html_escape(title),
        css = CSS,
        nav = nav,
        body = body,
        script = SCRIPT,
    ))
}

/// Error banner, or nothing.
fn error_banner(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, html_escape(e)))
        .unwrap_or_default()
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; gap: 1rem; align-items: center; padding: 0.75rem 1.5rem; background: #1e3a8a; }
header a { color: #fff; text-decoration: none; }
header nav { margin-left: auto; display: flex; gap: 0.75rem; }
.brand { font-weight: 700; }
main { max-width: 48rem; margin: 1.5rem auto; padding: 0 1rem; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }
.card img { max-width: 100%; border-radius: 0.25rem; }
.meta { color: #6b7280; font-size: 0.875rem; }
.importance-critical { border-left: 4px solid #dc2626; }
.importance-high { border-left: 4px solid #ea580c; }
.importance-medium { border-left: 4px solid #ca8a04; }
.importance-low { border-left: 4px solid #16a34a; }
.error { color: #b91c1c; }
form.inline { display: inline; }
label { display: block; margin-top: 0.5rem; }
"#;

const SCRIPT: &str = r#"
async function postJson(url, body) {
  const res = await fetch(url, { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body || {}) });
  return res.json();
}
document.querySelectorAll('[data-upvote]').forEach(btn => btn.addEventListener('click', async () => {
  const data = await postJson('/upvote_resource', { resource_id: btn.dataset.upvote });
  if (data.success) { btn.querySelector('.count').textContent = data.upvotes_count; btn.classList.toggle('active', data.action === 'upvoted'); }
  else { alert(data.error); }
}));
document.querySelectorAll('[data-delete]').forEach(btn => btn.addEventListener('click', async () => {
  if (!confirm('Delete this resource?')) return;
  const data = await postJson('/delete_resource/' + btn.dataset.delete);
  if (data.success) { btn.closest('.card').remove(); } else { alert(data.error); }
}));
"#;
