//! Account pages: login, registration, profile, admin, about.

use axum::response::Html;

use crate::domain::resource::Resource;
use crate::domain::user::SessionUser;

use super::{error_banner, html_escape, layout};

pub fn login_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Log in</h1>
{}
<form method="post" action="/login" class="card">
<label>Email <input type="email" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/register">Register</a></p>"#,
        error_banner(error)
    );
    layout("Log in", None, &body)
}

pub fn register_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Register</h1>
{}
<form method="post" action="/register" class="card">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required minlength="6"></label>
<label>Full name <input name="full_name" required></label>
<label>Role <select name="role"><option value="student">Student</option><option value="faculty">Faculty</option><option value="admin">Admin</option></select></label>
<label>Student ID <input name="student_id"></label>
<label>Faculty ID <input name="faculty_id"></label>
<label>Department <input name="department"></label>
<button type="submit">Create account</button>
</form>"#,
        error_banner(error)
    );
    layout("Register", None, &body)
}

/// The user's details and their own resources, newest first.
pub fn profile_page(user: &SessionUser, resources: &[Resource]) -> Html<String> {
    let mut details = vec![
        format!("<li>Email: {}</li>", html_escape(&user.email)),
        format!("<li>Role: {}</li>", user.role),
    ];
    for (label, value) in [
        ("Student ID", &user.student_id),
        ("Faculty ID", &user.faculty_id),
        ("Department", &user.department),
    ] {
        if !value.is_empty() {
            details.push(format!("<li>{}: {}</li>", label, html_escape(value)));
        }
    }

    let posts = if resources.is_empty() {
        r#"<p class="meta">You have not shared any resources yet.</p>"#.to_string()
    } else {
        resources
            .iter()
            .map(|r| {
                format!(
                    r#"<article class="card"><h3>{}</h3><p>{}</p><p class="meta">{} · <a href="/edit_post/{}">Edit</a></p></article>"#,
                    html_escape(r.display_name()),
                    html_escape(&r.content),
                    r.created_at.display_short(),
                    r.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        "<h1>{}</h1>\n<ul>{}</ul>\n<h2>My resources</h2>\n{}",
        html_escape(user.display_name()),
        details.join(""),
        posts
    );
    layout("Profile", Some(user), &body)
}

pub fn admin_page(user: &SessionUser) -> Html<String> {
    let body = format!(
        "<h1>Administration</h1>\n<p>Signed in as {}.</p>",
        html_escape(&user.email)
    );
    layout("Admin", Some(user), &body)
}

pub fn about_page(user: Option<&SessionUser>) -> Html<String> {
    layout(
        "About",
        user,
        "<h1>About Campus Share</h1>\n<p>Students and faculty share campus resources \
         and keep each other posted on how busy they are, how important they are right \
         now and how long the queue is.</p>",
    )
}
