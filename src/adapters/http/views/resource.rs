//! Resource forms and the comments page.

use axum::response::Html;

use crate::domain::foundation::ResourceId;
use crate::domain::resource::{Resource, StatusUpdate};
use crate::domain::user::SessionUser;

use super::{error_banner, html_escape, layout};

pub fn create_page(user: &SessionUser, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Share a resource</h1>
{}
<form method="post" action="/create_post" enctype="multipart/form-data" class="card">
<label>Name <input name="name" required></label>
<label>Description <textarea name="content"></textarea></label>
<label>Image URL <input name="image_url"></label>
<label>Or upload an image <input type="file" name="image_file" accept="image/*"></label>
<label>Crowd level <input name="crowd"></label>
<label>Importance <select name="importance"><option value="">-</option><option>low</option><option>medium</option><option>high</option><option>critical</option></select></label>
<label>Queue length <input name="queue"></label>
<button type="submit">Share</button>
</form>"#,
        error_banner(error)
    );
    layout("Share a resource", Some(user), &body)
}

/// Values shown in the edit form; either the stored resource or a rejected submission.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub id: ResourceId,
    pub name: String,
    pub content: String,
    pub image_url: String,
}

impl From<&Resource> for EditForm {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name.clone(),
            content: resource.content.clone(),
            image_url: resource.image_url.clone(),
        }
    }
}

pub fn edit_page(user: &SessionUser, form: &EditForm, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Edit resource</h1>
{error}
<form method="post" action="/edit_post/{id}" class="card">
<label>Name <input name="name" value="{name}"></label>
<label>Description <textarea name="content">{content}</textarea></label>
<label>Image URL <input name="image_url" value="{image_url}"></label>
<button type="submit">Save</button>
</form>"#,
        error = error_banner(error),
        id = form.id,
        name = html_escape(&form.name),
        content = html_escape(&form.content),
        image_url = html_escape(&form.image_url),
    );
    layout("Edit resource", Some(user), &body)
}

/// Comments for a resource; the header is omitted when the resource is gone.
pub fn comments_page(
    user: &SessionUser,
    resource_id: &ResourceId,
    resource: Option<&Resource>,
    comments: &[StatusUpdate],
) -> Html<String> {
    let header = resource
        .map(|r| {
            format!(
                r#"<article class="card"><h1>{}</h1><p>{}</p></article>"#,
                html_escape(r.display_name()),
                html_escape(&r.content)
            )
        })
        .unwrap_or_else(|| "<h1>Comments</h1>".to_string());

    let list = if comments.is_empty() {
        r#"<p class="meta">No comments yet.</p>"#.to_string()
    } else {
        comments
            .iter()
            .map(|c| {
                format!(
                    r#"<div class="card"><p>{}</p><p class="meta">{}</p></div>"#,
                    html_escape(&c.status_message),
                    c.created_at.display_short()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"{header}
<form method="post" action="/comments/{resource_id}" class="card">
<label>Comment <textarea name="comment" required></textarea></label>
<button type="submit">Post comment</button>
</form>
{list}"#
    );
    layout("Comments", Some(user), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BackendUser, UserId};

    fn user() -> SessionUser {
        SessionUser::without_profile(&BackendUser {
            id: UserId::new("u-1").unwrap(),
            email: "ada@campus.edu".into(),
        })
    }

    #[test]
    fn edit_page_keeps_submitted_values() {
        let form = EditForm {
            id: ResourceId::new(),
            name: String::new(),
            content: "a \"quoted\" note".into(),
            image_url: String::new(),
        };
        let Html(page) = edit_page(&user(), &form, Some("Resource name cannot be empty"));

        assert!(page.contains("Resource name cannot be empty"));
        assert!(page.contains("a &quot;quoted&quot; note"));
        assert!(page.contains(&format!("/edit_post/{}", form.id)));
    }

    #[test]
    fn comments_page_without_resource_still_lists_comments() {
        let id = ResourceId::new();
        let comment = StatusUpdate::comment(id, "still open", UserId::new("u-2").unwrap());
        let Html(page) = comments_page(&user(), &id, None, &[comment]);

        assert!(page.contains("<h1>Comments</h1>"));
        assert!(page.contains("still open"));
    }
}
