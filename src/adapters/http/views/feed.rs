//! The ranked resource feed.

use axum::response::Html;

use crate::domain::resource::{FeedEntry, StatusUpdate};
use crate::domain::user::SessionUser;

use super::{html_escape, layout};

pub fn index_page(entries: &[FeedEntry], user: Option<&SessionUser>) -> Html<String> {
    let body = if entries.is_empty() {
        r#"<p class="meta">No resources shared yet.</p>"#.to_string()
    } else {
        entries
            .iter()
            .map(|entry| feed_card(entry, user.is_some()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    layout("Campus resources", user, &format!("<h1>Campus resources</h1>\n{}", body))
}

fn feed_card(entry: &FeedEntry, signed_in: bool) -> String {
    let id = entry.id.to_string();
    let importance_class = if entry.importance_rank > 0 {
        format!(" importance-{}", entry.importance.trim().to_ascii_lowercase())
    } else {
        String::new()
    };

    let image = if entry.image_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(&entry.image_url),
            html_escape(&entry.name)
        )
    };

    let status = entry
        .latest_status
        .as_ref()
        .map(latest_status)
        .unwrap_or_default();

    let mut actions = vec![
        format!(
            r#"<button type="button" data-upvote="{id}">▲ <span class="count">{}</span></button>"#,
            entry.upvotes_count
        ),
        format!(
            r#"<a href="/comments/{id}">{} comments</a>"#,
            entry.comments_count
        ),
    ];
    if entry.can_edit {
        actions.push(format!(r#"<a href="/edit_post/{id}">Edit</a>"#));
    }
    if entry.can_delete {
        actions.push(format!(r#"<button type="button" data-delete="{id}">Delete</button>"#));
    }

    let status_form = if signed_in {
        format!(
            r#"<details><summary>Update status</summary>
<form method="post" action="/update_status/{id}">
<label>Message <input name="status_message"></label>
<label>Crowd level <input name="crowd_level"></label>
<label>Importance <select name="importance"><option value="">-</option><option>low</option><option>medium</option><option>high</option><option>critical</option></select></label>
<label>Queue length <input name="queue_length"></label>
<button type="submit">Post update</button>
</form></details>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="card{importance_class}">
<h2>{name}</h2>
<p class="meta">Shared by {author} on {created}</p>
{image}
<p>{content}</p>
{status}
<p>{actions}</p>
{status_form}
</article>"#,
        name = html_escape(&entry.name),
        author = html_escape(&entry.author_name),
        created = entry.created_at.display_short(),
        content = html_escape(&entry.content),
        actions = actions.join(" "),
    )
}

fn latest_status(status: &StatusUpdate) -> String {
    let mut parts = Vec::new();
    if !status.status_message.is_empty() {
        parts.push(html_escape(&status.status_message));
    }
    if !status.crowd_level.is_empty() {
        parts.push(format!("Crowd: {}", html_escape(&status.crowd_level)));
    }
    if !status.importance().is_empty() {
        parts.push(format!("Importance: {}", html_escape(status.importance())));
    }
    if !status.queue_length.is_empty() {
        parts.push(format!("Queue: {}", html_escape(&status.queue_length)));
    }
    if parts.is_empty() {
        return String::new();
    }
    format!(
        r#"<p class="status">{} <span class="meta">({})</span></p>"#,
        parts.join(" · "),
        status.created_at.display_short()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::{Resource, StatusFields};

    fn entry(can_edit: bool) -> FeedEntry {
        let resource = Resource::new("<Lab>", "open", "", None).unwrap();
        let status = StatusUpdate::new(
            resource.id,
            StatusFields {
                importance: "High".into(),
                ..Default::default()
            },
            None,
        );
        let mut entry = FeedEntry::new(resource, 2, 1, Some(status), None, None);
        entry.can_edit = can_edit;
        entry
    }

    #[test]
    fn renders_escaped_entry_with_counts() {
        let Html(page) = index_page(&[entry(false)], None);

        assert!(page.contains("&lt;Lab&gt;"));
        assert!(page.contains(r#"<span class="count">2</span>"#));
        assert!(page.contains("1 comments"));
        assert!(page.contains("importance-high"));
        assert!(page.contains("Campus Member"));
    }

    #[test]
    fn edit_link_only_when_permitted() {
        let Html(hidden) = index_page(&[entry(false)], None);
        let Html(shown) = index_page(&[entry(true)], None);

        assert!(!hidden.contains("/edit_post/"));
        assert!(shown.contains("/edit_post/"));
    }

    #[test]
    fn empty_feed_has_placeholder() {
        let Html(page) = index_page(&[], None);
        assert!(page.contains("No resources shared yet."));
    }
}
