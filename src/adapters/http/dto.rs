//! Request and response shapes for the HTML forms and JSON endpoints.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::{Deserialize, Serialize};

use crate::application::handlers::resource::{CreateResourceCommand, ImageUpload};
use crate::application::handlers::upvote::ToggleUpvoteResult;
use crate::domain::foundation::UserId;
use crate::domain::resource::{ResourceDetails, StatusFields};

// ════════════════════════════════════════════════════════════════════════════════
// Account forms
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /login`. `username` carries the email address.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub faculty_id: String,
    #[serde(default)]
    pub department: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Resource forms
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /update_status/:id`. `chips_available` is the legacy name of `importance`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatusForm {
    pub status_message: String,
    pub crowd_level: String,
    pub importance: String,
    pub chips_available: String,
    pub queue_length: String,
}

impl From<UpdateStatusForm> for StatusFields {
    fn from(form: UpdateStatusForm) -> Self {
        StatusFields {
            status_message: form.status_message,
            crowd_level: form.crowd_level,
            importance: first_non_empty(form.importance, form.chips_available),
            queue_length: form.queue_length,
        }
    }
}

/// `POST /edit_post/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditPostForm {
    pub name: String,
    pub content: String,
    pub image_url: String,
}

impl From<EditPostForm> for ResourceDetails {
    fn from(form: EditPostForm) -> Self {
        ResourceDetails {
            name: form.name,
            content: form.content,
            image_url: form.image_url,
        }
    }
}

/// `POST /comments/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub comment: String,
}

/// `POST /create_post`, accepted as urlencoded or multipart.
///
/// Field aliases: `title` for `name`, `description` for `content`, `chips` for
/// `importance`. `crowd` and `queue` carry the status attributes.
#[derive(Debug, Default)]
pub struct CreatePostForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image_file";

impl CreatePostForm {
    fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    fn field_or(&self, name: &str, alias: &str) -> String {
        first_non_empty(self.field(name), self.field(alias))
    }

    pub fn into_command(self, author: UserId, access_token: Option<String>) -> CreateResourceCommand {
        let status = StatusFields {
            status_message: String::new(),
            crowd_level: self.field("crowd"),
            importance: self.field_or("importance", "chips"),
            queue_length: self.field("queue"),
        };
        CreateResourceCommand {
            author,
            name: self.field_or("name", "title"),
            content: self.field_or("content", "description"),
            image_url: self.field("image_url"),
            image: self.image,
            status,
            access_token,
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field.text().await.map_err(IntoResponse::into_response)?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for CreatePostForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Self::from_multipart(multipart).await
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self {
                fields,
                image: None,
            })
        }
    }
}

fn first_non_empty(primary: String, fallback: String) -> String {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// JSON endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /upvote_resource` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpvoteRequest {
    #[serde(default)]
    pub resource_id: Option<String>,
}

/// Successful upvote toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpvoteResponse {
    pub success: bool,
    pub action: String,
    pub upvotes_count: u64,
}

impl From<ToggleUpvoteResult> for UpvoteResponse {
    fn from(result: ToggleUpvoteResult) -> Self {
        Self {
            success: true,
            action: result.action.to_string(),
            upvotes_count: result.upvotes_count,
        }
    }
}

/// `{success}` or `{success: false, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::UpvoteAction;

    fn form(pairs: &[(&str, &str)]) -> CreatePostForm {
        CreatePostForm {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image: None,
        }
    }

    fn author() -> UserId {
        UserId::new("u-1").unwrap()
    }

    #[test]
    fn create_form_prefers_primary_names() {
        let cmd = form(&[
            ("name", "Library"),
            ("title", "ignored"),
            ("content", "quiet"),
            ("importance", "high"),
            ("chips", "low"),
        ])
        .into_command(author(), None);

        assert_eq!(cmd.name, "Library");
        assert_eq!(cmd.content, "quiet");
        assert_eq!(cmd.status.importance, "high");
    }

    #[test]
    fn create_form_falls_back_to_aliases() {
        let cmd = form(&[
            ("name", ""),
            ("title", "Gym"),
            ("description", "open late"),
            ("chips", "critical"),
            ("crowd", "busy"),
            ("queue", "4"),
        ])
        .into_command(author(), Some("token".into()));

        assert_eq!(cmd.name, "Gym");
        assert_eq!(cmd.content, "open late");
        assert_eq!(cmd.status.importance, "critical");
        assert_eq!(cmd.status.crowd_level, "busy");
        assert_eq!(cmd.status.queue_length, "4");
        assert_eq!(cmd.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn status_form_maps_legacy_importance() {
        let fields: StatusFields = UpdateStatusForm {
            chips_available: "medium".into(),
            ..Default::default()
        }
        .into();
        assert_eq!(fields.importance, "medium");
    }

    #[test]
    fn upvote_response_serializes_action() {
        let response = UpvoteResponse::from(ToggleUpvoteResult {
            action: UpvoteAction::Unupvoted,
            upvotes_count: 3,
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["action"], "unupvoted");
        assert_eq!(json["upvotes_count"], 3);
    }

    #[test]
    fn failed_action_carries_error() {
        let json = serde_json::to_value(ActionResponse::failed("Not found")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "Not found"}));

        let json = serde_json::to_value(ActionResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
    }
}
