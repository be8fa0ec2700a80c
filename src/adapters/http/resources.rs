//! HTTP handlers for resources, status updates, comments and upvotes.

use axum::extract::{Json, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use crate::application::handlers::resource::{
    DeleteResourceCommand, LoadEditableResourceQuery, ResourceError, UpdateResourceCommand,
};
use crate::application::handlers::status::{
    AddCommentCommand, ListCommentsQuery, PostStatusCommand,
};
use crate::application::handlers::upvote::ToggleUpvoteCommand;
use crate::domain::foundation::ResourceId;

use super::dto::{
    ActionResponse, CommentForm, CreatePostForm, EditPostForm, UpdateStatusForm, UpvoteRequest,
    UpvoteResponse,
};
use super::middleware::RequireLogin;
use super::views::{self, EditForm};
use super::AppState;

fn parse_id(raw: &str) -> Option<ResourceId> {
    raw.trim().parse().ok()
}

/// POST /upvote_resource - JSON toggle
pub async fn upvote_resource(
    State(state): State<AppState>,
    login: RequireLogin,
    Json(request): Json<UpvoteRequest>,
) -> Response {
    let Some(resource_id) = request.resource_id.as_deref().and_then(parse_id) else {
        return Json(ActionResponse::failed("Invalid resource id")).into_response();
    };
    let cmd = ToggleUpvoteCommand {
        resource_id,
        user_id: login.user.user_id,
    };
    match state.toggle_upvote_handler().handle(cmd).await {
        Ok(result) => Json(UpvoteResponse::from(result)).into_response(),
        Err(e) if e.code().is_infrastructure() => {
            tracing::error!(%resource_id, error = %e, "Upvote failed");
            Json(ActionResponse::failed(e.message())).into_response()
        }
        Err(e) => {
            tracing::debug!(%resource_id, error = %e, "Upvote rejected");
            Json(ActionResponse::failed(e.message())).into_response()
        }
    }
}

/// GET /create_post
pub async fn create_post_form(login: RequireLogin) -> Html<String> {
    views::create_page(&login.user, None)
}

/// POST /create_post - urlencoded or multipart
pub async fn create_post(
    State(state): State<AppState>,
    login: RequireLogin,
    form: CreatePostForm,
) -> Response {
    let access_token = login.access_token().await;
    let cmd = form.into_command(login.user.user_id.clone(), access_token);
    match state.create_resource_handler().handle(cmd).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            if let ResourceError::CreateFailed(source) = &e {
                tracing::error!(error = %source, "Resource creation failed");
            }
            views::create_page(&login.user, Some(&e.to_string())).into_response()
        }
    }
}

/// POST /update_status/:id - always returns to the feed
pub async fn update_status(
    State(state): State<AppState>,
    login: RequireLogin,
    Path(raw_id): Path<String>,
    Form(form): Form<UpdateStatusForm>,
) -> Redirect {
    match parse_id(&raw_id) {
        Some(resource_id) => {
            let cmd = PostStatusCommand {
                resource_id,
                user_id: login.user.user_id,
                fields: form.into(),
            };
            if let Err(e) = state.post_status_handler().handle(cmd).await {
                tracing::warn!(%resource_id, error = %e, "Status update failed");
            }
        }
        None => tracing::warn!(raw_id = %raw_id, "Status update for malformed resource id"),
    }
    Redirect::to("/")
}

/// POST /delete_resource/:id - JSON result
pub async fn delete_resource(
    State(state): State<AppState>,
    login: RequireLogin,
    Path(raw_id): Path<String>,
) -> Json<ActionResponse> {
    let Some(resource_id) = parse_id(&raw_id) else {
        return Json(ActionResponse::failed(ResourceError::NotFound.to_string()));
    };
    let cmd = DeleteResourceCommand {
        resource_id,
        user: login.user,
    };
    match state.delete_resource_handler().handle(cmd).await {
        Ok(()) => Json(ActionResponse::ok()),
        Err(e) => {
            tracing::warn!(%resource_id, error = %e, "Delete failed");
            Json(ActionResponse::failed(e.to_string()))
        }
    }
}

/// GET /edit_post/:id
pub async fn edit_post_form(
    State(state): State<AppState>,
    login: RequireLogin,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(resource_id) = parse_id(&raw_id) else {
        return Redirect::to("/").into_response();
    };
    let query = LoadEditableResourceQuery {
        resource_id,
        user: login.user.clone(),
    };
    match state.edit_resource_handler().load(query).await {
        Ok(resource) => {
            views::edit_page(&login.user, &EditForm::from(&resource), None).into_response()
        }
        Err(e) => {
            tracing::debug!(%resource_id, error = %e, "Edit refused");
            Redirect::to("/").into_response()
        }
    }
}

/// POST /edit_post/:id
pub async fn edit_post(
    State(state): State<AppState>,
    login: RequireLogin,
    Path(raw_id): Path<String>,
    Form(form): Form<EditPostForm>,
) -> Response {
    let Some(resource_id) = parse_id(&raw_id) else {
        return Redirect::to("/").into_response();
    };
    let submitted = EditForm {
        id: resource_id,
        name: form.name.clone(),
        content: form.content.clone(),
        image_url: form.image_url.clone(),
    };
    let cmd = UpdateResourceCommand {
        resource_id,
        user: login.user.clone(),
        details: form.into(),
    };
    match state.edit_resource_handler().update(cmd).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e @ (ResourceError::EmptyName | ResourceError::UpdateFailed(_))) => {
            if let ResourceError::UpdateFailed(source) = &e {
                tracing::error!(%resource_id, error = %source, "Resource update failed");
            }
            views::edit_page(&login.user, &submitted, Some(&e.to_string())).into_response()
        }
        Err(e) => {
            tracing::debug!(%resource_id, error = %e, "Edit refused");
            Redirect::to("/").into_response()
        }
    }
}

/// GET /comments/:id
pub async fn comments(
    State(state): State<AppState>,
    login: RequireLogin,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(resource_id) = parse_id(&raw_id) else {
        return Redirect::to("/").into_response();
    };
    let view = state
        .list_comments_handler()
        .handle(ListCommentsQuery { resource_id })
        .await;
    views::comments_page(&login.user, &resource_id, view.resource.as_ref(), &view.comments)
        .into_response()
}

/// POST /comments/:id - back to the comments page
pub async fn add_comment(
    State(state): State<AppState>,
    login: RequireLogin,
    Path(raw_id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Redirect {
    let Some(resource_id) = parse_id(&raw_id) else {
        return Redirect::to("/");
    };
    let cmd = AddCommentCommand {
        resource_id,
        user_id: login.user.user_id,
        text: form.comment,
    };
    if let Err(e) = state.add_comment_handler().handle(cmd).await {
        tracing::warn!(%resource_id, error = %e, "Insert comment failed");
    }
    Redirect::to(&format!("/comments/{}", resource_id))
}
