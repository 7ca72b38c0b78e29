use crate::{
    AppState,
    auth::CurrentUser,
    dto::{MessageResponse, PostDetail, PostForm},
    errors::ApiError,
    forms,
    models::Post,
};
use axum::{
    Json,
    extract::{Form, Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

/// GET /post/new
pub async fn new_post_page(CurrentUser(_user): CurrentUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "title": "New Post" }))
}

/// POST /post/new
/// Body: title, content (form-encoded)
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(payload): Form<PostForm>,
) -> Result<(StatusCode, Json<PostDetail>), ApiError> {
    forms::validate(&payload).into_result()?;

    let post = state.posts.create(user.id, payload.title, payload.content);

    info!("Post created: {} by user {}", post.id, user.id);

    Ok((
        StatusCode::CREATED,
        Json(PostDetail {
            message: "Your post has been created!".to_string(),
            post,
        }),
    ))
}

/// GET /post/{id}
pub async fn show_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get(id).ok_or(ApiError::NotFound)?;
    Ok(Json(post))
}

/// GET /post/{id}/update
/// The pre-filled edit form; only the author may see it.
pub async fn edit_post_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get(id).ok_or(ApiError::NotFound)?;
    if post.author_id != user.id {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(post))
}

/// POST /post/{id}/update
pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Form(payload): Form<PostForm>,
) -> Result<Json<PostDetail>, ApiError> {
    forms::validate(&payload).into_result()?;

    let post = state
        .posts
        .update(id, user.id, payload.title, payload.content)?;

    info!("Post updated: {} by user {}", post.id, user.id);

    Ok(Json(PostDetail {
        message: "Your post has been updated!".to_string(),
        post,
    }))
}

/// POST /post/{id}/delete
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.posts.delete(id, user.id)?;

    info!("Post deleted: {} by user {}", id, user.id);

    Ok(Json(MessageResponse {
        message: "Your post has been deleted!".to_string(),
    }))
}
