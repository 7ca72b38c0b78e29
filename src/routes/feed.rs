use crate::{
    AppState,
    dto::{PageQuery, PaginatedResponse, UserPostsResponse},
    errors::ApiError,
    models::Post,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

/// GET / and GET /home
/// The paginated feed, newest first, five per page.
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Json<PaginatedResponse<Post>> {
    Json(state.posts.page(params.page))
}

/// GET /about
pub async fn about() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "title": "About",
        "description": "A small blog with a sentiment analysis playground."
    }))
}

/// GET /user/{username}
/// One user's posts, paginated like the feed.
pub async fn user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<Json<UserPostsResponse>, ApiError> {
    let user = state
        .users
        .by_username(&username)
        .ok_or(ApiError::NotFound)?;
    let posts = state.posts.page_by_author(user.id, params.page);

    Ok(Json(UserPostsResponse {
        user: user.into(),
        posts,
    }))
}
