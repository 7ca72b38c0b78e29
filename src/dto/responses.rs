use crate::models::{Post, User};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// One-shot notification shown after a mutation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Where the client should navigate next: the preserved `?next=` path,
    /// or the home feed.
    pub redirect: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: UserResponse,
    /// URL of the avatar under the static tree.
    pub image_file: String,
}

#[derive(Debug, Serialize)]
pub struct AccountUpdated {
    pub message: String,
    pub user: UserResponse,
    pub image_file: String,
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub message: String,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct UserPostsResponse {
    pub user: UserResponse,
    pub posts: PaginatedResponse<Post>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub received_text: String,
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    /// Wall-clock seconds the scoring call took.
    pub elapsed_seconds: f64,
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}
