mod requests;
mod responses;

pub use requests::{AccountForm, AnalyseForm, LoginForm, NextQuery, PageQuery, PostForm, RegisterForm};
pub use responses::{
    AccountResponse, AccountUpdated, AnalysisResponse, LoginResponse, MessageResponse,
    PaginatedResponse, PostDetail, UserPostsResponse, UserResponse,
};
