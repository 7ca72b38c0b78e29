use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Validate, Deserialize)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 100, message = "Password must be 8-100 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Username/email portion of the account form; the avatar arrives as a
/// separate multipart file part.
#[derive(Debug, Validate)]
pub struct AccountForm {
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct PostForm {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct AnalyseForm {
    #[validate(length(min = 1, message = "Enter some text to analyse"))]
    pub rawtext: String,
}

/// Pagination query parameter; the page size itself is fixed at 5.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// `?next=` on the login route: where to send the caller after a
/// successful login.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}
