use crate::{
    AppState,
    auth::{CurrentUser, OptionalUser, clear_session_cookie, create_token, session_cookie},
    dto::{
        AccountForm, AccountResponse, AccountUpdated, LoginForm, LoginResponse, MessageResponse,
        NextQuery, RegisterForm, UserResponse,
    },
    errors::ApiError,
    forms,
    uploads,
};
use axum::{
    Json,
    extract::{Form, Multipart, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::info;
use validator::Validate;

/// GET /register
/// Already-authenticated callers are sent back to the feed.
pub async fn register_page(OptionalUser(user): OptionalUser) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }
    Json(serde_json::json!({ "title": "Register" })).into_response()
}

/// POST /register
/// Body: username, email, password, confirm_password (form-encoded)
pub async fn register(
    State(state): State<AppState>,
    OptionalUser(current): OptionalUser,
    Form(payload): Form<RegisterForm>,
) -> Result<Response, ApiError> {
    if current.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    let mut errors = forms::validate(&payload);
    // Uniqueness is re-checked at submission time, not just at render time.
    if state.users.by_username(&payload.username).is_some() {
        errors.push("username", forms::USERNAME_TAKEN);
    }
    if state.users.by_email(&payload.email).is_some() {
        errors.push("email", forms::EMAIL_TAKEN);
    }
    errors.into_result()?;

    let hashed_password = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))?;

    // A concurrent registration can still win the race; the store re-checks.
    let user = state
        .users
        .create(&payload.username, &payload.email, hashed_password)
        .map_err(ApiError::from)?;

    info!("New user registered: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Your account has been created! You are now able to log in".to_string(),
        }),
    )
        .into_response())
}

/// GET /login
pub async fn login_page(OptionalUser(user): OptionalUser) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }
    Json(serde_json::json!({ "title": "Login" })).into_response()
}

/// POST /login?next=/some/path
/// Body: email, password, remember (form-encoded)
pub async fn login(
    State(state): State<AppState>,
    OptionalUser(current): OptionalUser,
    Query(query): Query<NextQuery>,
    Form(payload): Form<LoginForm>,
) -> Result<Response, ApiError> {
    if current.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.into()))?;

    // Unknown email and wrong password fall through to the same error.
    let user = state
        .users
        .by_email(&payload.email)
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify(&payload.password, &user.hashed_password)
        .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(
        &user.id,
        &user.email,
        &state.config.jwt_secret,
        payload.remember,
    )?;
    let cookie = session_cookie(&token, payload.remember);

    info!("User logged in: {}", user.email);

    let redirect = query.next.unwrap_or_else(|| "/home".to_string());
    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(LoginResponse {
            redirect,
            user: user.into(),
        }),
    )
        .into_response())
}

/// GET /logout
/// Clears the session unconditionally.
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie().to_string())],
        Redirect::to("/home"),
    )
}

/// GET /account
/// Headers: session cookie or Bearer token
pub async fn account(CurrentUser(user): CurrentUser) -> Json<AccountResponse> {
    let image_file = format!("/static/profile_pics/{}", user.avatar);
    Json(AccountResponse {
        user: user.into(),
        image_file,
    })
}

/// POST /account
/// Multipart body: username, email, optional picture file.
pub async fn update_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<AccountUpdated>, ApiError> {
    let mut username = String::new();
    let mut email = String::new();
    let mut picture: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InternalError(format!("Reading form failed: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => {
                username = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InternalError(format!("Reading form failed: {}", e)))?;
            }
            "email" => {
                email = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InternalError(format!("Reading form failed: {}", e)))?;
            }
            "picture" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InternalError(format!("Reading file failed: {}", e)))?;
                if !file_name.is_empty() && !data.is_empty() {
                    picture = Some((file_name, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    let form = AccountForm { username, email };
    let mut errors = forms::validate(&form);
    if state
        .users
        .by_username(&form.username)
        .is_some_and(|other| other.id != user.id)
    {
        errors.push("username", forms::USERNAME_TAKEN);
    }
    if state
        .users
        .by_email(&form.email)
        .is_some_and(|other| other.id != user.id)
    {
        errors.push("email", forms::EMAIL_TAKEN);
    }
    errors.into_result()?;

    let avatar = match picture {
        Some((file_name, data)) => Some(uploads::save_avatar(
            &state.config.avatar_dir,
            &file_name,
            &data,
        )?),
        None => None,
    };

    let updated = state
        .users
        .update_profile(user.id, &form.username, &form.email, avatar)
        .map_err(ApiError::from)?;

    info!("Account updated: {}", updated.email);

    let image_file = format!("/static/profile_pics/{}", updated.avatar);
    Ok(Json(AccountUpdated {
        message: "Your account has been updated!".to_string(),
        user: UserResponse::from(updated),
        image_file,
    }))
}
