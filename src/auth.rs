//! Session handling: signed tokens, the session cookie, and the request
//! extractors that hand the current identity to handlers explicitly.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{AppState, User, errors::ApiError};

pub const SESSION_COOKIE: &str = "session";

/// Default session lifetime; "remember me" stretches it to a month.
const SESSION_HOURS: i64 = 24;
const REMEMBER_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub exp: usize,
}

pub fn create_token(
    user_id: &Uuid,
    email: &str,
    secret: &str,
    remember: bool,
) -> Result<String, ApiError> {
    let lifetime = if remember {
        Duration::days(REMEMBER_DAYS)
    } else {
        Duration::hours(SESSION_HOURS)
    };
    let expiration = Utc::now()
        .checked_add_signed(lifetime)
        .ok_or_else(|| ApiError::InternalError("Failed to calculate expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalError(format!("Token creation failed: {}", e)))
}

pub fn decode_claims(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// HTTP-only cookie carrying the session token. A remembered session gets a
/// persistent cookie; otherwise it lives only as long as the browser session.
pub fn session_cookie(token: &str, remember: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_owned());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    if remember {
        cookie.set_max_age(cookie::time::Duration::days(REMEMBER_DAYS));
    }
    cookie
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(cookie::time::Duration::ZERO);
    cookie
}

/// Pull the token from the session cookie, falling back to a Bearer header
/// for non-browser clients.
fn token_from_parts(parts: &Parts) -> Option<String> {
    if let Some(value) = parts
        .headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        for cookie in Cookie::split_parse(value).flatten() {
            if cookie.name() == SESSION_COOKIE && !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
        }
    }

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    auth_header.strip_prefix("Bearer ").map(str::to_string)
}

fn authenticate(parts: &Parts, state: &AppState) -> Option<User> {
    let token = token_from_parts(parts)?;
    let claims = decode_claims(&token, &state.config.jwt_secret)?;
    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    state.users.get(user_id)
}

/// Guard for routes that require a logged-in identity. A missing or invalid
/// session is treated as anonymous and redirected to the login form with the
/// originally requested path preserved.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .map(CurrentUser)
            .ok_or_else(|| ApiError::LoginRequired {
                next: parts.uri.path().to_string(),
            })
    }
}

/// The current identity when a route behaves differently for logged-in
/// callers but stays open to everyone (register/login redirect home).
pub struct OptionalUser(pub Option<User>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(authenticate(parts, state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_through_claims() {
        let id = Uuid::new_v4();
        let token = create_token(&id, "alice@example.com", "secret", false).unwrap();

        let claims = decode_claims(&token, "secret").unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "alice@example.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let id = Uuid::new_v4();
        let token = create_token(&id, "alice@example.com", "secret", false).unwrap();
        assert!(decode_claims(&token, "other-secret").is_none());
    }

    #[test]
    fn remembered_sessions_outlive_default_ones() {
        let id = Uuid::new_v4();
        let short = create_token(&id, "a@b.c", "secret", false).unwrap();
        let long = create_token(&id, "a@b.c", "secret", true).unwrap();

        let short_exp = decode_claims(&short, "secret").unwrap().exp;
        let long_exp = decode_claims(&long, "secret").unwrap().exp;
        assert!(long_exp > short_exp);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("token", false);
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_none());

        let remembered = session_cookie("token", true);
        assert_eq!(
            remembered.max_age(),
            Some(cookie::time::Duration::days(30))
        );

        let cleared = clear_session_cookie();
        assert_eq!(cleared.max_age(), Some(cookie::time::Duration::ZERO));
        assert_eq!(cleared.value(), "");
    }
}
