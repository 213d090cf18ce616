//! Authentication middleware
//!
//! The whole surface sits behind a fixed set of username/password pairs
//! (HTTP Basic). Passwords are stored as SHA-256 digests in config and
//! requests are verified digest-to-digest.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::Engine;

use crate::config::hash_password;
use crate::{AppError, AppState};

/// Authenticated user extracted from Basic credentials
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Middleware: Require Basic auth against the configured credential set
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    let (username, password) = decode_basic(auth_header)?;

    if let Err(e) = verify_credentials(&state.config.users, &username, &password) {
        tracing::warn!("Failed login attempt for user {:?}", username);
        return Err(e);
    }

    // Make the username available to handlers for logging
    req.extensions_mut().insert(AuthUser { username });

    Ok(next.run(req).await)
}

/// Check one username/password pair against the configured digest set
fn verify_credentials(
    users: &std::collections::HashMap<String, String>,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    let expected = users.get(username).ok_or(AppError::InvalidCredentials)?;

    if hash_password(password) != *expected {
        return Err(AppError::InvalidCredentials);
    }

    Ok(())
}

/// Decode `Authorization: Basic <base64(user:pass)>`
fn decode_basic(header: &str) -> Result<(String, String), AppError> {
    let encoded = header.strip_prefix("Basic ").ok_or(AppError::Unauthorized)?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::Unauthorized)?;

    let decoded = String::from_utf8(decoded).map_err(|_| AppError::Unauthorized)?;

    let (user, pass) = decoded.split_once(':').ok_or(AppError::Unauthorized)?;
    Ok((user.to_string(), pass.to_string()))
}

// Implement FromRequestParts for AuthUser
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_header(user: &str, pass: &str) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
        format!("Basic {encoded}")
    }

    #[test]
    fn test_decode_basic_round_trip() {
        let (user, pass) = decode_basic(&basic_header("teacher", "bright123")).unwrap();
        assert_eq!(user, "teacher");
        assert_eq!(pass, "bright123");
    }

    #[test]
    fn test_decode_basic_allows_colon_in_password() {
        let (user, pass) = decode_basic(&basic_header("admin", "pa:ss")).unwrap();
        assert_eq!(user, "admin");
        assert_eq!(pass, "pa:ss");
    }

    #[test]
    fn test_decode_rejects_other_schemes() {
        assert!(decode_basic("Bearer sometoken").is_err());
        assert!(decode_basic("Basic not-base64!!").is_err());
        assert!(decode_basic("").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("no-colon-here");
        assert!(decode_basic(&format!("Basic {encoded}")).is_err());
    }

    #[test]
    fn test_verify_credentials() {
        let mut users = std::collections::HashMap::new();
        users.insert("teacher".to_string(), hash_password("bright123"));

        assert!(verify_credentials(&users, "teacher", "bright123").is_ok());
        assert!(matches!(
            verify_credentials(&users, "teacher", "wrong"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_credentials(&users, "nobody", "bright123"),
            Err(AppError::InvalidCredentials)
        ));
    }
}
