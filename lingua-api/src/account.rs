use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// The student account a request acts for, identified by its API key
#[derive(Debug, Clone)]
pub struct StudentAccount(pub String);

impl<S> FromRequestParts<S> for StudentAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| StudentAccount(key.to_string()))
            .ok_or_else(|| AppError::AuthenticationError("Missing X-Api-Key header".to_string()))
    }
}
