//! Access gate: JWT bearer extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use bson::oid::ObjectId;

use crate::errors::AppError;
use crate::services::auth as auth_service;
use crate::services::auth::Role;
use crate::AppState;

/// Authenticated caller extracted from the `Authorization: Bearer` header.
///
/// Use as an extractor in handlers that require authentication:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
/// Missing header rejects with 401 ("Access token required"); a bad or
/// expired token rejects with 403 ("Invalid token"). Stateless: nothing is
/// stored across requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub role: Role,
    pub name: String,
    /// School scope for school-wide listings.
    pub school: ObjectId,
    pub school_name: Option<String>,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenRequired)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenRequired)?;

        let claims = auth_service::validate_token(token, &state.config.jwt_secret)?;

        let id = ObjectId::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
        let school = ObjectId::parse_str(&claims.school).map_err(|_| AppError::InvalidToken)?;

        Ok(CurrentUser {
            id,
            role: claims.role,
            name: claims.name,
            school,
            school_name: claims.school_name,
        })
    }
}
