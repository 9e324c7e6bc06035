//! Login route.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::auth as auth_service;
use crate::services::auth::Role;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub access_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: String,
    pub role: Role,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    /// The external id the user logged in with.
    pub school_id: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (user_id, role) = match (&body.user_id, &body.role) {
        (Some(user_id), Some(role)) if !user_id.is_empty() && !role.is_empty() => {
            (user_id.as_str(), role.as_str())
        }
        _ => {
            return Err(AppError::BadRequest(
                "User ID and role are required".to_string(),
            ))
        }
    };
    let role = Role::parse(role).ok_or_else(|| AppError::BadRequest("Invalid role".to_string()))?;

    let user = auth_service::authenticate(
        state.store.as_ref(),
        role,
        user_id,
        body.access_code.as_deref(),
    )
    .await?;

    let token = auth_service::issue_token(&user, &state.config.jwt_secret, state.config.jwt_expiry_secs)?;

    tracing::info!(role = role.as_str(), user = %user.id, "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            id: user.id.to_hex(),
            role: user.role,
            name: user.name,
            email: user.email,
            school_name: user.school_name,
            school_id: user.external_id,
        },
    }))
}
