//! Identity and token service: role-scoped login and JWT issue/validate.

use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Student,
    Teacher,
    Secretary,
}

impl Role {
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "Admin" => Some(Self::Admin),
            "Student" => Some(Self::Student),
            "Teacher" => Some(Self::Teacher),
            "Secretary" => Some(Self::Secretary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Student => "Student",
            Self::Teacher => "Teacher",
            Self::Secretary => "Secretary",
        }
    }
}

/// JWT claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ObjectId, hex-encoded.
    pub sub: String,
    pub role: Role,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// School scope id, hex-encoded; used to filter school-wide listings.
    pub school: String,
    #[serde(default)]
    pub school_name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// The account a login resolved to, before token issuance.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: ObjectId,
    pub role: Role,
    pub name: String,
    pub email: Option<String>,
    /// School scope; for admins this is their own account id.
    pub school: ObjectId,
    pub school_name: Option<String>,
    /// The external id the user logged in with (admins use the school name).
    pub external_id: String,
}

/// Look up exactly one account in the collection determined by `role`.
///
/// Zero matches is an authentication failure with a role-specific message;
/// there is no fuzzy matching and no fallback across collections.
pub async fn authenticate(
    store: &dyn Store,
    role: Role,
    user_id: &str,
    access_code: Option<&str>,
) -> Result<AuthenticatedUser, AppError> {
    match role {
        Role::Admin => {
            let access_code = access_code.filter(|c| !c.is_empty()).ok_or_else(|| {
                AppError::BadRequest("Access code is required for admin login".to_string())
            })?;
            let school = store
                .find_school_by_name_and_code(user_id, access_code)
                .await?
                .ok_or_else(|| {
                    AppError::AuthenticationFailed(
                        "Invalid school name or access code".to_string(),
                    )
                })?;
            Ok(AuthenticatedUser {
                id: school.id,
                role,
                name: school.name.clone().unwrap_or_else(|| school.school_name.clone()),
                email: school.email.clone(),
                school: school.id,
                school_name: Some(school.school_name),
                external_id: user_id.to_string(),
            })
        }
        Role::Student => {
            let student = store
                .find_student_by_school_id(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::AuthenticationFailed("Invalid student ID".to_string())
                })?;
            Ok(AuthenticatedUser {
                id: student.id,
                role,
                name: student.name,
                email: student.email,
                school: student.school.unwrap_or(student.id),
                school_name: None,
                external_id: student.school_id,
            })
        }
        Role::Teacher => {
            let teacher = store
                .find_teacher_by_teacher_id(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::AuthenticationFailed("Invalid teacher ID".to_string())
                })?;
            Ok(AuthenticatedUser {
                id: teacher.id,
                role,
                name: teacher.name,
                email: teacher.email,
                school: teacher.school.unwrap_or(teacher.id),
                school_name: None,
                external_id: teacher.teacher_id,
            })
        }
        Role::Secretary => {
            let secretary = store
                .find_secretary_by_secretary_id(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::AuthenticationFailed("Invalid secretary ID".to_string())
                })?;
            Ok(AuthenticatedUser {
                id: secretary.id,
                role,
                name: secretary.name,
                email: secretary.email,
                school: secretary.school.unwrap_or(secretary.id),
                school_name: None,
                external_id: secretary.secretary_id,
            })
        }
    }
}

/// Sign a session token embedding the user's claims, valid for `ttl_secs`.
pub fn issue_token(
    user: &AuthenticatedUser,
    jwt_secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_hex(),
        role: user.role,
        name: user.name.clone(),
        email: user.email.clone(),
        school: user.school.to_hex(),
        school_name: user.school_name.clone(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: ObjectId::new(),
            role: Role::Student,
            name: "Emma Smith".to_string(),
            email: Some("emma@school.test".to_string()),
            school: ObjectId::new(),
            school_name: None,
            external_id: "S001".to_string(),
        }
    }

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!(Role::parse("Student"), Some(Role::Student));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("student"), None);
        assert_eq!(Role::parse("Parent"), None);
    }

    #[test]
    fn token_round_trip() {
        let user = test_user();
        let secret = "test-secret-key";
        let token = issue_token(&user, secret, 3600).unwrap();

        let claims = validate_token(&token, secret).unwrap();
        assert_eq!(claims.sub, user.id.to_hex());
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.name, "Emma Smith");
        assert_eq!(claims.school, user.school.to_hex());
    }

    #[test]
    fn forged_token_rejected() {
        let user = test_user();
        let token = issue_token(&user, "secret-a", 3600).unwrap();
        assert!(matches!(
            validate_token(&token, "secret-b"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_rejected() {
        let user = test_user();
        let secret = "test-secret";
        // Expired well beyond the default leeway window.
        let token = issue_token(&user, secret, -3600).unwrap();
        assert!(matches!(
            validate_token(&token, secret),
            Err(AppError::InvalidToken)
        ));
    }
}
