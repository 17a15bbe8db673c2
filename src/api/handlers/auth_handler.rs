//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{AccountType, MenteeProfileInput, MentorProfileInput, ProfileInput, Tags};
use crate::errors::AppResult;
use crate::services::{AdminClaim, AuthResponse, Registration, UserProfileResponse};

/// Sign-up request. Profile fields not relevant to the chosen type are ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "amina@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Amina")]
    pub first_name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Uwase")]
    pub last_name: String,
    /// `mentor` or `mentee`
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub education: String,
    /// Mentor only
    #[serde(default)]
    pub expertise: Tags,
    /// Mentor only
    #[serde(default)]
    pub languages: Tags,
    /// Mentor only
    #[serde(default)]
    pub availability: String,
    /// Mentor only
    #[serde(default)]
    pub experience: String,
    /// Mentee only
    #[serde(default)]
    pub goals: Tags,
    /// Mentee only
    #[serde(default)]
    pub interests: Tags,
}

/// Strip surrounding whitespace before field validation runs.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        let profile = match req.account_type {
            AccountType::Mentor => ProfileInput::Mentor(MentorProfileInput {
                bio: req.bio,
                expertise: req.expertise,
                languages: req.languages,
                availability: req.availability,
                experience: req.experience,
                education: req.education,
                location: req.location,
            }),
            AccountType::Mentee => ProfileInput::Mentee(MenteeProfileInput {
                bio: req.bio,
                goals: req.goals,
                interests: req.interests,
                location: req.location,
                education: req.education,
            }),
        };

        Registration {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            profile,
        }
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[schema(example = "amina@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// First-administrator claim
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClaimAdminRequest {
    #[validate(length(min = 1, message = "Email and code are required"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Email and code are required"))]
    pub code: String,
    /// Password for the new account when no user exists with this email
    pub password: Option<String>,
}

/// Create authentication routes. Only `/me` requires a token.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/claim-admin", post(claim_admin))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Register a mentor or mentee
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Validation error or user already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth_service.register(payload.into()).await?;
    Ok(Json(response))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(response))
}

/// Current user with profiles
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfileResponse>> {
    let profile = state.auth_service.me(current_user.id).await?;
    Ok(Json(profile))
}

/// Claim the administrator role with the provisioned email and code
#[utoipa::path(
    post,
    path = "/auth/claim-admin",
    tag = "Authentication",
    request_body = ClaimAdminRequest,
    responses(
        (status = 200, description = "Admin access granted", body = AuthResponse),
        (status = 400, description = "Admin already exists or validation error"),
        (status = 401, description = "Invalid admin credentials"),
        (status = 403, description = "Admin claim is not enabled")
    )
)]
pub async fn claim_admin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ClaimAdminRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .claim_admin(AdminClaim {
            email: payload.email,
            code: payload.code,
            password: payload.password,
        })
        .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_fields_are_trimmed_before_validation() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "email": "  A@X.com ",
            "password": "SecurePass123!",
            "firstName": " Amina",
            "lastName": "Uwase ",
            "type": "mentee",
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.email, "A@X.com");
        assert_eq!(req.first_name, "Amina");
        assert_eq!(req.last_name, "Uwase");
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "email": "a@x.com",
            "password": "SecurePass123!",
            "firstName": "   ",
            "lastName": "Uwase",
            "type": "mentee",
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
