//! Authentication service - registration, login, current user and the
//! one-time admin claim.
//!
//! Password hashing lives in the domain `Password` value object; multi-row
//! writes go through the Unit of Work.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::application_service::{application_message, submit_within};
use crate::config::{
    Config, BOOTSTRAP_ADMIN_FIRST_NAME, BOOTSTRAP_ADMIN_LAST_NAME, SECONDS_PER_HOUR,
    TOKEN_TYPE_BEARER,
};
use crate::domain::{
    MenteeProfile, MentorProfile, NewUser, Password, ProfileInput, Role, User, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

const USER_EXISTS: &str = "User already exists";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Returned by register, login and claim-admin.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Current user with whichever profile they have.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub mentor_profile: Option<MentorProfile>,
    pub mentee_profile: Option<MenteeProfile>,
}

/// Sign-up data. The profile variant decides the role.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: ProfileInput,
}

/// Bootstrap claim for the first administrator.
#[derive(Debug, Clone)]
pub struct AdminClaim {
    pub email: String,
    pub code: String,
    /// Only needed when no account exists for the email yet
    pub password: Option<String>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, registration: Registration) -> AppResult<AuthResponse>;

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    async fn me(&self, user_id: Uuid) -> AppResult<UserProfileResponse>;

    async fn claim_admin(&self, claim: AdminClaim) -> AppResult<AuthResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sign a token for the user and wrap it with the public user fields.
fn auth_response(message: &str, user: User, config: &Config) -> AppResult<AuthResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(AuthResponse {
        message: message.to_string(),
        token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        user: user.into(),
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<AuthResponse> {
        let Registration {
            email,
            password,
            first_name,
            last_name,
            profile,
        } = registration;

        let email = normalize_email(&email);
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        if email.is_empty() || first_name.is_empty() || last_name.is_empty() {
            return Err(AppError::validation("All required fields must be provided"));
        }

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(USER_EXISTS));
        }

        let password_hash = Password::new(&password)?.into_string();
        let role = match &profile {
            ProfileInput::Mentor(_) => Role::Mentor,
            ProfileInput::Mentee(_) => Role::Mentee,
        };
        let new_user = NewUser {
            email,
            password_hash,
            first_name,
            last_name,
            role,
            is_admin: false,
        };

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let user = ctx.users().create(new_user).await?;
                    match profile {
                        ProfileInput::Mentor(input) => {
                            let message = application_message(None, &input.bio);
                            submit_within(&ctx, user.id, input, message).await?;
                        }
                        ProfileInput::Mentee(input) => {
                            ctx.profiles().create_mentee(user.id, input).await?;
                        }
                    }
                    Ok(user)
                })
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        auth_response("Registration successful", user, &self.config)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let user = self
            .uow
            .users()
            .find_by_email(&normalize_email(&email))
            .await?;

        // Unknown emails still pay for one Argon2 verification
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid && user.is_active => {
                tracing::debug!(user_id = %user.id, "Login succeeded");
                auth_response("Login successful", user, &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn me(&self, user_id: Uuid) -> AppResult<UserProfileResponse> {
        let user = match self.uow.users().find_by_id(user_id).await? {
            Some(user) if user.is_active => user,
            _ => return Err(AppError::not_found("User")),
        };

        let mentor_profile = self.uow.mentor_profiles().find_by_user(user_id).await?;
        let mentee_profile = self.uow.mentee_profiles().find_by_user(user_id).await?;

        Ok(UserProfileResponse {
            user: user.into(),
            mentor_profile,
            mentee_profile,
        })
    }

    async fn claim_admin(&self, claim: AdminClaim) -> AppResult<AuthResponse> {
        let bootstrap = self
            .config
            .admin_bootstrap
            .clone()
            .ok_or_else(|| AppError::forbidden("Admin claim is not enabled"))?;

        let email = normalize_email(&claim.email);
        let AdminClaim { code, password, .. } = claim;

        let user = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    if ctx.users().find_admin().await?.is_some() {
                        return Err(AppError::conflict("Admin already exists"));
                    }
                    if !bootstrap.matches(&email, &code) {
                        return Err(AppError::InvalidAdminCredentials);
                    }

                    if let Some(existing) = ctx.users().find_by_email(&email).await? {
                        return ctx.users().grant_admin(existing.id).await;
                    }

                    let password = password.ok_or_else(|| {
                        AppError::validation("Password is required to create the admin account")
                    })?;
                    let password_hash = Password::new(&password)?.into_string();

                    ctx.users()
                        .create(NewUser {
                            email,
                            password_hash,
                            first_name: BOOTSTRAP_ADMIN_FIRST_NAME.to_string(),
                            last_name: BOOTSTRAP_ADMIN_LAST_NAME.to_string(),
                            role: Role::Admin,
                            is_admin: true,
                        })
                        .await
                })
            })
            .await
            .map_err(|e| {
                if let AppError::InvalidAdminCredentials = e {
                    tracing::warn!("Rejected admin claim with invalid credentials");
                }
                e
            })?;

        tracing::info!(user_id = %user.id, "Admin access granted");
        auth_response("Admin access granted", user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures;
    use crate::infra::{
        MockApplicationRepository, MockMenteeProfileRepository, MockMentorProfileRepository,
        MockNotificationRepository, MockRequestRepository, MockUserRepository,
        TransactionContext,
    };
    use crate::infra::{
        ApplicationRepository, MenteeProfileRepository, MentorProfileRepository,
        NotificationRepository, RequestRepository, UserRepository,
    };

    const SECRET: &str = "test-secret-key-that-is-long-enough!";

    /// Unit of Work over mocked repositories. Transactions are not
    /// available; paths that need them are covered by integration tests.
    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn mentor_profiles(&self) -> Arc<dyn MentorProfileRepository> {
            Arc::new(MockMentorProfileRepository::new())
        }

        fn mentee_profiles(&self) -> Arc<dyn MenteeProfileRepository> {
            Arc::new(MockMenteeProfileRepository::new())
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            Arc::new(MockApplicationRepository::new())
        }

        fn requests(&self) -> Arc<dyn RequestRepository> {
            Arc::new(MockRequestRepository::new())
        }

        fn notifications(&self) -> Arc<dyn NotificationRepository> {
            Arc::new(MockNotificationRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("transactions are not mocked"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("transactions are not mocked"))
        }
    }

    fn service_with(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            users: Arc::new(users),
        };
        Authenticator::new(Arc::new(uow), Config::new("sqlite::memory:", SECRET))
    }

    fn account(password: &str, active: bool) -> User {
        let mut user = fixtures::user(Role::Mentee);
        user.password_hash = Password::new(password).unwrap().into_string();
        user.is_active = active;
        user
    }

    async fn login_error(users: MockUserRepository, password: &str) -> AppError {
        service_with(users)
            .login("mentee@example.com".to_string(), password.to_string())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let user = account("correct-horse", true);
        let user_id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email.to_string() == "mentee@example.com")
            .returning(move |_| Ok(Some(user.clone())));

        let service = service_with(users);
        let response = service
            .login("  Mentee@Example.com ".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        assert_eq!(response.message, "Login successful");
        assert_eq!(response.user.id, user_id);
        assert_eq!(service.verify_token(&response.token).unwrap().sub, user_id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut unknown = MockUserRepository::new();
        unknown.expect_find_by_email().returning(|_| Ok(None));

        let wrong_password_user = account("correct-horse", true);
        let mut wrong_password = MockUserRepository::new();
        wrong_password
            .expect_find_by_email()
            .returning(move |_| Ok(Some(wrong_password_user.clone())));

        let inactive_user = account("correct-horse", false);
        let mut inactive = MockUserRepository::new();
        inactive
            .expect_find_by_email()
            .returning(move |_| Ok(Some(inactive_user.clone())));

        let errors = [
            login_error(unknown, "correct-horse").await,
            login_error(wrong_password, "wrong-horse").await,
            login_error(inactive, "correct-horse").await,
        ];

        for err in &errors {
            assert!(matches!(err, AppError::InvalidCredentials));
            assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_register_rejects_existing_email_before_writing() {
        let existing = fixtures::user(Role::Mentee);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let err = service_with(users)
            .register(Registration {
                email: "mentee@example.com".to_string(),
                password: "password123".to_string(),
                first_name: "Amina".to_string(),
                last_name: "Uwase".to_string(),
                profile: ProfileInput::Mentee(Default::default()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(msg) if msg == USER_EXISTS));
    }

    #[tokio::test]
    async fn test_claim_admin_disabled_without_bootstrap() {
        let err = service_with(MockUserRepository::new())
            .claim_admin(AdminClaim {
                email: "root@example.com".to_string(),
                code: "code".to_string(),
                password: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_me_hides_inactive_accounts() {
        let mut user = fixtures::user(Role::Mentor);
        user.is_active = false;
        let id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service_with(users).me(id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let service = service_with(MockUserRepository::new());
        assert!(matches!(
            service.verify_token("not.a.token"),
            Err(AppError::Jwt(_))
        ));
    }
}
