//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// One-time credential pair that lets the first administrator claim the role.
///
/// Provisioned out of band through `ADMIN_BOOTSTRAP_EMAIL` and
/// `ADMIN_BOOTSTRAP_CODE`; claiming is disabled when either is missing.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    code: String,
}

impl AdminBootstrap {
    pub fn new(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_lowercase(),
            code: code.into(),
        }
    }

    /// Check a claimed email/code pair against the provisioned one.
    pub fn matches(&self, email: &str, code: &str) -> bool {
        self.email == email.trim().to_lowercase() && self.code == code
    }
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("code", &"[REDACTED]")
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("admin_bootstrap", &self.admin_bootstrap)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the database
    /// URL and the signing secret.
    ///
    /// # Panics
    /// Panics if the secret is shorter than the minimum length.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        let jwt_secret = jwt_secret.into();
        assert_secret_length(&jwt_secret);

        Self {
            database_url: database_url.into(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            admin_bootstrap: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        let admin_bootstrap = match (
            env::var("ADMIN_BOOTSTRAP_EMAIL"),
            env::var("ADMIN_BOOTSTRAP_CODE"),
        ) {
            (Ok(email), Ok(code)) if !email.trim().is_empty() && !code.is_empty() => {
                Some(AdminBootstrap::new(email, code))
            }
            _ => None,
        };

        let mut config = Self::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
        );

        config.database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);
        config.jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS);
        config.server_host =
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        config.server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);
        config.admin_bootstrap = admin_bootstrap;

        config
    }

    /// Enable the admin bootstrap claim with the given pair.
    pub fn with_admin_bootstrap(mut self, email: impl Into<String>, code: impl Into<String>) -> Self {
        self.admin_bootstrap = Some(AdminBootstrap::new(email, code));
        self
    }

    /// Override the connection pool size.
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.database_max_connections = max_connections;
        self
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn assert_secret_length(secret: &str) {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        panic!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        );
    }
}
