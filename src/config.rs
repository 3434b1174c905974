use anyhow::Context;

/// Process-wide configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Symmetric signing secret for identity tokens. Rotating it
    /// invalidates every outstanding token.
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        Ok(Self {
            database_url,
            jwt_secret,
        })
    }
}
