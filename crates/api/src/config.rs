use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub uploads: UploadConfig,
    pub payments: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5001`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// `DATABASE_URL` is read separately by the binary.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            uploads: UploadConfig::from_env(),
            payments: PaymentConfig::from_env(),
        }
    }
}

/// Where uploaded files are written and how they are addressed.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory for stored files, also served at `/uploads`.
    pub upload_dir: PathBuf,
    /// Public origin used to build file URLs (no trailing slash).
    pub public_base_url: String,
}

impl UploadConfig {
    /// | Env Var           | Default                 |
    /// |-------------------|-------------------------|
    /// | `UPLOAD_DIR`      | `uploads`               |
    /// | `PUBLIC_BASE_URL` | `http://localhost:5001` |
    pub fn from_env() -> Self {
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5001".into())
            .trim_end_matches('/')
            .to_string();
        Self {
            upload_dir: PathBuf::from(upload_dir),
            public_base_url,
        }
    }
}

/// Razorpay credentials and defaults.
///
/// Both keys are optional so the server can start without payments; the
/// payment endpoints answer 500 until they are configured.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
    pub api_base: String,
    pub currency: String,
}

impl PaymentConfig {
    /// | Env Var               | Default                       |
    /// |-----------------------|-------------------------------|
    /// | `RAZORPAY_KEY_ID`     | unset                         |
    /// | `RAZORPAY_KEY_SECRET` | unset                         |
    /// | `RAZORPAY_API_BASE`   | `https://api.razorpay.com/v1` |
    /// | `PAYMENT_CURRENCY`    | `INR`                         |
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            key_id: non_empty("RAZORPAY_KEY_ID"),
            key_secret: non_empty("RAZORPAY_KEY_SECRET"),
            api_base: std::env::var("RAZORPAY_API_BASE")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".into())
                .trim_end_matches('/')
                .to_string(),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),
        }
    }

    /// `(key_id, key_secret)` when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.key_id, &self.key_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}
