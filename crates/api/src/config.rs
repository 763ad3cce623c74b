use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// How the wallet payment path should behave, given that there is no real
/// browser extension on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletSimMode {
    /// Simulate a present, cooperative wallet (default).
    Available,
    /// Simulate no injected provider: checkout reports the install page.
    Absent,
    /// Simulate the user declining the account-access prompt.
    Reject,
}

impl WalletSimMode {
    fn from_env() -> Self {
        match std::env::var("WALLET_SIMULATION").as_deref() {
            Ok("absent") => Self::Absent,
            Ok("reject") => Self::Reject,
            _ => Self::Available,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory for uploaded objects (default: `./uploads`).
    pub upload_dir: PathBuf,
    /// Public base URL uploads are served under (default:
    /// `http://localhost:3000/media`).
    pub public_base_url: String,
    /// Wallet simulation behavior for the checkout wallet path.
    pub wallet_sim: WalletSimMode,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `UPLOAD_DIR`           | `./uploads`                    |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000/media`  |
    /// | `WALLET_SIMULATION`    | `available`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".into()));

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/media".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            public_base_url,
            wallet_sim: WalletSimMode::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}
