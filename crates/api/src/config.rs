use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// How long in-flight work may take to drain after a shutdown signal
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Interval between token blacklist prunes in seconds (default: `3600`).
    pub blacklist_prune_interval_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                    |
    /// |---------------------------------|----------------------------|
    /// | `HOST`                          | `0.0.0.0`                  |
    /// | `PORT`                          | `3000`                     |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                       |
    /// | `BLACKLIST_PRUNE_INTERVAL_SECS` | `3600`                     |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let blacklist_prune_interval_secs: u64 = std::env::var("BLACKLIST_PRUNE_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("BLACKLIST_PRUNE_INTERVAL_SECS must be a valid u64");
        assert!(
            blacklist_prune_interval_secs > 0,
            "BLACKLIST_PRUNE_INTERVAL_SECS must be positive"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            blacklist_prune_interval_secs,
            jwt,
        }
    }
}
