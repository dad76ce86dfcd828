use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 signing secret for bearer tokens. Loaded from JWT_SECRET; token
    /// issuance and verification refuse to run while it is empty.
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
}

#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Fee applied when a booking request omits consultation_fee.
    pub default_consultation_fee: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        if let Ok(v) = env::var("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.api.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_DAYS") {
            self.security.jwt_expiry_days = v.parse().unwrap_or(self.security.jwt_expiry_days);
        }

        if let Ok(v) = env::var("DEFAULT_CONSULTATION_FEE") {
            self.booking.default_consultation_fee =
                v.parse().unwrap_or(self.booking.default_consultation_fee);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            api: ApiConfig {
                port: 3001,
                cors_origins: vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:3000".to_string(),
                ],
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_days: 7,
            },
            booking: BookingConfig {
                default_consultation_fee: 500,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
            },
            api: ApiConfig {
                port: 3001,
                cors_origins: vec!["https://staging.yanora.example".to_string()],
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_days: 7,
            },
            booking: BookingConfig {
                default_consultation_fee: 500,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 3001,
                cors_origins: vec!["https://yanora.example".to_string()],
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_days: 7,
            },
            booking: BookingConfig {
                default_consultation_fee: 500,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.api.port, 3001);
        assert_eq!(config.security.jwt_expiry_days, 7);
        assert_eq!(config.booking.default_consultation_fee, 500);
        assert!(config.security.jwt_secret.is_empty());
    }

    #[test]
    fn production_defaults() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.booking.default_consultation_fee, 500);
    }
}
