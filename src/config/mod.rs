use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub data_api: DataApiConfig,
    pub display: DisplayConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub token_secret: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataApiMode {
    /// Records kept in process, for local development
    Memory,
    /// Records served by the hosted data API
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataApiConfig {
    pub mode: DataApiMode,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Fixed UTC offset in minutes for date-time cells; local time when unset
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
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
        // Server overrides
        if let Ok(v) = env::var("DASHBOARD_BIND") {
            self.server.bind_addr = v;
        }
        if let Ok(v) = env::var("DASHBOARD_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Identity overrides
        if let Ok(v) = env::var("IDENTITY_BASE_URL") {
            self.identity.base_url = v;
        }
        if let Ok(v) = env::var("IDENTITY_TOKEN_SECRET") {
            self.identity.token_secret = v;
        }
        if let Ok(v) = env::var("IDENTITY_TIMEOUT_SECS") {
            self.identity.request_timeout_secs = v.parse().unwrap_or(self.identity.request_timeout_secs);
        }

        // Data API overrides
        if let Ok(v) = env::var("DATA_API_MODE") {
            self.data_api.mode = match v.as_str() {
                "memory" => DataApiMode::Memory,
                "http" => DataApiMode::Http,
                _ => self.data_api.mode,
            };
        }
        if let Ok(v) = env::var("DATA_API_BASE_URL") {
            self.data_api.base_url = v;
        }
        if let Ok(v) = env::var("DATA_API_TIMEOUT_SECS") {
            self.data_api.request_timeout_secs = v.parse().unwrap_or(self.data_api.request_timeout_secs);
        }

        // Display overrides
        if let Ok(v) = env::var("DISPLAY_UTC_OFFSET_MINUTES") {
            self.display.utc_offset_minutes = v.parse().ok();
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_addr: "127.0.0.1".to_string(),
                port: 3000,
            },
            identity: IdentityConfig {
                base_url: "http://localhost:4000".to_string(),
                token_secret: String::new(),
                request_timeout_secs: 30,
            },
            data_api: DataApiConfig {
                mode: DataApiMode::Memory,
                base_url: "http://localhost:4001".to_string(),
                request_timeout_secs: 30,
            },
            display: DisplayConfig { utc_offset_minutes: None },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_addr: "0.0.0.0".to_string(),
                port: 8080,
            },
            identity: IdentityConfig {
                base_url: "https://auth.staging.example.com".to_string(),
                token_secret: String::new(),
                request_timeout_secs: 10,
            },
            data_api: DataApiConfig {
                mode: DataApiMode::Http,
                base_url: "https://api.staging.example.com".to_string(),
                request_timeout_secs: 10,
            },
            display: DisplayConfig { utc_offset_minutes: None },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_addr: "0.0.0.0".to_string(),
                port: 8080,
            },
            identity: IdentityConfig {
                base_url: "https://auth.example.com".to_string(),
                token_secret: String::new(),
                request_timeout_secs: 5,
            },
            data_api: DataApiConfig {
                mode: DataApiMode::Http,
                base_url: "https://api.example.com".to_string(),
                request_timeout_secs: 5,
            },
            display: DisplayConfig { utc_offset_minutes: None },
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: vec!["https://app.example.com".to_string()],
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
