use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub signing: SigningConfig,
    pub functions: FunctionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    pub media_domain: String,
    pub secret: String,
    #[serde(default = "default_url_ttl_secs")]
    pub url_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionsConfig {
    pub base_url: String,
    #[serde(default = "default_functions_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8086".to_string())
                    .parse()?,
            },
            auth: AuthConfig {
                jwt_secret: std::env::var("JWT_SECRET")?,
            },
            signing: SigningConfig {
                media_domain: std::env::var("MEDIA_DOMAIN")
                    .unwrap_or_else(|_| "media.nekomachi.cafe".to_string()),
                secret: std::env::var("URL_SIGNING_SECRET")?,
                url_ttl_secs: std::env::var("URL_SIGNING_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_url_ttl_secs),
            },
            functions: FunctionsConfig {
                base_url: std::env::var("FUNCTIONS_BASE_URL")?,
                max_wait_secs: std::env::var("FUNCTIONS_MAX_WAIT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_functions_max_wait_secs),
            },
        })
    }
}

fn default_url_ttl_secs() -> u64 {
    900 // 15 minutes
}

fn default_functions_max_wait_secs() -> u64 {
    16
}
