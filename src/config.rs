use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "https://salon-base.vercel.app",
    "http://localhost:5173",
    "http://localhost:3000",
];

pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub seed_demo_data: bool,
    pub rate_limit_window: Duration,
    pub rate_limit_max_requests: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_ttl", &self.jwt_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout", &self.request_timeout)
            .field("seed_demo_data", &self.seed_demo_data)
            .field("rate_limit_window", &self.rate_limit_window)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            jwt_secret: "secret".to_string(), // override with JWT_SECRET outside development
            jwt_ttl: Duration::from_secs(30 * 24 * 60 * 60),
            bcrypt_cost: 12,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            request_timeout: Duration::from_secs(30),
            seed_demo_data: false,
            rate_limit_window: Duration::from_secs(15 * 60),
            rate_limit_max_requests: 100,
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_ttl: parsed("JWT_EXPIRES_IN_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.jwt_ttl),
            bcrypt_cost: parsed("BCRYPT_COST").unwrap_or(defaults.bcrypt_cost),
            cors_origins: env::var("CORS_ORIGINS")
                .ok()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.cors_origins),
            request_timeout: parsed("REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            seed_demo_data: parsed("SEED_DEMO_DATA").unwrap_or(defaults.seed_demo_data),
            rate_limit_window: parsed("RATE_LIMIT_WINDOW_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.rate_limit_window),
            rate_limit_max_requests: parsed("RATE_LIMIT_MAX_REQUESTS").unwrap_or(defaults.rate_limit_max_requests),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
