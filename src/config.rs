// hackmate/src/config.rs
use crate::models::ClientError;
use log::debug;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8001/api";
const DEFAULT_TEAM_SERVICE_URL: &str = "http://localhost:8002/api";
const DEFAULT_NOTIFICATION_SERVICE_URL: &str = "http://localhost:8003/api";
const DEFAULT_SESSION_PATH: &str = "./storage/session.json";

// Deployment configuration: where the three services live and how long to wait on them
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub user_service_url: String,
    pub team_service_url: String,
    pub notification_service_url: String,
    pub session_path: PathBuf,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_service_url: DEFAULT_USER_SERVICE_URL.to_string(),
            team_service_url: DEFAULT_TEAM_SERVICE_URL.to_string(),
            notification_service_url: DEFAULT_NOTIFICATION_SERVICE_URL.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
            max_retries: 2,
        }
    }
}

impl Config {
    // Read configuration from the environment, loading `.env` first when present
    pub fn from_env() -> Result<Self, ClientError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Build from any key lookup; kept separate from the process environment for tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let url = |key: &str, default: String| -> Result<String, ClientError> {
            match lookup(key) {
                Some(value) => normalize_base_url(key, &value),
                None => Ok(default),
            }
        };

        let seconds = |key: &str, default: Duration| -> Result<Duration, ClientError> {
            match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| {
                        ClientError::Configuration(format!("{} must be a whole number of seconds, got '{}'", key, value))
                    }),
                None => Ok(default),
            }
        };

        let max_retries = match lookup("HACKMATE_MAX_RETRIES") {
            Some(value) => value.trim().parse::<u32>().map_err(|_| {
                ClientError::Configuration(format!("HACKMATE_MAX_RETRIES must be a number, got '{}'", value))
            })?,
            None => defaults.max_retries,
        };

        Ok(Self {
            user_service_url: url("HACKMATE_USER_SERVICE_URL", defaults.user_service_url)?,
            team_service_url: url("HACKMATE_TEAM_SERVICE_URL", defaults.team_service_url)?,
            notification_service_url: url(
                "HACKMATE_NOTIFICATION_SERVICE_URL",
                defaults.notification_service_url,
            )?,
            session_path: lookup("HACKMATE_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_path),
            request_timeout: seconds("HACKMATE_REQUEST_TIMEOUT_SECS", defaults.request_timeout)?,
            connect_timeout: seconds("HACKMATE_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
            max_retries,
        })
    }

    // Point all three services at one host, as a single-gateway deployment or a test backend does
    pub fn single_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            user_service_url: base.clone(),
            team_service_url: base.clone(),
            notification_service_url: base,
            ..Config::default()
        }
    }
}

fn normalize_base_url(key: &str, value: &str) -> Result<String, ClientError> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ClientError::Configuration(format!(
            "{} must be an http(s) URL, got '{}'",
            key, value
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}
