// hackmate/src/api/mod.rs
pub mod auth_api;
pub mod http;
pub mod join_request_api;
pub mod notification_api;
pub mod team_api;

pub use http::ServiceClient;

use crate::config::Config;
use crate::models::ClientError;
use log::info;

/// Typed client for the user, team and notification services.
#[derive(Clone, Debug)]
pub struct HackmateApi {
    pub(crate) users: ServiceClient,
    pub(crate) teams: ServiceClient,
    pub(crate) notifications: ServiceClient,
}

impl HackmateApi {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "Using user service {}, team service {}, notification service {}",
            config.user_service_url, config.team_service_url, config.notification_service_url
        );

        Ok(Self {
            users: ServiceClient::new(
                "user-service",
                config.user_service_url.clone(),
                http_client.clone(),
                config.max_retries,
            ),
            teams: ServiceClient::new(
                "team-service",
                config.team_service_url.clone(),
                http_client.clone(),
                config.max_retries,
            ),
            notifications: ServiceClient::new(
                "notification-service",
                config.notification_service_url.clone(),
                http_client,
                config.max_retries,
            ),
        })
    }
}

// Authenticated endpoints refuse to go out without a token
pub(crate) fn require_token(token: Option<&str>) -> Result<&str, ClientError> {
    match token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ClientError::NotAuthenticated),
    }
}
