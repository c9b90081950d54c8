// hackmate/src/models/mod.rs
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub mod team;
pub use team::*;

pub mod join_request;
pub use join_request::*;

pub mod notification;
pub use notification::*;

// User models as served by the user service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

// Compact user shape embedded in team rosters and join requests
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            profile_image: user.profile_image,
            skills: user.skills,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Both login and register answer with the token and the signed-in user
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Error bodies sent by the backend services: {"error": "..."} or {"detail": "..."}
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub detail: Option<String>,
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match (&self.error, &self.detail, &self.details) {
            (Some(error), _, Some(details)) => Some(format!("{} ({})", error, details)),
            (Some(error), _, None) => Some(error.clone()),
            (None, Some(detail), _) => Some(detail.clone()),
            (None, None, details) => details.clone(),
        }
    }
}

// Client error taxonomy
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ClientError {
    #[display(fmt = "Network error: {}", _0)]
    Transport(String),
    #[display(fmt = "Request timed out")]
    Timeout,
    #[display(fmt = "Server responded with {}: {}", status, message)]
    Http { status: u16, message: String },
    #[display(fmt = "Unauthorized: {}", _0)]
    Unauthorized(String),
    #[display(fmt = "Forbidden: {}", _0)]
    Forbidden(String),
    #[display(fmt = "Not Found: {}", _0)]
    NotFound(String),
    #[display(fmt = "Malformed response: {}", _0)]
    MalformedResponse(String),
    #[display(fmt = "You need to log in first")]
    NotAuthenticated,
    #[display(fmt = "Action not allowed: {}", _0)]
    InvalidAction(String),
    #[display(fmt = "Invalid input: {}", _0)]
    Validation(String),
    #[display(fmt = "Storage error: {}", _0)]
    Storage(String),
    #[display(fmt = "Configuration error: {}", _0)]
    Configuration(String),
}

impl std::error::Error for ClientError {}

impl ClientError {
    // Map a non-2xx status and its extracted message onto the taxonomy
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ClientError::Unauthorized(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            _ => ClientError::Http { status, message },
        }
    }

    // Network failures and gateway errors may succeed on a second attempt;
    // everything else is terminal for the user action.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Timeout => true,
            ClientError::Http { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::MalformedResponse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}

// Schema checks applied to every payload before a view accepts it
pub trait Validate {
    fn validate(&self) -> Result<(), ClientError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ClientError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), ClientError> {
        if self.email.trim().is_empty() {
            return Err(ClientError::MalformedResponse(format!(
                "user {} has no email",
                self.id
            )));
        }
        Ok(())
    }
}

impl Validate for AuthResponse {
    fn validate(&self) -> Result<(), ClientError> {
        if self.token.trim().is_empty() {
            return Err(ClientError::MalformedResponse(
                "authentication response carried an empty token".to_string(),
            ));
        }
        self.user.validate()
    }
}
