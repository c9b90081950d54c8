// hackmate/src/models/join_request.rs
use crate::models::{ClientError, UserSummary, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Status for join requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinRequestStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "rejected")]
    Rejected,
}

impl JoinRequestStatus {
    // Once accepted or rejected a request never moves again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JoinRequestStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinRequestStatus::Pending => "pending",
            JoinRequestStatus::Accepted => "accepted",
            JoinRequestStatus::Rejected => "rejected",
        }
    }
}

// The only statuses a leader may submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "rejected")]
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decision::Accepted => "Accept",
            Decision::Rejected => "Reject",
        }
    }
}

impl From<Decision> for JoinRequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accepted => JoinRequestStatus::Accepted,
            Decision::Rejected => JoinRequestStatus::Rejected,
        }
    }
}

impl TryFrom<JoinRequestStatus> for Decision {
    type Error = ClientError;

    fn try_from(status: JoinRequestStatus) -> Result<Self, Self::Error> {
        match status {
            JoinRequestStatus::Accepted => Ok(Decision::Accepted),
            JoinRequestStatus::Rejected => Ok(Decision::Rejected),
            JoinRequestStatus::Pending => Err(ClientError::Validation(
                "Invalid status: pending. Must be 'accepted' or 'rejected'".to_string(),
            )),
        }
    }
}

impl FromStr for Decision {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accepted" | "accept" => Ok(Decision::Accepted),
            "rejected" | "reject" => Ok(Decision::Rejected),
            other => Err(ClientError::Validation(format!(
                "Invalid status: {}. Must be 'accepted' or 'rejected'",
                other
            ))),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Join request model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JoinRequest {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub team_application: Option<i64>,
    #[serde(default)]
    pub message: String,
    pub status: JoinRequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "user_details")]
    pub user: Option<UserSummary>,
}

impl JoinRequest {
    // Actions a leader is offered for this request
    pub fn available_decisions(&self) -> &'static [Decision] {
        if self.status.is_terminal() {
            &[]
        } else {
            &[Decision::Accepted, Decision::Rejected]
        }
    }

    pub fn requester_name(&self) -> String {
        match &self.user {
            Some(user) => user.full_name.clone(),
            None => format!("user #{}", self.user_id),
        }
    }
}

// Request to create a new join request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateJoinRequest {
    pub team_application: i64,
    pub message: String,
}

// Body for PATCH /join-requests/{id}/status/
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusUpdateRequest {
    pub status: Decision,
}

impl Validate for JoinRequest {
    fn validate(&self) -> Result<(), ClientError> {
        if let Some(user) = &self.user {
            if user.id != self.user_id {
                return Err(ClientError::MalformedResponse(format!(
                    "join request {} belongs to user {} but embeds user {}",
                    self.id, self.user_id, user.id
                )));
            }
        }
        Ok(())
    }
}

// Requests listed for a team must all target that team when they say so
pub fn validate_team_requests(team_id: i64, requests: &[JoinRequest]) -> Result<(), ClientError> {
    for request in requests {
        request.validate()?;
        if let Some(target) = request.team_application {
            if target != team_id {
                return Err(ClientError::MalformedResponse(format!(
                    "join request {} targets team {} in the listing for team {}",
                    request.id, target, team_id
                )));
            }
        }
    }
    Ok(())
}
