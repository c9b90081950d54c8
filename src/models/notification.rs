use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ClientError, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    RequestAccepted,
    RequestRejected,
    NewMemberAdded,
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: NotificationKind,
    pub team_application_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub leader_name: Option<String>,
}

fn default_kind() -> NotificationKind {
    NotificationKind::Other
}

impl Validate for Notification {
    fn validate(&self) -> Result<(), ClientError> {
        if self.message.trim().is_empty() {
            return Err(ClientError::MalformedResponse(format!(
                "notification {} has no message",
                self.id
            )));
        }
        Ok(())
    }
}
