use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ClientError, UserSummary, Validate};

// Viewer's relationship to a team application, resolved by the team service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Member,
    Pending,
    #[default]
    Default,
}

impl Role {
    // Only viewers with no relationship to the team may ask to join
    pub fn can_request_to_join(&self) -> bool {
        *self == Role::Default
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Role::Owner => Some("You Own This Team"),
            Role::Member => Some("You're a Member"),
            Role::Pending => Some("Request Pending"),
            Role::Default => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Member => "member",
            Role::Pending => "pending",
            Role::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    #[default]
    Open,
    Closed,
    Filled,
    Expired,
}

impl TeamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamStatus::Open => "open",
            TeamStatus::Closed => "closed",
            TeamStatus::Filled => "filled",
            TeamStatus::Expired => "expired",
        }
    }
}

// Team application as returned by the listing endpoints
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamApplication {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub leader_user_id: i64,
    #[serde(default)]
    pub leader_name: Option<String>,
    pub team_name: String,
    #[serde(default)]
    pub skills: Vec<i64>,
    #[serde(default)]
    pub skill_names: Vec<String>,
    pub capacity: u32,
    pub capacity_left: u32,
    #[serde(default)]
    pub status: TeamStatus,
    pub hackathon_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_role: Role,
}

// Single team application with its resolved roster
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamApplicationDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub team_name: String,
    pub capacity: u32,
    pub capacity_left: u32,
    #[serde(default)]
    pub status: TeamStatus,
    pub hackathon_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: Vec<i64>,
    #[serde(default)]
    pub skill_names: Vec<String>,
    pub leader_user_id: i64,
    #[serde(default)]
    pub leader: Option<UserSummary>,
    #[serde(default)]
    pub member_user_ids: Vec<i64>,
    #[serde(default)]
    pub members: Vec<UserSummary>,
}

impl TeamApplicationDetail {
    // Leadership is decided by the embedded leader record, as the team page does
    pub fn is_led_by(&self, user_id: i64) -> bool {
        self.leader.as_ref().map_or(false, |leader| leader.id == user_id)
    }

    pub fn has_member(&self, user_id: i64) -> bool {
        self.members.iter().any(|member| member.id == user_id)
            || self.member_user_ids.contains(&user_id)
    }
}

// Body for POST /create-team-application/
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateTeamApplicationRequest {
    pub title: String,
    pub description: String,
    pub team_name: String,
    pub capacity: u32,
    pub hackathon_date: NaiveDate,
    pub skills: Vec<String>,
}

// The team service answers creation with the new id; a full record carries it as `id`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreatedTeamApplication {
    #[serde(alias = "id")]
    pub team_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

fn check_capacity(team_id: i64, capacity: u32, capacity_left: u32) -> Result<(), ClientError> {
    if capacity_left > capacity {
        return Err(ClientError::MalformedResponse(format!(
            "team {} reports {} slots left out of {}",
            team_id, capacity_left, capacity
        )));
    }
    Ok(())
}

impl Validate for TeamApplication {
    fn validate(&self) -> Result<(), ClientError> {
        check_capacity(self.id, self.capacity, self.capacity_left)
    }
}

impl Validate for TeamApplicationDetail {
    fn validate(&self) -> Result<(), ClientError> {
        check_capacity(self.id, self.capacity, self.capacity_left)?;
        if let Some(leader) = &self.leader {
            if leader.id != self.leader_user_id {
                return Err(ClientError::MalformedResponse(format!(
                    "team {} names leader {} but embeds user {}",
                    self.id, self.leader_user_id, leader.id
                )));
            }
        }
        Ok(())
    }
}

impl Validate for CreatedTeamApplication {
    fn validate(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

// An anonymous listing can only ever carry the default role
pub fn validate_anonymous_listing(teams: &[TeamApplication]) -> Result<(), ClientError> {
    match teams.iter().find(|team| team.user_role != Role::Default) {
        Some(team) => Err(ClientError::MalformedResponse(format!(
            "role '{}' returned for team {} to an anonymous viewer",
            team.user_role.as_str(),
            team.id
        ))),
        None => Ok(()),
    }
}
