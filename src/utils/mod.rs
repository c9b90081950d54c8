// hackmate/src/utils/mod.rs
use crate::models::{ClientError, CreateTeamApplicationRequest, LoginRequest};
use chrono::NaiveDate;
use regex::Regex;
use std::path::PathBuf;

pub mod session_storage;

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

// Form validation shared by the login, register and create-team actions
pub mod forms {
    use super::*;

    pub fn validate_email(email: &str) -> Result<String, ClientError> {
        let email = email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ClientError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        Ok(email.to_string())
    }

    pub fn require(field: &str, value: &str) -> Result<String, ClientError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ClientError::Validation(format!("{} is required", field)));
        }
        Ok(value.to_string())
    }

    // Passwords are sent exactly as typed; only an all-blank value is refused
    pub fn require_secret(field: &str, value: &str) -> Result<String, ClientError> {
        if value.trim().is_empty() {
            return Err(ClientError::Validation(format!("{} is required", field)));
        }
        Ok(value.to_string())
    }

    // Trim, drop blanks and keep the first occurrence of each skill
    pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for skill in skills {
            let skill = skill.as_ref().trim();
            if !skill.is_empty() && !normalized.iter().any(|s| s == skill) {
                normalized.push(skill.to_string());
            }
        }
        normalized
    }

    pub fn parse_hackathon_date(raw: &str) -> Result<NaiveDate, ClientError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            ClientError::Validation(format!(
                "Hackathon date '{}' must be formatted as YYYY-MM-DD",
                raw
            ))
        })
    }

    pub fn login_request(email: &str, password: &str) -> Result<LoginRequest, ClientError> {
        Ok(LoginRequest {
            email: validate_email(email)?,
            password: require_secret("Password", password)?,
        })
    }
}

// Registration form, sent as multipart to the user service
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub profile_image: Option<PathBuf>,
    pub skills: Vec<String>,
}

impl RegistrationForm {
    pub fn validated(&self) -> Result<RegistrationForm, ClientError> {
        if let Some(path) = &self.profile_image {
            if !path.is_file() {
                return Err(ClientError::Validation(format!(
                    "Profile image {} does not exist",
                    path.display()
                )));
            }
        }

        Ok(RegistrationForm {
            email: forms::validate_email(&self.email)?,
            password: forms::require_secret("Password", &self.password)?,
            full_name: forms::require("Full name", &self.full_name)?,
            profile_image: self.profile_image.clone(),
            skills: forms::normalize_skills(&self.skills),
        })
    }
}

// Create-team form as entered by the leader
#[derive(Debug, Clone)]
pub struct TeamApplicationForm {
    pub title: String,
    pub description: String,
    pub team_name: String,
    pub capacity: u32,
    pub hackathon_date: String,
    pub skills: Vec<String>,
}

impl Default for TeamApplicationForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            team_name: String::new(),
            capacity: 5,
            hackathon_date: String::new(),
            skills: Vec::new(),
        }
    }
}

impl TeamApplicationForm {
    pub fn into_request(self) -> Result<CreateTeamApplicationRequest, ClientError> {
        if self.capacity == 0 {
            return Err(ClientError::Validation(
                "Capacity must be at least 1".to_string(),
            ));
        }

        Ok(CreateTeamApplicationRequest {
            title: forms::require("Title", &self.title)?,
            description: self.description.trim().to_string(),
            team_name: forms::require("Team name", &self.team_name)?,
            capacity: self.capacity,
            hackathon_date: forms::parse_hackathon_date(&self.hackathon_date)?,
            skills: forms::normalize_skills(&self.skills),
        })
    }
}
