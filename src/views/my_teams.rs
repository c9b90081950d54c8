use crate::api::HackmateApi;
use crate::models::{ClientError, TeamApplication};
use crate::session::SessionStore;
use crate::views::{render_status, Reload, Route, ViewState, ViewStatus};
use async_trait::async_trait;
use log::error;
use std::fmt;

// Teams the signed-in user leads or belongs to
#[derive(Debug, Default)]
pub struct MyTeamsView {
    teams: ViewState<Vec<TeamApplication>>,
}

impl MyTeamsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> &ViewStatus<Vec<TeamApplication>> {
        self.teams.status()
    }
}

#[async_trait]
impl Reload for MyTeamsView {
    async fn reload(&mut self, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError> {
        let ticket = self.teams.begin();
        let result = api.list_my_teams(session.token()).await;
        if let Err(err) = &result {
            error!("❌ Failed to fetch teams: {}", err);
        }
        self.teams.resolve(ticket, result)
    }
}

impl fmt::Display for MyTeamsView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render_status(f, self.teams.status(), |f, teams| {
            if teams.is_empty() {
                return writeln!(f, "You're not part of any teams yet.");
            }
            writeln!(f, "My Teams")?;
            for team in teams {
                writeln!(f, "  {}  {}", team.team_name, Route::Team(team.id))?;
                writeln!(
                    f,
                    "      Status: {} | Role: {}",
                    team.status.as_str(),
                    team.user_role.as_str()
                )?;
                writeln!(
                    f,
                    "      Leader: {}",
                    team.leader_name.as_deref().unwrap_or("unknown")
                )?;
                writeln!(f, "      Hackathon Date: {}", team.hackathon_date.format("%a %b %d %Y"))?;
                writeln!(
                    f,
                    "      Capacity: {} total, {} spots left",
                    team.capacity, team.capacity_left
                )?;
                if !team.skill_names.is_empty() {
                    writeln!(f, "      Skills: {}", team.skill_names.join(", "))?;
                }
            }
            Ok(())
        })
    }
}
