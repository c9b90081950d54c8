// hackmate/src/api/team_api.rs
use crate::api::{require_token, HackmateApi};
use crate::models::{
    validate_anonymous_listing, ClientError, CreateTeamApplicationRequest, CreatedTeamApplication,
    TeamApplication, TeamApplicationDetail,
};
use log::{debug, info};
use reqwest::Method;

impl HackmateApi {
    // GET /team-applications/; roles are only resolved when a token is attached
    pub async fn list_team_applications(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<TeamApplication>, ClientError> {
        let teams: Vec<TeamApplication> = self.teams.get("/team-applications/", token).await?;
        if token.is_none() {
            validate_anonymous_listing(&teams)?;
        }
        debug!("📋 Found {} team applications", teams.len());
        Ok(teams)
    }

    // POST /create-team-application/
    pub async fn create_team_application(
        &self,
        token: Option<&str>,
        request: &CreateTeamApplicationRequest,
    ) -> Result<CreatedTeamApplication, ClientError> {
        let token = require_token(token)?;
        info!("📝 Creating team application: {}", request.team_name);
        let created: CreatedTeamApplication = self
            .teams
            .send(Method::POST, "/create-team-application/", Some(token), request)
            .await?;
        info!("✅ Team application created: {}", created.team_id);
        Ok(created)
    }

    // GET /team/{id}/, public
    pub async fn get_team(&self, team_id: i64) -> Result<TeamApplicationDetail, ClientError> {
        self.teams.get(&format!("/team/{}/", team_id), None).await
    }

    // GET /user/teams/
    pub async fn list_my_teams(&self, token: Option<&str>) -> Result<Vec<TeamApplication>, ClientError> {
        let token = require_token(token)?;
        self.teams.get("/user/teams/", Some(token)).await
    }
}
