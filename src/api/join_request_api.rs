// hackmate/src/api/join_request_api.rs
use crate::api::{require_token, HackmateApi};
use crate::models::{
    validate_team_requests, ClientError, CreateJoinRequest, Decision, JoinRequest,
    StatusUpdateRequest,
};
use log::info;
use reqwest::Method;

impl HackmateApi {
    // POST /join-request/
    pub async fn create_join_request(
        &self,
        token: Option<&str>,
        team_id: i64,
        message: &str,
    ) -> Result<JoinRequest, ClientError> {
        let token = require_token(token)?;
        info!("📧 Requesting to join team: {}", team_id);

        let body = CreateJoinRequest {
            team_application: team_id,
            message: message.to_string(),
        };
        let request: JoinRequest = self
            .teams
            .send(Method::POST, "/join-request/", Some(token), &body)
            .await?;

        info!("✅ Join request created: {}", request.id);
        Ok(request)
    }

    // GET /join-requests/{teamId}/, leader only
    pub async fn list_join_requests(
        &self,
        token: Option<&str>,
        team_id: i64,
    ) -> Result<Vec<JoinRequest>, ClientError> {
        let token = require_token(token)?;
        let requests: Vec<JoinRequest> = self
            .teams
            .get(&format!("/join-requests/{}/", team_id), Some(token))
            .await?;
        validate_team_requests(team_id, &requests)?;
        info!("✅ Found {} join requests for team {}", requests.len(), team_id);
        Ok(requests)
    }

    // PATCH /join-requests/{id}/status/, leader only
    pub async fn update_join_request_status(
        &self,
        token: Option<&str>,
        request_id: i64,
        decision: Decision,
    ) -> Result<(), ClientError> {
        let token = require_token(token)?;
        info!("🔄 Marking join request {} as {}", request_id, decision);

        self.teams
            .send_discarding(
                Method::PATCH,
                &format!("/join-requests/{}/status/", request_id),
                Some(token),
                &StatusUpdateRequest { status: decision },
            )
            .await
    }
}
