//! Team page: roster, and for the leader the join requests with accept/reject.

use crate::api::HackmateApi;
use crate::models::{ClientError, Decision, JoinRequest, TeamApplicationDetail, UserSummary};
use crate::session::SessionStore;
use crate::views::{render_status, Reload, Route, ViewState, ViewStatus};
use async_trait::async_trait;
use log::{error, info, warn};
use std::fmt;

#[derive(Debug)]
pub struct TeamDetailView {
    team_id: i64,
    team: ViewState<TeamApplicationDetail>,
    // Only present once the viewer has been resolved as the leader
    join_requests: Option<ViewState<Vec<JoinRequest>>>,
}

impl TeamDetailView {
    pub fn new(team_id: i64) -> Self {
        Self {
            team_id,
            team: ViewState::new(),
            join_requests: None,
        }
    }

    pub fn team_id(&self) -> i64 {
        self.team_id
    }

    pub fn team(&self) -> &ViewStatus<TeamApplicationDetail> {
        self.team.status()
    }

    pub fn join_requests(&self) -> Option<&ViewStatus<Vec<JoinRequest>>> {
        self.join_requests.as_ref().map(ViewState::status)
    }

    pub fn is_leader(&self, session: &SessionStore) -> bool {
        match (self.team.data(), session.user_id()) {
            (Some(team), Some(user_id)) => session.token().is_some() && team.is_led_by(user_id),
            _ => false,
        }
    }

    // Controls rendered for a request: none once it is accepted or rejected
    pub fn request_actions(request: &JoinRequest) -> &'static [Decision] {
        request.available_decisions()
    }

    pub fn route(&self) -> Route {
        Route::Team(self.team_id)
    }

    async fn load_join_requests(&mut self, api: &HackmateApi, session: &SessionStore) {
        let state = self.join_requests.get_or_insert_with(ViewState::new);
        let ticket = state.begin();
        let result = api.list_join_requests(session.token(), self.team_id).await;
        if let Err(err) = state.resolve(ticket, result) {
            warn!("Join request fetch error for team {}: {}", self.team_id, err);
        }
    }

    /// Accept or reject a join request, then reload the team.
    ///
    /// Leader-only. A request already seen as accepted or rejected is refused
    /// locally; anything the team service refuses (a full team, for instance)
    /// comes back as its error unchanged. A failed reload after a successful
    /// update is left in the view's status rather than returned.
    pub async fn set_request_status(
        &mut self,
        api: &HackmateApi,
        session: &SessionStore,
        request_id: i64,
        decision: Decision,
    ) -> Result<(), ClientError> {
        if !session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        if !self.is_leader(session) {
            return Err(ClientError::InvalidAction(
                "Only the team leader can update the request status".to_string(),
            ));
        }

        if let Some(requests) = self.join_requests.as_ref().and_then(ViewState::data) {
            match requests.iter().find(|request| request.id == request_id) {
                Some(request) if request.status.is_terminal() => {
                    return Err(ClientError::InvalidAction(format!(
                        "Request already {}",
                        request.status.as_str()
                    )));
                }
                Some(_) => {}
                None => {
                    return Err(ClientError::InvalidAction(format!(
                        "join request {} does not belong to team {}",
                        request_id, self.team_id
                    )));
                }
            }
        }

        api.update_join_request_status(session.token(), request_id, decision)
            .await
            .map_err(|err| {
                error!("❌ Status update error: {}", err);
                err
            })?;

        info!("✅ Request {} {}", request_id, decision);
        if let Err(err) = self.reload(api, session).await {
            warn!("Request {} is {} but team {} did not refresh: {}", request_id, decision, self.team_id, err);
        }
        Ok(())
    }
}

#[async_trait]
impl Reload for TeamDetailView {
    async fn reload(&mut self, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError> {
        let ticket = self.team.begin();
        let result = api.get_team(self.team_id).await;
        if let Err(err) = &result {
            error!("❌ Failed to fetch team {}: {}", self.team_id, err);
        }
        self.team.resolve(ticket, result)?;

        if self.is_leader(session) {
            self.load_join_requests(api, session).await;
        } else {
            self.join_requests = None;
        }
        Ok(())
    }
}

fn write_user(f: &mut fmt::Formatter, user: &UserSummary) -> fmt::Result {
    writeln!(f, "  {} <{}>  {}", user.full_name, user.email, Route::User(user.id))
}

impl fmt::Display for TeamDetailView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render_status(f, self.team.status(), |f, team| {
            writeln!(f, "{}", team.title)?;
            writeln!(f, "Team: {}", team.team_name)?;
            if !team.description.is_empty() {
                writeln!(f, "{}", team.description)?;
            }
            writeln!(
                f,
                "Status: {}   Hackathon Date: {}   Capacity: {}/{} ({} left)",
                team.status.as_str(),
                team.hackathon_date,
                team.members.len(),
                team.capacity,
                team.capacity_left
            )?;

            writeln!(f, "\nTeam Leader")?;
            match &team.leader {
                Some(leader) => write_user(f, leader)?,
                None => writeln!(f, "  user #{}", team.leader_user_id)?,
            }

            writeln!(f, "\nTeam Members")?;
            if team.members.is_empty() {
                writeln!(f, "  No members yet.")?;
            }
            for member in &team.members {
                write_user(f, member)?;
            }

            if !team.skill_names.is_empty() {
                writeln!(f, "\nRequired Skills")?;
                writeln!(f, "  {}", team.skill_names.join(", "))?;
            }
            Ok(())
        })?;

        let state = match &self.join_requests {
            Some(state) => state,
            None => return Ok(()),
        };

        writeln!(f, "\nJoin Requests")?;
        render_status(f, state.status(), |f, requests| {
            if requests.is_empty() {
                return writeln!(f, "  No join requests yet.");
            }
            for request in requests {
                writeln!(f, "  #{} {}: \"{}\"", request.id, request.requester_name(), request.message)?;
                let actions = TeamDetailView::request_actions(request);
                if actions.is_empty() {
                    writeln!(f, "      {}", request.status.as_str())?;
                } else {
                    let labels: Vec<&str> = actions.iter().map(Decision::label).collect();
                    writeln!(f, "      {}", labels.join(" | "))?;
                }
            }
            Ok(())
        })
    }
}
