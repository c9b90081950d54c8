//! Team listing, role badges and the requester side of the join flow.

use crate::api::HackmateApi;
use crate::models::{ClientError, CreatedTeamApplication, JoinRequest, TeamApplication};
use crate::session::SessionStore;
use crate::utils::TeamApplicationForm;
use crate::views::{render_status, NotificationFeed, Reload, ViewState, ViewStatus};
use async_trait::async_trait;
use log::{error, info, warn};
use std::fmt;

#[derive(Debug, Default)]
pub struct DashboardView {
    teams: ViewState<Vec<TeamApplication>>,
    pub feed: NotificationFeed,
}

// Fetch the listing into `state`; roles come back resolved for the token's owner
async fn fetch_listing(
    state: &mut ViewState<Vec<TeamApplication>>,
    api: &HackmateApi,
    token: Option<&str>,
) -> Result<(), ClientError> {
    let ticket = state.begin();
    let result = api.list_team_applications(token).await;
    if let Err(err) = &result {
        error!("❌ Failed to fetch team applications: {}", err);
    }
    state.resolve(ticket, result)
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> &ViewStatus<Vec<TeamApplication>> {
        self.teams.status()
    }

    pub fn team(&self, team_id: i64) -> Option<&TeamApplication> {
        self.teams
            .data()
            .and_then(|teams| teams.iter().find(|team| team.id == team_id))
    }

    // Whether the "Request to Join" action is offered for a team in the listing
    pub fn can_request_to_join(&self, session: &SessionStore, team_id: i64) -> bool {
        session.is_authenticated()
            && self
                .team(team_id)
                .map_or(false, |team| team.user_role.can_request_to_join())
    }

    /// Reload only the team listing.
    pub async fn reload_teams(&mut self, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError> {
        fetch_listing(&mut self.teams, api, session.token()).await
    }

    /// Ask to join `team_id`. Only offered while the viewer's role on that team
    /// is `default`; the listing is reloaded afterwards so role and capacity
    /// reflect what the team service now reports. Once the request is created
    /// it is returned even if that reload fails; the failure stays in
    /// [`DashboardView::teams`].
    pub async fn request_to_join(
        &mut self,
        api: &HackmateApi,
        session: &SessionStore,
        team_id: i64,
        message: &str,
    ) -> Result<JoinRequest, ClientError> {
        if !session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }

        let team = self.team(team_id).ok_or_else(|| {
            ClientError::InvalidAction(format!(
                "team {} is not in the current listing, reload the dashboard first",
                team_id
            ))
        })?;

        if !team.user_role.can_request_to_join() {
            return Err(ClientError::InvalidAction(format!(
                "your role on {} is '{}', join requests need 'default'",
                team.team_name,
                team.user_role.as_str()
            )));
        }

        let created = api
            .create_join_request(session.token(), team_id, message)
            .await
            .map_err(|err| {
                error!("❌ Failed to send join request: {}", err);
                err
            })?;

        if let Err(err) = self.reload_teams(api, session).await {
            warn!("Join request {} sent but the listing did not refresh: {}", created.id, err);
        }
        Ok(created)
    }

    /// Post a new team application and reload the listing.
    pub async fn create_team(
        &mut self,
        api: &HackmateApi,
        session: &SessionStore,
        form: TeamApplicationForm,
    ) -> Result<CreatedTeamApplication, ClientError> {
        if !session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }

        let request = form.into_request()?;
        let created = api
            .create_team_application(session.token(), &request)
            .await
            .map_err(|err| {
                error!("❌ Error creating team: {}", err);
                err
            })?;

        info!("✅ Created team {} ({})", request.team_name, created.team_id);
        if let Err(err) = self.reload_teams(api, session).await {
            warn!("Team {} created but the listing did not refresh: {}", created.team_id, err);
        }
        Ok(created)
    }
}

#[async_trait]
impl Reload for DashboardView {
    async fn reload(&mut self, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError> {
        let teams = &mut self.teams;
        let feed = &mut self.feed;

        let (listing, _notifications) = futures::join!(
            fetch_listing(teams, api, session.token()),
            feed.reload(api, session)
        );

        // Feed failures stay inside the feed; the listing decides the outcome
        listing
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Find a Team")?;
        render_status(f, self.teams.status(), |f, teams| {
            if teams.is_empty() {
                return writeln!(f, "  No open team applications.");
            }
            for team in teams {
                write!(f, "  [{}] {}", team.id, team.team_name)?;
                if let Some(badge) = team.user_role.badge() {
                    write!(f, "  <{}>", badge)?;
                }
                writeln!(f)?;
                writeln!(
                    f,
                    "      Leader: {}",
                    team.leader_name.as_deref().unwrap_or("unknown")
                )?;
                if !team.description.is_empty() {
                    writeln!(f, "      {}", team.description)?;
                }
                if !team.skill_names.is_empty() {
                    writeln!(f, "      Skills: {}", team.skill_names.join(", "))?;
                }
                write!(f, "      Capacity Left: {}/{}", team.capacity_left, team.capacity)?;
                if team.user_role.can_request_to_join() {
                    write!(f, "  (hackmate join {})", team.id)?;
                }
                writeln!(f)?;
            }
            Ok(())
        })?;
        writeln!(f)?;
        write!(f, "{}", self.feed)
    }
}
