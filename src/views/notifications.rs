use crate::api::HackmateApi;
use crate::models::{ClientError, Notification};
use crate::session::SessionStore;
use crate::views::{render_status, Reload, Route, ViewState};
use async_trait::async_trait;
use log::{info, warn};
use std::fmt;

// Event messages for the signed-in user, refreshed on demand
#[derive(Debug, Default)]
pub struct NotificationFeed {
    state: ViewState<Vec<Notification>>,
    signed_in: bool,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<Vec<Notification>> {
        &self.state
    }

    pub fn notifications(&self) -> &[Notification] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    // Where selecting a notification leads
    pub fn target(notification: &Notification) -> Route {
        Route::Team(notification.team_application_id)
    }
}

#[async_trait]
impl Reload for NotificationFeed {
    async fn reload(&mut self, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError> {
        self.signed_in = session.is_authenticated();
        let ticket = self.state.begin();

        if !self.signed_in {
            return self.state.resolve(ticket, Err(ClientError::NotAuthenticated));
        }

        let result = api.list_notifications(session.token()).await;
        match &result {
            Ok(notifications) => info!("🔔 {} notifications", notifications.len()),
            Err(err) => warn!("Failed to fetch notifications: {}", err),
        }
        self.state.resolve(ticket, result)
    }
}

impl fmt::Display for NotificationFeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Notifications")?;
        if !self.signed_in {
            return writeln!(f, "  Please log in to see your notifications.");
        }

        render_status(f, self.state.status(), |f, notifications| {
            if notifications.is_empty() {
                return writeln!(f, "  No new notifications.");
            }
            for notification in notifications {
                writeln!(
                    f,
                    "  - {} ({}) -> {}",
                    notification.message,
                    notification.created_at.format("%Y-%m-%d %H:%M"),
                    NotificationFeed::target(notification)
                )?;
            }
            Ok(())
        })
    }
}
