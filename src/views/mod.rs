//! View models for each screen.
//!
//! Every view owns its state as a [`ViewState`], a three-way
//! `Loading | Error | Ready` status guarded by load tickets, and implements
//! [`Reload`]: mutations never patch local state, they invalidate the view and
//! fetch it again.

use crate::api::HackmateApi;
use crate::models::ClientError;
use crate::session::SessionStore;
use async_trait::async_trait;
use log::debug;
use std::fmt;

pub mod auth;
pub mod dashboard;
pub mod my_teams;
pub mod notifications;
pub mod route;
pub mod team_detail;
pub mod user_detail;

pub use dashboard::DashboardView;
pub use my_teams::MyTeamsView;
pub use notifications::NotificationFeed;
pub use route::Route;
pub use team_detail::TeamDetailView;
pub use user_detail::UserDetailView;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewStatus<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewStatus::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Sequence number handed out when a load begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A view's status plus the ticket of the most recent load.
///
/// Only the result carrying the latest ticket is applied, so a slow response
/// to an earlier load can never overwrite a newer one.
///
/// The views in this crate reload through `&mut self`, so their own loads
/// never overlap and always resolve the latest ticket. The check matters to
/// callers that split a load across [`ViewState::begin`] and
/// [`ViewState::resolve`] themselves, for instance starting a second load
/// while the answer to the first is still in flight.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    status: ViewStatus<T>,
    latest: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            status: ViewStatus::Loading,
            latest: 0,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.status = ViewStatus::Loading;
        Ticket(self.latest)
    }

    /// Apply the outcome of the load identified by `ticket`. Failures are
    /// recorded in the status and handed back to the caller; a stale outcome
    /// is dropped and reported as success.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, ClientError>) -> Result<(), ClientError> {
        if ticket.0 != self.latest {
            debug!("Dropping stale response for load {} (latest is {})", ticket.0, self.latest);
            return Ok(());
        }

        match result {
            Ok(data) => {
                self.status = ViewStatus::Ready(data);
                Ok(())
            }
            Err(err) => {
                self.status = ViewStatus::Error(err.to_string());
                Err(err)
            }
        }
    }

    pub fn status(&self) -> &ViewStatus<T> {
        &self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.status.ready()
    }
}

/// Invalidate-and-reload contract shared by every view.
#[async_trait]
pub trait Reload {
    async fn reload(&mut self, api: &HackmateApi, session: &SessionStore) -> Result<(), ClientError>;
}

// Shared rendering of the loading and error states
pub(crate) fn render_status<T, F>(f: &mut fmt::Formatter, status: &ViewStatus<T>, ready: F) -> fmt::Result
where
    F: FnOnce(&mut fmt::Formatter, &T) -> fmt::Result,
{
    match status {
        ViewStatus::Loading => writeln!(f, "Loading..."),
        ViewStatus::Error(message) => writeln!(f, "Error: {}", message),
        ViewStatus::Ready(data) => ready(f, data),
    }
}
