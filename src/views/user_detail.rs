use crate::api::HackmateApi;
use crate::models::{ClientError, User};
use crate::session::SessionStore;
use crate::views::{render_status, Reload, ViewState, ViewStatus};
use async_trait::async_trait;
use log::error;
use std::fmt;

// Read-only profile page
#[derive(Debug)]
pub struct UserDetailView {
    user_id: i64,
    user: ViewState<User>,
}

impl UserDetailView {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            user: ViewState::new(),
        }
    }

    pub fn user(&self) -> &ViewStatus<User> {
        self.user.status()
    }
}

#[async_trait]
impl Reload for UserDetailView {
    async fn reload(&mut self, api: &HackmateApi, _session: &SessionStore) -> Result<(), ClientError> {
        let ticket = self.user.begin();
        let result = api.get_user(self.user_id).await;
        if let Err(err) = &result {
            error!("❌ Failed to fetch user {}: {}", self.user_id, err);
        }
        self.user.resolve(ticket, result)
    }
}

impl fmt::Display for UserDetailView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render_status(f, self.user.status(), |f, user| {
            writeln!(f, "{}", user.full_name)?;
            writeln!(f, "Email: {}", user.email)?;
            if let Some(image) = &user.profile_image {
                writeln!(f, "Profile image: {}", image)?;
            }
            if user.skills.is_empty() {
                writeln!(f, "Skills: none listed")
            } else {
                writeln!(f, "Skills: {}", user.skills.join(", "))
            }
        })
    }
}
