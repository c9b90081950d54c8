use crate::api::{require_token, HackmateApi};
use crate::models::{ClientError, Notification};

impl HackmateApi {
    // GET /notifications/
    pub async fn list_notifications(&self, token: Option<&str>) -> Result<Vec<Notification>, ClientError> {
        let token = require_token(token)?;
        self.notifications.get("/notifications/", Some(token)).await
    }
}
