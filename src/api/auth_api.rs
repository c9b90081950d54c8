// hackmate/src/api/auth_api.rs
use crate::api::HackmateApi;
use crate::models::{AuthResponse, ClientError, LoginRequest, User};
use crate::utils::RegistrationForm;
use log::{error, info};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::fs;

impl HackmateApi {
    // POST /register/ as multipart, mirroring the sign-up form
    pub async fn register(&self, form: &RegistrationForm) -> Result<AuthResponse, ClientError> {
        info!("📝 Register request for email: {}", form.email);

        let mut multipart = Form::new()
            .text("email", form.email.clone())
            .text("password", form.password.clone())
            .text("full_name", form.full_name.clone());

        if let Some(path) = &form.profile_image {
            let bytes = fs::read(path).map_err(|e| {
                error!("❌ Failed to read profile image {}: {:?}", path.display(), e);
                ClientError::Validation(format!("Could not read profile image: {}", e))
            })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "profile_image".to_string());
            multipart = multipart.part("profile_image", Part::bytes(bytes).file_name(file_name));
        }

        for skill in &form.skills {
            multipart = multipart.text("skills", skill.clone());
        }

        let response: AuthResponse = self.users.post_multipart("/register/", multipart).await?;
        info!("✅ User registered successfully: {}", response.user.id);
        Ok(response)
    }

    // POST /login/
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ClientError> {
        info!("🔑 Login request for email: {}", credentials.email);
        let response: AuthResponse = self
            .users
            .send(Method::POST, "/login/", None, credentials)
            .await?;
        info!("✅ User logged in successfully: {}", response.user.id);
        Ok(response)
    }

    // GET /users/{id}/, public
    pub async fn get_user(&self, user_id: i64) -> Result<User, ClientError> {
        self.users
            .get(&format!("/users/{}/", user_id), None)
            .await
    }
}
