// Sign-in, sign-up and sign-out actions; each returns where to go next
use crate::api::HackmateApi;
use crate::models::ClientError;
use crate::session::SessionStore;
use crate::utils::{forms, RegistrationForm};
use crate::views::Route;
use log::error;

pub async fn login(
    api: &HackmateApi,
    session: &mut SessionStore,
    email: &str,
    password: &str,
) -> Result<Route, ClientError> {
    let credentials = forms::login_request(email, password)?;
    let response = api.login(&credentials).await.map_err(|err| {
        error!("❌ Login failed for {}: {}", credentials.email, err);
        err
    })?;

    session.login(response.user, response.token);
    Ok(Route::Dashboard)
}

pub async fn register(
    api: &HackmateApi,
    session: &mut SessionStore,
    form: &RegistrationForm,
) -> Result<Route, ClientError> {
    let form = form.validated()?;
    let response = api.register(&form).await.map_err(|err| {
        error!("❌ Registration failed for {}: {}", form.email, err);
        err
    })?;

    session.login(response.user, response.token);
    Ok(Route::Dashboard)
}

pub fn logout(session: &mut SessionStore) -> Route {
    session.logout();
    Route::Login
}
