//! JSON-over-HTTP transport shared by the three service clients.

use crate::models::{ClientError, ErrorBody, Validate};
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// One backend service: a base URL plus the shared HTTP client.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    name: &'static str,
    base_url: String,
    http_client: reqwest::Client,
    max_retries: u32,
}

impl ServiceClient {
    pub fn new(
        name: &'static str,
        base_url: impl Into<String>,
        http_client: reqwest::Client,
        max_retries: u32,
    ) -> Self {
        Self {
            name,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            max_retries,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a payload. Reads are idempotent, so retryable failures are retried
    /// up to `max_retries` times with linear backoff.
    pub async fn get<T>(&self, path: &str, token: Option<&str>) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            let request = authorize(self.http_client.get(&url), token);
            match self.execute("GET", &url, request).await {
                Ok(response) => return decode(response).await,
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "[{}] GET {} failed ({}), retrying {}/{}",
                        self.name, url, err, attempt, self.max_retries
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Send a JSON body and decode the JSON answer. Never retried.
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        let url = self.url(path);
        let request = authorize(self.http_client.request(method.clone(), &url), token).json(body);
        let response = self.execute(method.as_str(), &url, request).await?;
        decode(response).await
    }

    /// Send a JSON body when only success matters; the answer body is ignored.
    pub async fn send_discarding<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = authorize(self.http_client.request(method.clone(), &url), token).json(body);
        self.execute(method.as_str(), &url, request).await?;
        Ok(())
    }

    pub async fn post_multipart<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let url = self.url(path);
        let request = self.http_client.post(&url).multipart(form);
        let response = self.execute("POST", &url, request).await?;
        decode(response).await
    }

    async fn execute(
        &self,
        method: &str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let started = Instant::now();
        debug!("[{}] {} {}", self.name, method, url);

        let response = request.send().await.map_err(|e| {
            warn!("[{}] {} {} failed: {}", self.name, method, url, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        debug!(
            "[{}] {} {} -> {} in {}ms",
            self.name,
            method,
            url,
            status,
            started.elapsed().as_millis()
        );

        if status.is_success() {
            return Ok(response);
        }

        let err = error_from_response(response).await;
        warn!("[{}] {} {} rejected: {}", self.name, method, url, err);
        Err(err)
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

// Decode and validate a success body, so a malformed payload fails here instead of in a view
async fn decode<T>(response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned + Validate,
{
    let bytes = response.bytes().await?;
    let payload: T = serde_json::from_slice(&bytes)?;
    payload.validate()?;
    Ok(payload)
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                trimmed.to_string()
            }
        });

    ClientError::from_status(status.as_u16(), message)
}
