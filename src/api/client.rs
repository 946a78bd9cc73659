// src/api/client.rs
//
// REST backend client
//
// ARCHITECTURE:
// - One reqwest client shared by every resource service
// - JSON in, JSON out; multipart for file-bearing resources
// - Non-2xx responses become `AppError::Api` carrying the parsed body, so
//   callers can surface `detail` / `message` or field-keyed validation errors
//
// CRITICAL RULES:
// - No retries; every failure is terminal for the user action
// - No timeout unless configured

use std::time::Duration;

use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;

use super::body::RequestBody;
use crate::config::BackofficeConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ApiClient {
    root: String,
    http_client: Client,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &BackofficeConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            root: config.api_root(),
            http_client: builder.build()?,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Absolute URL for a path below the API root
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    pub async fn get<T>(&self, path: &str, query: &[(String, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        let response = self.execute(request).await?;
        Self::parse(response).await
    }

    /// Send a body with `method` and decode the returned record
    pub async fn send<T>(&self, method: Method, path: &str, body: RequestBody) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(method, path);
        let request = match body {
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(payload) => request.multipart(payload.into_form()?),
        };

        let response = self.execute(request).await?;
        Self::parse(response).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let request = self.request(Method::DELETE, path);
        self.execute(request).await?;
        Ok(())
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http_client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &self.auth_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        request
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let bytes = response.bytes().await.unwrap_or_default();
        let body = serde_json::from_slice(&bytes).ok();
        log::warn!("{} returned {}", url, status);

        Err(AppError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
