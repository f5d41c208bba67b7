use crate::config::ServiceConfig;
use crate::ports::outbound::{ApiResponse, ServiceSession};
use crate::sbom_reporting::domain::media_type;
use crate::shared::error::ServiceError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticationResponse {
    bearer_token: String,
}

/// Authenticated session against a Black Duck server
///
/// The API token is exchanged once for a bearer token, which is then sent
/// with every request. GET requests are retried on transport errors and 5xx
/// responses; POST requests are sent exactly once.
pub struct BlackDuckSession {
    client: Client,
    base_url: String,
    bearer_token: String,
    max_retries: u32,
}

impl BlackDuckSession {
    const AUTHENTICATE_PATH: &'static str = "/api/tokens/authenticate";
    const RETRY_BACKOFF_MS: u64 = 200;

    /// Connects to the server and authenticates with the given API token
    ///
    /// # Errors
    /// Returns `Connection` if the server cannot be reached and
    /// `Authentication` if it rejects the token.
    pub fn connect(config: &ServiceConfig, api_token: &str) -> Result<Self, ServiceError> {
        let client = Self::build_client(config)?;
        let url = format!("{}{}", config.base_url, Self::AUTHENTICATE_PATH);

        let response = client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", api_token))
            .header(ACCEPT, media_type::USER)
            .send()
            .map_err(|e| ServiceError::Connection {
                url: config.base_url.clone(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Authentication {
                url: config.base_url.clone(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let auth: AuthenticationResponse =
            response.json().map_err(|e| ServiceError::Decode {
                path: Self::AUTHENTICATE_PATH.to_string(),
                details: e.to_string(),
            })?;

        tracing::debug!("Authenticated against {}", config.base_url);
        Self::with_bearer_token(config, auth.bearer_token)
    }

    /// Creates a session from an already issued bearer token
    pub fn with_bearer_token(
        config: &ServiceConfig,
        bearer_token: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Self::build_client(config)?,
            base_url: config.base_url.clone(),
            bearer_token: bearer_token.into(),
            max_retries: config.max_retries,
        })
    }

    fn build_client(config: &ServiceConfig) -> Result<Client, ServiceError> {
        let user_agent = format!("bd-sbom/{}", env!("CARGO_PKG_VERSION"));
        Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ServiceError::Connection {
                url: config.base_url.clone(),
                details: e.to_string(),
            })
    }

    /// Absolute URL for a server-relative path; absolute links pass through
    fn url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn execute(&self, request: RequestBuilder, path: &str) -> Result<ApiResponse, ServiceError> {
        let response = request
            .bearer_auth(&self.bearer_token)
            .send()
            .map_err(|e| ServiceError::Transport {
                path: path.to_string(),
                details: e.to_string(),
            })?;

        let mut api_response = ApiResponse::new(response.status().as_u16());
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                api_response = api_response.with_header(name.as_str(), value);
            }
        }

        let body = response.bytes().map_err(|e| ServiceError::Transport {
            path: path.to_string(),
            details: e.to_string(),
        })?;

        Ok(api_response.with_body(body.to_vec()))
    }
}

impl ServiceSession for BlackDuckSession {
    fn get(&self, path: &str, accept: &str) -> Result<ApiResponse, ServiceError> {
        let attempts = self.max_retries + 1;
        let mut attempt = 1;

        loop {
            let request = self.client.get(self.url(path)).header(ACCEPT, accept);
            let result = self.execute(request, path);

            let retryable = match &result {
                Ok(response) => response.status >= 500,
                Err(_) => true,
            };
            if !retryable || attempt >= attempts {
                return result;
            }

            tracing::debug!(
                "GET {} failed (attempt {}/{}), retrying",
                path,
                attempt,
                attempts
            );
            std::thread::sleep(Duration::from_millis(
                Self::RETRY_BACKOFF_MS * attempt as u64,
            ));
            attempt += 1;
        }
    }

    fn post_json(
        &self,
        path: &str,
        accept: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, ServiceError> {
        let request = self
            .client
            .post(self.url(path))
            .header(ACCEPT, accept)
            .json(body);
        self.execute(request, path)
    }
}
