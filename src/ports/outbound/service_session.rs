use crate::shared::error::ServiceError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Raw response of one REST call: status, headers and body
///
/// Header names are stored lowercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_json(self, value: &serde_json::Value) -> Self {
        self.with_body(value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body as text, for log lines and error messages
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        serde_json::from_slice(&self.body).map_err(|e| ServiceError::Decode {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Converts a non-2xx response into `ServiceError::UnexpectedStatus`
    pub fn error_for_status(self, path: &str) -> Result<Self, ServiceError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ServiceError::UnexpectedStatus {
                path: path.to_string(),
                status: self.status,
                body: self.text(),
            })
        }
    }
}

/// ServiceSession port for the composition-analysis server
///
/// An authenticated session that can issue REST calls against paths
/// relative to the server root (e.g. `/api/projects`). Any HTTP status is
/// returned as an `ApiResponse`; only transport failures are errors.
pub trait ServiceSession {
    /// Sends a GET request
    ///
    /// # Arguments
    /// * `path` - Server-relative path, optionally with a query string
    /// * `accept` - Media type for the `Accept` header
    fn get(&self, path: &str, accept: &str) -> Result<ApiResponse, ServiceError>;

    /// Sends a POST request with a JSON body. Never retried.
    fn post_json(
        &self,
        path: &str,
        accept: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, ServiceError>;
}

impl<S: ServiceSession + ?Sized> ServiceSession for &S {
    fn get(&self, path: &str, accept: &str) -> Result<ApiResponse, ServiceError> {
        (**self).get(path, accept)
    }

    fn post_json(
        &self,
        path: &str,
        accept: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, ServiceError> {
        (**self).post_json(path, accept, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = ApiResponse::new(201).with_header("Location", "/api/reports/r-1");
        assert_eq!(response.header("location"), Some("/api/reports/r-1"));
        assert_eq!(response.header("LOCATION"), Some("/api/reports/r-1"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn test_is_success_range() {
        assert!(ApiResponse::new(200).is_success());
        assert!(ApiResponse::new(201).is_success());
        assert!(!ApiResponse::new(302).is_success());
        assert!(!ApiResponse::new(403).is_success());
    }

    #[test]
    fn test_error_for_status_carries_body() {
        let err = ApiResponse::new(500)
            .with_body("boom")
            .error_for_status("/api/projects")
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::UnexpectedStatus { status: 500, ref body, .. } if body == "boom"
        ));
    }

    #[test]
    fn test_json_decode_error() {
        let response = ApiResponse::new(200).with_body("not json");
        let result: Result<serde_json::Value, _> = response.json("/api/projects");
        assert!(matches!(result, Err(ServiceError::Decode { .. })));
    }
}
