use bd_sbom::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// A request seen by the mock session
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Mock ServiceSession answering from scripted per-route responses
///
/// Routes are keyed by method and path without the query string. Each
/// route holds a queue; its last response is repeated once the others are
/// used up. Unscripted routes answer 404.
#[derive(Default, Clone)]
pub struct MockServiceSession {
    routes: Arc<Mutex<HashMap<String, VecDeque<ApiResponse>>>>,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get(self, path: &str, responses: Vec<ApiResponse>) -> Self {
        self.script("GET", path, responses)
    }

    pub fn with_post(self, path: &str, responses: Vec<ApiResponse>) -> Self {
        self.script("POST", path, responses)
    }

    fn script(self, method: &str, path: &str, responses: Vec<ApiResponse>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(route_key(method, path), responses.into());
        self
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests whose path starts with `prefix`
    pub fn count_with_prefix(&self, method: &str, prefix: &str) -> usize {
        self.recorded()
            .iter()
            .filter(|r| r.method == method && r.path.starts_with(prefix))
            .count()
    }

    fn respond(
        &self,
        method: &str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResponse {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            body,
        });

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&route_key(method, path)) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| ApiResponse::new(404)),
            None => ApiResponse::new(404),
        }
    }
}

fn route_key(method: &str, path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    format!("{} {}", method, path)
}

impl ServiceSession for MockServiceSession {
    fn get(&self, path: &str, _accept: &str) -> Result<ApiResponse, ServiceError> {
        Ok(self.respond("GET", path, None))
    }

    fn post_json(
        &self,
        path: &str,
        _accept: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, ServiceError> {
        Ok(self.respond("POST", path, Some(body.clone())))
    }
}
