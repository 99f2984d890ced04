//! In-memory transport for unit tests.

use crate::errors::{HttpError, Result};
use crate::transport::{Service, Transport, TransportResponse};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Mutex;

struct Route {
    method: Method,
    path: String,
    query: Vec<String>,
    response: TransportResponse,
}

impl Route {
    fn matches(&self, method: &Method, path: &str) -> bool {
        let (request_path, request_query) = path.split_once('?').unwrap_or((path, ""));
        let pairs: Vec<&str> = request_query.split('&').collect();

        self.method == *method
            && self.path == request_path
            && self.query.iter().all(|pair| pairs.contains(&pair.as_str()))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub service: Service,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

/// Answers from a route table and records every call.
///
/// Route paths may carry query pairs (`/v2/resource_groups?default=true`)
/// which must all be present in the request; the first match wins.
/// Unmatched requests get a VPC-style 404 `not_found` body.
pub(crate) struct MockTransport {
    routes: Vec<Route>,
    calls: Mutex<Vec<RecordedCall>>,
    failing: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// Every query fails as if the network were down
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.route(method, path, TransportResponse::new(status, Some(body)))
    }

    pub fn on_empty(self, method: Method, path: &str, status: u16) -> Self {
        self.route(method, path, TransportResponse::new(status, None))
    }

    fn route(mut self, method: Method, path: &str, response: TransportResponse) -> Self {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        self.routes.push(Route {
            method,
            path: path.to_string(),
            query: query
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(String::from)
                .collect(),
            response,
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Paths requested with `method`, query strings stripped
    pub fn paths(&self, method: Method) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .map(|call| call.path.split('?').next().unwrap_or_default().to_string())
            .collect()
    }
}

impl Transport for MockTransport {
    async fn query(
        &self,
        service: Service,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            service,
            method: method.clone(),
            path: path.to_string(),
            body: body.cloned(),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });

        if self.failing {
            return Err(HttpError::Connection("connection refused".to_string()).into());
        }

        Ok(self
            .routes
            .iter()
            .find(|route| route.matches(&method, path))
            .map(|route| route.response.clone())
            .unwrap_or_else(|| {
                TransportResponse::new(
                    404,
                    Some(json!({"errors": [{"code": "not_found", "message": "no such route"}]})),
                )
            }))
    }
}
