//! Issues one request through a [`Transport`] and normalizes its outcome.

use crate::context::Context;
use crate::errors::Result;
use crate::transport::{Service, Transport, TransportResponse};
use ibmcloud_core::{codes, CloudError, Record, RemoteError};
use log::{debug, error};
use reqwest::Method;
use serde_json::{json, Value};

pub const STATUS_DELETED: &str = "deleted";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_NO_CONTENT: &str = "no_content";

/// Request dispatcher bound to a transport and a context
pub struct Dispatcher<'a, T> {
    transport: &'a T,
    context: &'a Context,
}

impl<T> Clone for Dispatcher<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Dispatcher<'_, T> {}

impl<'a, T: Transport> Dispatcher<'a, T> {
    pub fn new(transport: &'a T, context: &'a Context) -> Self {
        Self { transport, context }
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// One round trip, un-normalized. Transport failures are logged and returned.
    pub async fn dispatch_raw(
        &self,
        service: Service,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        debug!("Dispatching {} {} to {}", method, path, service);

        self.transport
            .query(service, method.clone(), path, self.context.headers(), body)
            .await
            .map_err(|e| {
                error!("Error during {} {} on {}: {}", method, path, service, e);
                e
            })
    }

    /// One round trip, normalized into a record or a structured error
    pub async fn dispatch(
        &self,
        service: Service,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Record> {
        let response = self.dispatch_raw(service, method.clone(), path, body).await?;
        normalize(&method, response)
    }

    pub async fn get(&self, service: Service, path: &str) -> Result<Record> {
        self.dispatch(service, Method::GET, path, None).await
    }

    pub async fn post(&self, service: Service, path: &str, body: &Value) -> Result<Record> {
        self.dispatch(service, Method::POST, path, Some(body)).await
    }

    pub async fn delete(&self, service: Service, path: &str) -> Result<Record> {
        self.dispatch(service, Method::DELETE, path, None).await
    }
}

/// Turn a raw response into the unified outcome
///
/// Body-less successes become a status marker; non-2xx responses become
/// [`CloudError::Remote`] carrying the error code found in the body.
pub fn normalize(method: &Method, response: TransportResponse) -> Result<Record> {
    let success = response.is_success();
    let TransportResponse { data, status_code } = response;

    if success {
        return Ok(match data {
            Some(data) => data,
            None => json!({ "status": status_marker(method, status_code) }),
        });
    }

    let remote = remote_error(status_code, data);
    debug!("Remote error outcome: {}", remote);
    Err(CloudError::Remote(remote).into())
}

fn status_marker(method: &Method, status_code: u16) -> &'static str {
    match status_code {
        204 if *method == Method::DELETE => STATUS_DELETED,
        202 => STATUS_ACCEPTED,
        _ => STATUS_NO_CONTENT,
    }
}

/// Extract the error code from either payload shape the platform uses:
/// `{"errors": [{"code", "message"}]}` (VPC) or
/// `{"status_code", "error_code", "message"}` (Resource Controller).
pub fn remote_error(status: u16, data: Option<Value>) -> RemoteError {
    let first_error = data
        .as_ref()
        .and_then(|body| body.get("errors"))
        .and_then(Value::as_array)
        .and_then(|errors| errors.first());

    let mut remote = if let Some(detail) = first_error {
        let code = detail
            .get("code")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| fallback_code(status));

        RemoteError {
            status,
            code,
            message: string_field(detail, "message"),
            more_info: string_field(detail, "more_info"),
            body: None,
        }
    } else {
        let code = if status == 404 {
            codes::NOT_FOUND.to_string()
        } else {
            data.as_ref()
                .and_then(|body| string_field(body, "error_code"))
                .unwrap_or_else(|| fallback_code(status))
        };

        RemoteError {
            status,
            code,
            message: data.as_ref().and_then(|body| string_field(body, "message")),
            more_info: None,
            body: None,
        }
    };

    remote.body = data;
    remote
}

fn fallback_code(status: u16) -> String {
    if status == 404 {
        codes::NOT_FOUND.to_string()
    } else {
        format!("http_{}", status)
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(String::from)
}
