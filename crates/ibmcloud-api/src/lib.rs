//! # IBM Cloud API
//!
//! Async client for the IBM Cloud VPC infrastructure and Resource Controller
//! APIs. Every call goes through one [`Dispatcher`], which turns raw HTTP
//! responses into a record or a structured error, and resource references are
//! resolved by name first and by id second.

pub mod auth;
pub mod client;
pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod resolver;
pub mod resources;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export common types for convenience
pub use auth::{bearer_headers, Credentials, IamAuthenticator};
pub use client::*;
pub use context::Context;
pub use dispatcher::Dispatcher;
pub use errors::*;
pub use resolver::{with_fallback, ResourceLookup};
pub use resources::*;
pub use transport::{Endpoints, HttpTransport, Service, Transport, TransportResponse};

// Re-export core types that API consumers will need
pub use ibmcloud_core::{
    AmbiguityPolicy, CloudError, CreateInstance, CreateResourceInstance, CreateVpc, Record,
    RemoteError,
};
