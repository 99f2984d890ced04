//! # IBM Cloud Core
//!
//! Core domain types for the IBM Cloud client.
//!
//! This crate contains pure logic with no I/O dependencies:
//! - Resource records and cross-resource references
//! - The error taxonomy shared by every layer
//! - Creation options and the payloads they build into
//! - Required-argument validation
//!
//! ## Design Principles
//!
//! - **Pass-through records**: resource shapes belong to the remote API
//! - **One error channel**: local validation and remote errors share [`CloudError`]
//! - **Dependency-Free**: no networking or persistence dependencies

pub mod errors;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use errors::{codes, CloudError, RemoteError, Result};
pub use models::{
    resource_plan_alias, AmbiguityPolicy, CreateInstance, CreateResourceInstance, CreateVpc, IdRef,
    InstancePrototype, NameRef, NetworkInterfacePrototype, Record, ResourceInstancePrototype,
    VpcPrototype, DEFAULT_ADDRESS_PREFIX_MANAGEMENT, DEFAULT_TARGET, RESOURCE_PLAN_ALIASES,
};
pub use validation::check_required;
