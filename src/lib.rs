//! # ibmcloud-rs
//!
//! Client for IBM Cloud VPC infrastructure and the Resource Controller.
//!
//! ```no_run
//! use ibmcloud_rs::{IbmCloudClient, ResourceLookup};
//!
//! # async fn example() -> ibmcloud_rs::api::Result<()> {
//! let client = IbmCloudClient::from_env().await?;
//! let vpc_id = client.vpcs().resolve_id("my-vpc").await?;
//! println!("{}", vpc_id);
//! # Ok(())
//! # }
//! ```

pub use ibmcloud_api as api;
pub use ibmcloud_cli as cli;
pub use ibmcloud_core as domain;
pub use ibmcloud_utils as utils;

// Re-export main public types
pub use ibmcloud_api::{
    ApiConfig, ApiError, ClientSettings, Context, Credentials, IbmCloudClient, ResourceLookup,
};
pub use ibmcloud_core::{
    AmbiguityPolicy, CloudError, CreateInstance, CreateResourceInstance, CreateVpc, Record,
};
