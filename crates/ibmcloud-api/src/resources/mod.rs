//! One module per REST collection.
//!
//! Every collection implements [`ResourceLookup`](crate::resolver::ResourceLookup)
//! so it can be resolved by name or id, including from another collection's
//! create call.

pub mod instance;
pub mod resource_group;
pub mod resource_instance;
pub mod subnet;
pub mod vpc;

pub use instance::Instances;
pub use resource_group::ResourceGroups;
pub use resource_instance::ResourceInstances;
pub use subnet::Subnets;
pub use vpc::Vpcs;
