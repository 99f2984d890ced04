use crate::errors::{CloudError, Result};
use crate::validation::check_required;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resource record as returned by the remote API.
///
/// Shapes are owned by the API; the client only reads sub-fields such as `id`.
pub type Record = serde_json::Value;

/// What a name lookup does when several resources share the name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Surface an `ambiguous` error; the id fallback is not attempted
    #[default]
    Reject,
    /// Legacy behavior: report `not_found` so the id fallback runs
    TreatAsNotFound,
}

impl fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguityPolicy::Reject => write!(f, "reject"),
            AmbiguityPolicy::TreatAsNotFound => write!(f, "treat_as_not_found"),
        }
    }
}

impl FromStr for AmbiguityPolicy {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(AmbiguityPolicy::Reject),
            "treat_as_not_found" | "not_found" => Ok(AmbiguityPolicy::TreatAsNotFound),
            other => Err(CloudError::InvalidArgument(format!(
                "unknown ambiguity policy '{}', expected 'reject' or 'treat_as_not_found'",
                other
            ))),
        }
    }
}

/// `{ "id": ... }` reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// `{ "name": ... }` reference, used for profiles and zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

impl NameRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfacePrototype {
    pub subnet: IdRef,
}

// ============================================================================
// Instances
// ============================================================================

/// Options accepted by instance creation
///
/// `image`, `pni_subnet`, `profile` and `zone` are required. `resource_group`,
/// `vpc` and `pni_subnet` may be names or ids; they are resolved before the
/// create request is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInstance {
    pub name: Option<String>,
    pub keys: Option<Vec<String>>,
    pub profile: Option<String>,
    pub resource_group: Option<String>,
    pub user_data: Option<String>,
    pub vpc: Option<String>,
    pub image: Option<String>,
    pub pni_subnet: Option<String>,
    pub zone: Option<String>,
}

impl CreateInstance {
    pub fn validate(&self) -> Result<()> {
        check_required(&[
            ("image", self.image.as_deref()),
            ("pni_subnet", self.pni_subnet.as_deref()),
            ("profile", self.profile.as_deref()),
            ("zone", self.zone.as_deref()),
        ])
    }

    /// Build the API payload from already-resolved reference ids
    pub fn to_prototype(
        &self,
        resource_group_id: Option<String>,
        vpc_id: Option<String>,
        subnet_id: String,
    ) -> Result<InstancePrototype> {
        self.validate()?;

        Ok(InstancePrototype {
            name: self.name.clone(),
            keys: self
                .keys
                .as_ref()
                .map(|keys| keys.iter().map(IdRef::new).collect()),
            profile: NameRef::new(self.profile.clone().unwrap_or_default()),
            resource_group: resource_group_id.map(IdRef::new),
            user_data: self.user_data.clone(),
            vpc: vpc_id.map(IdRef::new),
            image: IdRef::new(self.image.clone().unwrap_or_default()),
            primary_network_interface: NetworkInterfacePrototype {
                subnet: IdRef::new(subnet_id),
            },
            zone: NameRef::new(self.zone.clone().unwrap_or_default()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstancePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<IdRef>>,
    pub profile: NameRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<IdRef>,
    pub image: IdRef,
    pub primary_network_interface: NetworkInterfacePrototype,
    pub zone: NameRef,
}

// ============================================================================
// VPCs
// ============================================================================

pub const DEFAULT_ADDRESS_PREFIX_MANAGEMENT: &str = "auto";

/// Options accepted by VPC creation; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVpc {
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub address_prefix_management: Option<String>,
    pub classic_access: Option<bool>,
}

impl CreateVpc {
    pub fn validate(&self) -> Result<()> {
        match self.address_prefix_management.as_deref() {
            None | Some("auto") | Some("manual") => Ok(()),
            Some(other) => Err(CloudError::InvalidArgument(format!(
                "address_prefix_management must be 'auto' or 'manual', got '{}'",
                other
            ))),
        }
    }

    pub fn to_prototype(&self, resource_group_id: Option<String>) -> Result<VpcPrototype> {
        self.validate()?;

        Ok(VpcPrototype {
            name: self.name.clone(),
            resource_group: resource_group_id.map(IdRef::new),
            address_prefix_management: self
                .address_prefix_management
                .clone()
                .unwrap_or_else(|| DEFAULT_ADDRESS_PREFIX_MANAGEMENT.to_string()),
            classic_access: self.classic_access.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpcPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<IdRef>,
    pub address_prefix_management: String,
    pub classic_access: bool,
}

// ============================================================================
// Resource instances
// ============================================================================

pub const DEFAULT_TARGET: &str = "bluemix-global";

/// Plan aliases accepted in place of a plan id
pub const RESOURCE_PLAN_ALIASES: &[(&str, &str)] = &[
    ("dns", "dc1460a6-37bd-4e2b-8180-d0f86ff39baa"),
    ("object-storage", "2fdf0c08-2d32-4f46-84b5-32e0c92fffd8"),
];

pub fn resource_plan_alias(alias: &str) -> Option<&'static str> {
    RESOURCE_PLAN_ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, id)| *id)
}

/// Options accepted by resource instance provisioning
///
/// `name` and `resource_plan` are required. Without `resource_group` the
/// account's default group is used; without `target`, `bluemix-global`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateResourceInstance {
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub resource_plan: Option<String>,
    pub target: Option<String>,
}

impl CreateResourceInstance {
    pub fn validate(&self) -> Result<()> {
        check_required(&[
            ("name", self.name.as_deref()),
            ("resource_plan", self.resource_plan.as_deref()),
        ])
    }

    pub fn to_prototype(
        &self,
        resource_plan_id: String,
        resource_group_id: String,
    ) -> Result<ResourceInstancePrototype> {
        self.validate()?;

        Ok(ResourceInstancePrototype {
            name: self.name.clone().unwrap_or_default(),
            resource_plan_id,
            target: self
                .target
                .clone()
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            resource_group: resource_group_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstancePrototype {
    pub name: String,
    pub resource_plan_id: String,
    pub target: String,
    pub resource_group: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_instance() -> CreateInstance {
        CreateInstance {
            name: Some("web-1".to_string()),
            keys: Some(vec!["key-1".to_string(), "key-2".to_string()]),
            profile: Some("bx2-2x8".to_string()),
            image: Some("img-1".to_string()),
            pni_subnet: Some("my-subnet".to_string()),
            zone: Some("us-south-1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_instance_missing_zone() {
        let mut options = full_instance();
        options.zone = None;

        let err = options.validate().unwrap_err();
        match err {
            CloudError::MissingArguments(keys) => assert_eq!(keys, vec!["zone"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_instance_payload_shape() {
        let prototype = full_instance()
            .to_prototype(Some("rg-1".to_string()), None, "subnet-1".to_string())
            .unwrap();

        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "name": "web-1",
                "keys": [{"id": "key-1"}, {"id": "key-2"}],
                "profile": {"name": "bx2-2x8"},
                "resource_group": {"id": "rg-1"},
                "image": {"id": "img-1"},
                "primary_network_interface": {"subnet": {"id": "subnet-1"}},
                "zone": {"name": "us-south-1"}
            })
        );
    }

    #[test]
    fn test_vpc_defaults() {
        let prototype = CreateVpc::default().to_prototype(None).unwrap();
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({"address_prefix_management": "auto", "classic_access": false})
        );

        let bad = CreateVpc {
            address_prefix_management: Some("sometimes".to_string()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_resource_instance_defaults() {
        let options = CreateResourceInstance {
            name: Some("dns-svc".to_string()),
            resource_plan: Some("dns".to_string()),
            ..Default::default()
        };

        let prototype = options
            .to_prototype("plan-1".to_string(), "rg-default".to_string())
            .unwrap();
        assert_eq!(prototype.target, "bluemix-global");
        assert_eq!(prototype.resource_group, "rg-default");
    }

    #[test]
    fn test_ambiguity_policy_parsing() {
        assert_eq!("reject".parse::<AmbiguityPolicy>().unwrap(), AmbiguityPolicy::Reject);
        assert_eq!(
            "treat-as-not-found".parse::<AmbiguityPolicy>().unwrap(),
            AmbiguityPolicy::TreatAsNotFound
        );
        assert!("maybe".parse::<AmbiguityPolicy>().is_err());
        assert_eq!(resource_plan_alias("dns"), Some("dc1460a6-37bd-4e2b-8180-d0f86ff39baa"));
        assert_eq!(resource_plan_alias("unknown"), None);
    }
}
