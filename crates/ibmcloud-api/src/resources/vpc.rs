use crate::context::encode_segment;
use crate::dispatcher::Dispatcher;
use crate::errors::Result;
use crate::resolver::{list_field, select_by_name, ResourceLookup};
use crate::resources::resource_group::ResourceGroups;
use crate::transport::{Service, Transport};
use ibmcloud_core::{CreateVpc, Record};
use log::{debug, info};

/// Virtual Private Clouds (`/v1/vpcs`)
pub struct Vpcs<'a, T> {
    dispatcher: Dispatcher<'a, T>,
}

impl<'a, T: Transport> Vpcs<'a, T> {
    pub fn new(dispatcher: Dispatcher<'a, T>) -> Self {
        Self { dispatcher }
    }

    fn path(&self, suffix: &str) -> String {
        self.dispatcher
            .context()
            .iaas_path(&format!("/v1/vpcs{}", suffix), &[])
    }

    /// Retrieve the VPC list
    pub async fn list(&self) -> Result<Record> {
        debug!("Fetching VPCs");
        self.dispatcher.get(Service::Iaas, &self.path("")).await
    }

    /// Retrieve a VPC by name or id
    pub async fn get(&self, vpc: &str) -> Result<Record> {
        self.resolve(vpc).await
    }

    /// Retrieve the VPC's default network ACL
    pub async fn default_network_acl(&self, vpc: &str) -> Result<Record> {
        let id = self.resolve_id(vpc).await?;
        debug!("Fetching default network ACL for VPC {}", id);

        let path = self.path(&format!("/{}/default_network_acl", encode_segment(&id)));
        self.dispatcher.get(Service::Iaas, &path).await
    }

    /// Retrieve the VPC's default security group
    pub async fn default_security_group(&self, vpc: &str) -> Result<Record> {
        let id = self.resolve_id(vpc).await?;
        debug!("Fetching default security group for VPC {}", id);

        let path = self.path(&format!("/{}/default_security_group", encode_segment(&id)));
        self.dispatcher.get(Service::Iaas, &path).await
    }

    /// Create a VPC
    ///
    /// `address_prefix_management` defaults to `auto` and `classic_access`
    /// to `false`. A named resource group is resolved to its id first; if
    /// that fails, no VPC is created.
    pub async fn create(&self, options: &CreateVpc) -> Result<Record> {
        options.validate()?;

        let resource_group_id = match options.resource_group.as_deref() {
            Some(group) => Some(ResourceGroups::new(self.dispatcher).resolve_id(group).await?),
            None => None,
        };

        let payload = serde_json::to_value(options.to_prototype(resource_group_id)?)?;
        let vpc = self.dispatcher.post(Service::Iaas, &self.path(""), &payload).await?;

        info!(
            "Created VPC {}",
            vpc.get("id").and_then(|v| v.as_str()).unwrap_or("<unknown>")
        );
        Ok(vpc)
    }

    /// Delete a VPC by name or id
    pub async fn delete(&self, vpc: &str) -> Result<Record> {
        let id = self.resolve_id(vpc).await?;
        debug!("Deleting VPC {}", id);

        let path = self.path(&format!("/{}", encode_segment(&id)));
        let outcome = self.dispatcher.delete(Service::Iaas, &path).await?;

        info!("Deleted VPC {}", id);
        Ok(outcome)
    }
}

impl<T: Transport> ResourceLookup for Vpcs<'_, T> {
    fn kind(&self) -> &'static str {
        "VPC"
    }

    async fn get_by_name(&self, name: &str) -> Result<Record> {
        let vpcs = list_field(self.list().await?, "vpcs")?;
        select_by_name(self.kind(), name, vpcs, self.dispatcher.context().ambiguity())
    }

    async fn get_by_id(&self, id: &str) -> Result<Record> {
        debug!("Fetching VPC with ID {}", id);
        let path = self.path(&format!("/{}", encode_segment(id)));
        self.dispatcher.get(Service::Iaas, &path).await
    }
}
