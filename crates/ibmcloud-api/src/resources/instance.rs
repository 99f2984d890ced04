use crate::context::encode_segment;
use crate::dispatcher::Dispatcher;
use crate::errors::Result;
use crate::resolver::{list_field, record_field, select_by_name, with_fallback, ResourceLookup};
use crate::resources::{ResourceGroups, Subnets, Vpcs};
use crate::transport::{Service, Transport};
use ibmcloud_core::{CreateInstance, Record};
use log::{debug, info};

/// Virtual server instances (`/v1/instances`)
pub struct Instances<'a, T> {
    dispatcher: Dispatcher<'a, T>,
}

impl<'a, T: Transport> Instances<'a, T> {
    pub fn new(dispatcher: Dispatcher<'a, T>) -> Self {
        Self { dispatcher }
    }

    fn path(&self, path: &str) -> String {
        self.dispatcher.context().iaas_path(path, &[])
    }

    /// Retrieve the instance list
    pub async fn list(&self) -> Result<Record> {
        debug!("Fetching instances");
        self.dispatcher
            .get(Service::Iaas, &self.path("/v1/instances"))
            .await
    }

    /// Retrieve an instance by name or id
    pub async fn get(&self, instance: &str) -> Result<Record> {
        self.resolve(instance).await
    }

    /// Retrieve all instance profiles
    pub async fn list_profiles(&self) -> Result<Record> {
        debug!("Fetching instance profiles");
        self.dispatcher
            .get(Service::Iaas, &self.path("/v1/instance/profiles"))
            .await
    }

    /// Retrieve an instance profile; profiles are addressed by name
    pub async fn get_profile(&self, name: &str) -> Result<Record> {
        debug!("Fetching instance profile {}", name);
        let path = self.path(&format!("/v1/instance/profiles/{}", encode_segment(name)));
        self.dispatcher.get(Service::Iaas, &path).await
    }

    /// Create an instance
    ///
    /// Required options are checked before anything is sent. The resource
    /// group, VPC and primary subnet may be given by name; each is resolved
    /// to an id and the first failure aborts the create.
    pub async fn create(&self, options: &CreateInstance) -> Result<Record> {
        options.validate()?;

        let resource_group_id = match options.resource_group.as_deref() {
            Some(group) => Some(ResourceGroups::new(self.dispatcher).resolve_id(group).await?),
            None => None,
        };

        let vpc_id = match options.vpc.as_deref() {
            Some(vpc) => Some(Vpcs::new(self.dispatcher).resolve_id(vpc).await?),
            None => None,
        };

        let subnet = options.pni_subnet.as_deref().unwrap_or_default();
        let subnet_id = Subnets::new(self.dispatcher).resolve_id(subnet).await?;

        let prototype = options.to_prototype(resource_group_id, vpc_id, subnet_id)?;
        let payload = serde_json::to_value(&prototype)?;

        let instance = self
            .dispatcher
            .post(Service::Iaas, &self.path("/v1/instances"), &payload)
            .await?;

        info!(
            "Created instance {}",
            instance.get("id").and_then(|v| v.as_str()).unwrap_or("<unknown>")
        );
        Ok(instance)
    }

    /// Delete an instance by name, falling back to deleting it by id
    pub async fn delete(&self, instance: &str) -> Result<Record> {
        with_fallback(
            self.kind(),
            instance,
            self.delete_by_name(instance),
            self.delete_by_id(instance),
        )
        .await
    }

    /// Delete an instance by id
    pub async fn delete_by_id(&self, id: &str) -> Result<Record> {
        debug!("Deleting instance with ID {}", id);
        let path = self.path(&format!("/v1/instances/{}", encode_segment(id)));
        let outcome = self.dispatcher.delete(Service::Iaas, &path).await?;

        info!("Deleted instance {}", id);
        Ok(outcome)
    }

    /// Delete the instance carrying `name`
    pub async fn delete_by_name(&self, name: &str) -> Result<Record> {
        let instance = self.get_by_name(name).await?;
        let id = record_field(&instance, "id", self.kind())?;
        self.delete_by_id(&id).await
    }
}

impl<T: Transport> ResourceLookup for Instances<'_, T> {
    fn kind(&self) -> &'static str {
        "instance"
    }

    async fn get_by_name(&self, name: &str) -> Result<Record> {
        let instances = list_field(self.list().await?, "instances")?;
        select_by_name(self.kind(), name, instances, self.dispatcher.context().ambiguity())
    }

    async fn get_by_id(&self, id: &str) -> Result<Record> {
        debug!("Fetching instance with ID {}", id);
        let path = self.path(&format!("/v1/instances/{}", encode_segment(id)));
        self.dispatcher.get(Service::Iaas, &path).await
    }
}
