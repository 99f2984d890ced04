use crate::context::encode_segment;
use crate::dispatcher::Dispatcher;
use crate::errors::Result;
use crate::resolver::{list_field, select_by_name, ResourceLookup};
use crate::transport::{Service, Transport};
use ibmcloud_core::{CloudError, Record};
use log::debug;

const PATH: &str = "/v2/resource_groups";

/// Account resource groups (`/v2/resource_groups`)
pub struct ResourceGroups<'a, T> {
    dispatcher: Dispatcher<'a, T>,
}

impl<'a, T: Transport> ResourceGroups<'a, T> {
    pub fn new(dispatcher: Dispatcher<'a, T>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve all resource groups of the account
    pub async fn list(&self) -> Result<Record> {
        debug!("Fetching resource groups");
        let path = self.dispatcher.context().controller_path(PATH, &[]);
        self.dispatcher.get(Service::ResourceController, &path).await
    }

    /// Retrieve a resource group by name or id
    pub async fn get(&self, group: &str) -> Result<Record> {
        self.resolve(group).await
    }

    /// The account's default resource group
    pub async fn get_default(&self) -> Result<Record> {
        debug!("Fetching default resource group");
        let path = self
            .dispatcher
            .context()
            .controller_path(PATH, &[("default", "true")]);
        let body = self.dispatcher.get(Service::ResourceController, &path).await?;

        list_field(body, "resources")?
            .into_iter()
            .next()
            .ok_or_else(|| CloudError::not_found(self.kind(), "default").into())
    }
}

impl<T: Transport> ResourceLookup for ResourceGroups<'_, T> {
    fn kind(&self) -> &'static str {
        "resource group"
    }

    async fn get_by_name(&self, name: &str) -> Result<Record> {
        debug!("Fetching resource group with name {}", name);
        let path = self
            .dispatcher
            .context()
            .controller_path(PATH, &[("name", name)]);
        let body = self.dispatcher.get(Service::ResourceController, &path).await?;

        select_by_name(
            self.kind(),
            name,
            list_field(body, "resources")?,
            self.dispatcher.context().ambiguity(),
        )
    }

    async fn get_by_id(&self, id: &str) -> Result<Record> {
        debug!("Fetching resource group with ID {}", id);
        let path = format!("{}/{}", PATH, encode_segment(id));
        self.dispatcher.get(Service::ResourceController, &path).await
    }
}
