use crate::context::encode_segment;
use crate::dispatcher::Dispatcher;
use crate::errors::Result;
use crate::resolver::{list_field, select_by_name, ResourceLookup};
use crate::transport::{Service, Transport};
use ibmcloud_core::Record;
use log::debug;

/// VPC subnets (`/v1/subnets`)
pub struct Subnets<'a, T> {
    dispatcher: Dispatcher<'a, T>,
}

impl<'a, T: Transport> Subnets<'a, T> {
    pub fn new(dispatcher: Dispatcher<'a, T>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve the subnet list
    pub async fn list(&self) -> Result<Record> {
        debug!("Fetching subnets");
        let path = self.dispatcher.context().iaas_path("/v1/subnets", &[]);
        self.dispatcher.get(Service::Iaas, &path).await
    }

    /// Retrieve a subnet by name or id
    pub async fn get(&self, subnet: &str) -> Result<Record> {
        self.resolve(subnet).await
    }
}

impl<T: Transport> ResourceLookup for Subnets<'_, T> {
    fn kind(&self) -> &'static str {
        "subnet"
    }

    async fn get_by_name(&self, name: &str) -> Result<Record> {
        let subnets = list_field(self.list().await?, "subnets")?;
        select_by_name(self.kind(), name, subnets, self.dispatcher.context().ambiguity())
    }

    async fn get_by_id(&self, id: &str) -> Result<Record> {
        debug!("Fetching subnet with ID {}", id);
        let path = self
            .dispatcher
            .context()
            .iaas_path(&format!("/v1/subnets/{}", encode_segment(id)), &[]);
        self.dispatcher.get(Service::Iaas, &path).await
    }
}
