use crate::context::encode_segment;
use crate::dispatcher::Dispatcher;
use crate::errors::Result;
use crate::resolver::{list_field, record_field, select_by_name, ResourceLookup};
use crate::resources::ResourceGroups;
use crate::transport::{Service, Transport};
use ibmcloud_core::{resource_plan_alias, CloudError, CreateResourceInstance, Record};
use ibmcloud_utils::is_valid_uuid;
use log::{debug, info};

const PATH: &str = "/v2/resource_instances";
const SERVICE_INSTANCE_TYPE: &str = "service_instance";

/// Provisioned service instances (`/v2/resource_instances`)
///
/// Resource instances are addressed by `guid` rather than `id`.
pub struct ResourceInstances<'a, T> {
    dispatcher: Dispatcher<'a, T>,
}

impl<'a, T: Transport> ResourceInstances<'a, T> {
    pub fn new(dispatcher: Dispatcher<'a, T>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve service instances, optionally restricted to one resource group
    pub async fn list(&self, resource_group: Option<&str>) -> Result<Record> {
        let resource_group_id = match resource_group {
            Some(group) => Some(ResourceGroups::new(self.dispatcher).resolve_id(group).await?),
            None => None,
        };

        let mut query = Vec::new();
        if let Some(id) = resource_group_id.as_deref() {
            query.push(("resource_group_id", id));
        }
        query.push(("type", SERVICE_INSTANCE_TYPE));

        debug!("Fetching resource instances");
        let path = self.dispatcher.context().controller_path(PATH, &query);
        self.dispatcher.get(Service::ResourceController, &path).await
    }

    /// Retrieve a resource instance by name or guid
    pub async fn get(&self, instance: &str) -> Result<Record> {
        self.resolve(instance).await
    }

    /// Retrieve a resource instance by guid
    pub async fn get_by_guid(&self, guid: &str) -> Result<Record> {
        debug!("Fetching resource instance with GUID {}", guid);
        let path = format!("{}/{}", PATH, encode_segment(guid));
        self.dispatcher.get(Service::ResourceController, &path).await
    }

    /// Provision a resource instance
    ///
    /// Returns the existing instance untouched when one already carries the
    /// requested name. `resource_plan` may be a plan id or a known alias.
    pub async fn create(&self, options: &CreateResourceInstance) -> Result<Record> {
        options.validate()?;

        let plan = options.resource_plan.as_deref().unwrap_or_default();
        let plan_id = resolve_plan(plan)?;

        let name = options.name.as_deref().unwrap_or_default();
        match self.get_by_name(name).await {
            Ok(existing) => {
                info!("Resource instance {} already exists", name);
                return Ok(existing);
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        let groups = ResourceGroups::new(self.dispatcher);
        let resource_group_id = match options.resource_group.as_deref() {
            Some(group) => groups.resolve_id(group).await?,
            None => record_field(&groups.get_default().await?, "id", groups.kind())?,
        };

        let payload = serde_json::to_value(options.to_prototype(plan_id, resource_group_id)?)?;
        let instance = self
            .dispatcher
            .post(Service::ResourceController, PATH, &payload)
            .await?;

        info!("Created resource instance {}", name);
        Ok(instance)
    }

    /// Delete a resource instance by name or guid
    pub async fn delete(&self, instance: &str) -> Result<Record> {
        let record = self.resolve(instance).await?;
        let guid = record_field(&record, "guid", self.kind())?;

        debug!("Deleting resource instance with GUID {}", guid);
        let path = format!("{}/{}", PATH, encode_segment(&guid));
        let outcome = self
            .dispatcher
            .delete(Service::ResourceController, &path)
            .await?;

        info!("Deleted resource instance {}", instance);
        Ok(outcome)
    }
}

impl<T: Transport> ResourceLookup for ResourceInstances<'_, T> {
    fn kind(&self) -> &'static str {
        "resource instance"
    }

    async fn get_by_name(&self, name: &str) -> Result<Record> {
        debug!("Fetching resource instance with name {}", name);
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

    async fn get_by_id(&self, guid: &str) -> Result<Record> {
        self.get_by_guid(guid).await
    }
}

/// Map a plan reference to a plan id
fn resolve_plan(plan: &str) -> Result<String> {
    if is_valid_uuid(plan) {
        return Ok(plan.to_string());
    }

    resource_plan_alias(plan).map(String::from).ok_or_else(|| {
        CloudError::InvalidArgument(format!(
            "resource_plan '{}' is neither a plan id nor a known alias",
            plan
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::errors::ApiError;
    use crate::testing::MockTransport;
    use reqwest::header::HeaderMap;
    use reqwest::Method;
    use serde_json::json;

    const DNS_PLAN: &str = "dc1460a6-37bd-4e2b-8180-d0f86ff39baa";

    fn context() -> Context {
        Context::with_headers(HeaderMap::new())
    }

    fn dns_options() -> CreateResourceInstance {
        CreateResourceInstance {
            name: Some("my-dns".to_string()),
            resource_plan: Some("dns".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_plan() {
        assert_eq!(resolve_plan("dns").unwrap(), DNS_PLAN);
        assert_eq!(
            resolve_plan("744bfc56-d12c-4866-88d5-dac9139e0e5d").unwrap(),
            "744bfc56-d12c-4866-88d5-dac9139e0e5d"
        );

        match resolve_plan("lite").unwrap_err() {
            ApiError::Cloud(CloudError::InvalidArgument(_)) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_filters_service_instances() {
        let context = context();
        let transport = MockTransport::new()
            .on(
                Method::GET,
                "/v2/resource_groups?name=prod",
                200,
                json!({"resources": [{"id": "rg-1", "name": "prod"}]}),
            )
            .on(
                Method::GET,
                "/v2/resource_instances?resource_group_id=rg-1&type=service_instance",
                200,
                json!({"resources": []}),
            );
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let body = instances.list(Some("prod")).await.unwrap();
        assert_eq!(body, json!({"resources": []}));
        assert_eq!(
            transport.calls()[1].path,
            "/v2/resource_instances?resource_group_id=rg-1&type=service_instance"
        );
    }

    #[tokio::test]
    async fn test_get_falls_back_to_guid() {
        let context = context();
        let transport = MockTransport::new()
            .on(
                Method::GET,
                "/v2/resource_instances?name=5e6f",
                200,
                json!({"resources": []}),
            )
            .on(
                Method::GET,
                "/v2/resource_instances/5e6f",
                200,
                json!({"guid": "5e6f", "name": "my-dns"}),
            );
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let record = instances.get("5e6f").await.unwrap();
        assert_eq!(record["name"], "my-dns");
    }

    #[tokio::test]
    async fn test_missing_guid_is_not_found() {
        let context = context();
        let transport = MockTransport::new().on(
            Method::GET,
            "/v2/resource_instances/5e6f",
            404,
            json!({"status_code": 404, "error_code": "RC-ServiceInstanceNotFound", "message": "not found"}),
        );
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let err = instances.get_by_guid("5e6f").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_uses_default_group_and_target() {
        let context = context();
        let transport = MockTransport::new()
            .on(
                Method::GET,
                "/v2/resource_instances?name=my-dns",
                200,
                json!({"resources": []}),
            )
            .on(
                Method::GET,
                "/v2/resource_groups?default=true",
                200,
                json!({"resources": [{"id": "rg-default", "name": "Default"}]}),
            )
            .on(
                Method::POST,
                "/v2/resource_instances",
                201,
                json!({"guid": "5e6f", "name": "my-dns"}),
            );
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let created = instances.create(&dns_options()).await.unwrap();
        assert_eq!(created["guid"], "5e6f");

        let post = transport
            .calls()
            .into_iter()
            .find(|call| call.method == Method::POST)
            .unwrap();
        assert_eq!(post.service, Service::ResourceController);
        assert_eq!(
            post.body,
            Some(json!({
                "name": "my-dns",
                "resource_plan_id": DNS_PLAN,
                "target": "bluemix-global",
                "resource_group": "rg-default"
            }))
        );
    }

    #[tokio::test]
    async fn test_create_returns_existing_instance() {
        let context = context();
        let transport = MockTransport::new().on(
            Method::GET,
            "/v2/resource_instances?name=my-dns",
            200,
            json!({"resources": [{"guid": "5e6f", "name": "my-dns"}]}),
        );
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let record = instances.create(&dns_options()).await.unwrap();
        assert_eq!(record["guid"], "5e6f");
        assert!(transport.paths(Method::POST).is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_plan_before_any_call() {
        let context = context();
        let transport = MockTransport::new();
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let mut options = dns_options();
        options.resource_plan = Some("gold".to_string());

        let err = instances.create(&options).await.unwrap_err();
        assert_eq!(err.code(), Some("invalid_argument"));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_missing_name_and_plan() {
        let context = context();
        let transport = MockTransport::new();
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let err = instances
            .create(&CreateResourceInstance::default())
            .await
            .unwrap_err();
        match err {
            ApiError::Cloud(CloudError::MissingArguments(keys)) => {
                assert_eq!(keys, vec!["name", "resource_plan"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_guid() {
        let context = context();
        let transport = MockTransport::new()
            .on(
                Method::GET,
                "/v2/resource_instances?name=my-dns",
                200,
                json!({"resources": [{"guid": "5e6f", "name": "my-dns"}]}),
            )
            .on_empty(Method::DELETE, "/v2/resource_instances/5e6f", 204);
        let instances = ResourceInstances::new(Dispatcher::new(&transport, &context));

        let outcome = instances.delete("my-dns").await.unwrap();
        assert_eq!(outcome, json!({"status": "deleted"}));
    }
}
