use super::{confirm_delete, connect};
use crate::display::{print_record, print_records, print_success, Column};
use crate::{config::Config, ResourceInstanceCommands, Result};
use clap::Args;
use ibmcloud_core::CreateResourceInstance;

const COLUMNS: &[Column] = &[
    Column::new("Name", "name"),
    Column::new("GUID", "guid"),
    Column::new("State", "state"),
    Column::new("Region", "region_id"),
];

/// Options for `ibmc resource-instance create`
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Instance name
    pub name: String,
    /// Plan id, or an alias (`dns`, `object-storage`)
    #[arg(long)]
    pub plan: String,
    /// Resource group (name or id); defaults to the account default
    #[arg(long)]
    pub resource_group: Option<String>,
    /// Deployment target; defaults to bluemix-global
    #[arg(long)]
    pub target: Option<String>,
}

impl From<CreateArgs> for CreateResourceInstance {
    fn from(args: CreateArgs) -> Self {
        CreateResourceInstance {
            name: Some(args.name),
            resource_group: args.resource_group,
            resource_plan: Some(args.plan),
            target: args.target,
        }
    }
}

pub async fn handle(action: ResourceInstanceCommands, config: &Config, json: bool) -> Result<()> {
    let client = connect(config).await?;
    let instances = client.resource_instances();

    match action {
        ResourceInstanceCommands::List { resource_group } => print_records(
            &instances.list(resource_group.as_deref()).await?,
            "resources",
            COLUMNS,
            json,
        ),
        ResourceInstanceCommands::Get { instance } => {
            print_record(&instances.get(&instance).await?, json)
        }
        ResourceInstanceCommands::Create(args) => {
            let instance = instances.create(&args.into()).await?;

            print_success("Resource instance ready");
            print_record(&instance, json)
        }
        ResourceInstanceCommands::Delete { instance, yes } => {
            if !confirm_delete("resource instance", &instance, yes)? {
                return Ok(());
            }

            instances.delete(&instance).await?;
            print_success(&format!("Resource instance {} deleted", instance));
            Ok(())
        }
    }
}
