use super::{confirm_delete, connect};
use crate::display::{print_record, print_records, print_success, Column};
use crate::{config::Config, Result, VpcCommands};
use clap::Args;
use ibmcloud_core::CreateVpc;

const COLUMNS: &[Column] = &[
    Column::new("Name", "name"),
    Column::new("ID", "id"),
    Column::new("Status", "status"),
    Column::new("Classic", "classic_access"),
    Column::new("Resource Group", "resource_group.name"),
];

/// Options for `ibmc vpc create`
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// VPC name
    #[arg(long)]
    pub name: Option<String>,
    /// Resource group (name or id)
    #[arg(long)]
    pub resource_group: Option<String>,
    /// `auto` or `manual`
    #[arg(long)]
    pub address_prefix_management: Option<String>,
    /// Allow classic infrastructure access
    #[arg(long)]
    pub classic_access: bool,
}

impl From<CreateArgs> for CreateVpc {
    fn from(args: CreateArgs) -> Self {
        CreateVpc {
            name: args.name,
            resource_group: args.resource_group,
            address_prefix_management: args.address_prefix_management,
            classic_access: Some(args.classic_access),
        }
    }
}

pub async fn handle(action: VpcCommands, config: &Config, json: bool) -> Result<()> {
    let client = connect(config).await?;
    let vpcs = client.vpcs();

    match action {
        VpcCommands::List => print_records(&vpcs.list().await?, "vpcs", COLUMNS, json),
        VpcCommands::Get { vpc } => print_record(&vpcs.get(&vpc).await?, json),
        VpcCommands::DefaultAcl { vpc } => {
            print_record(&vpcs.default_network_acl(&vpc).await?, json)
        }
        VpcCommands::DefaultSecurityGroup { vpc } => {
            print_record(&vpcs.default_security_group(&vpc).await?, json)
        }
        VpcCommands::Create(args) => {
            let vpc = vpcs.create(&args.into()).await?;

            print_success("VPC created");
            print_record(&vpc, json)
        }
        VpcCommands::Delete { vpc, yes } => {
            if !confirm_delete("VPC", &vpc, yes)? {
                return Ok(());
            }

            vpcs.delete(&vpc).await?;
            print_success(&format!("VPC {} deleted", vpc));
            Ok(())
        }
    }
}
