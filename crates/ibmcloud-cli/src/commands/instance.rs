use super::{confirm_delete, connect};
use crate::display::{print_record, print_records, print_success, Column};
use crate::{config::Config, InstanceCommands, Result};
use clap::Args;
use ibmcloud_core::CreateInstance;
use ibmcloud_utils::parse_list;

const COLUMNS: &[Column] = &[
    Column::new("Name", "name"),
    Column::new("ID", "id"),
    Column::new("Status", "status"),
    Column::new("Profile", "profile.name"),
    Column::new("Zone", "zone.name"),
    Column::new("VPC", "vpc.name"),
];

const PROFILE_COLUMNS: &[Column] = &[
    Column::new("Name", "name"),
    Column::new("Family", "family"),
    Column::new("vCPU", "vcpu_count.value"),
    Column::new("Memory (GB)", "memory.value"),
];

/// Options for `ibmc instance create`
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Instance name
    #[arg(long)]
    pub name: Option<String>,
    /// Image id
    #[arg(long)]
    pub image: Option<String>,
    /// Profile name, e.g. bx2-2x8
    #[arg(long)]
    pub profile: Option<String>,
    /// Zone name, e.g. us-south-1
    #[arg(long)]
    pub zone: Option<String>,
    /// Subnet of the primary network interface (name or id)
    #[arg(long)]
    pub subnet: Option<String>,
    /// VPC (name or id)
    #[arg(long)]
    pub vpc: Option<String>,
    /// Resource group (name or id)
    #[arg(long)]
    pub resource_group: Option<String>,
    /// Comma-separated SSH key ids
    #[arg(long)]
    pub keys: Option<String>,
    /// Cloud-init user data
    #[arg(long)]
    pub user_data: Option<String>,
}

impl CreateArgs {
    pub fn into_options(self) -> Result<CreateInstance> {
        let keys = match self.keys {
            Some(keys) => Some(parse_list(&keys)?),
            None => None,
        };

        Ok(CreateInstance {
            name: self.name,
            keys,
            profile: self.profile,
            resource_group: self.resource_group,
            user_data: self.user_data,
            vpc: self.vpc,
            image: self.image,
            pni_subnet: self.subnet,
            zone: self.zone,
        })
    }
}

pub async fn handle(action: InstanceCommands, config: &Config, json: bool) -> Result<()> {
    let client = connect(config).await?;
    let instances = client.instances();

    match action {
        InstanceCommands::List => print_records(&instances.list().await?, "instances", COLUMNS, json),
        InstanceCommands::Get { instance } => print_record(&instances.get(&instance).await?, json),
        InstanceCommands::Profiles => print_records(
            &instances.list_profiles().await?,
            "profiles",
            PROFILE_COLUMNS,
            json,
        ),
        InstanceCommands::Profile { name } => {
            print_record(&instances.get_profile(&name).await?, json)
        }
        InstanceCommands::Create(args) => {
            let options = args.into_options()?;
            let instance = instances.create(&options).await?;

            print_success("Instance created");
            print_record(&instance, json)
        }
        InstanceCommands::Delete { instance, yes } => {
            if !confirm_delete("instance", &instance, yes)? {
                return Ok(());
            }

            instances.delete(&instance).await?;
            print_success(&format!("Instance {} deleted", instance));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_into_options() {
        let args = CreateArgs {
            name: Some("web-1".to_string()),
            image: Some("r006-image".to_string()),
            profile: Some("bx2-2x8".to_string()),
            zone: Some("us-south-1".to_string()),
            subnet: Some("web-subnet".to_string()),
            vpc: None,
            resource_group: None,
            keys: Some("key-1, key-2,".to_string()),
            user_data: None,
        };

        let options = args.into_options().unwrap();
        assert_eq!(options.pni_subnet.as_deref(), Some("web-subnet"));
        assert_eq!(
            options.keys,
            Some(vec!["key-1".to_string(), "key-2".to_string()])
        );
        assert!(options.validate().is_ok());
    }
}
