use super::connect;
use crate::display::{print_record, print_records, Column};
use crate::{config::Config, Result, SubnetCommands};

const COLUMNS: &[Column] = &[
    Column::new("Name", "name"),
    Column::new("ID", "id"),
    Column::new("CIDR", "ipv4_cidr_block"),
    Column::new("Zone", "zone.name"),
    Column::new("VPC", "vpc.name"),
    Column::new("Status", "status"),
];

pub async fn handle(action: SubnetCommands, config: &Config, json: bool) -> Result<()> {
    let client = connect(config).await?;
    let subnets = client.subnets();

    match action {
        SubnetCommands::List => print_records(&subnets.list().await?, "subnets", COLUMNS, json),
        SubnetCommands::Get { subnet } => print_record(&subnets.get(&subnet).await?, json),
    }
}
