use super::connect;
use crate::display::{print_record, print_records, Column};
use crate::{config::Config, ResourceGroupCommands, Result};

const COLUMNS: &[Column] = &[
    Column::new("Name", "name"),
    Column::new("ID", "id"),
    Column::new("State", "state"),
    Column::new("Default", "default"),
];

pub async fn handle(action: ResourceGroupCommands, config: &Config, json: bool) -> Result<()> {
    let client = connect(config).await?;
    let groups = client.resource_groups();

    match action {
        ResourceGroupCommands::List => {
            print_records(&groups.list().await?, "resources", COLUMNS, json)
        }
        ResourceGroupCommands::Get { group } => print_record(&groups.get(&group).await?, json),
        ResourceGroupCommands::Default => print_record(&groups.get_default().await?, json),
    }
}
