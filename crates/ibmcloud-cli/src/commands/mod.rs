pub mod config;
pub mod init;
pub mod instance;
pub mod resource_group;
pub mod resource_instance;
pub mod subnet;
pub mod vpc;

use crate::config::Config;
use crate::display::{print_info, prompt_confirm};
use crate::Result;
use ibmcloud_api::IbmCloudClient;
use log::debug;

/// Authenticate with the configured credentials and open a client
pub async fn connect(config: &Config) -> Result<IbmCloudClient> {
    debug!("Connecting with config at {}", config.path().display());
    IbmCloudClient::from_config(config).await
}

/// Ask before deleting unless `yes` was given
pub fn confirm_delete(kind: &str, reference: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    let confirmed = prompt_confirm(&format!("Delete {} '{}'?", kind, reference), false)?;
    if !confirmed {
        print_info("Cancelled.");
    }
    Ok(confirmed)
}
