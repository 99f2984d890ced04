use crate::display::{print_success, print_warning};
use crate::{config::Config, CliError, Result};
use dialoguer::{Input, Password, Select};
use ibmcloud_api::{transport::DEFAULT_REGION, IbmCloudClient};
use log::debug;

/// Handles the `init` command: interactive first-time setup.
///
/// Prompts for an IAM API key and a region, saves them to
/// `~/.ibmc/config.toml`, then checks the key by listing resource groups.
/// A failed check is reported but does not undo the saved configuration.
pub async fn handle(config: &mut Config) -> Result<()> {
    println!("IBM Cloud CLI initialization");
    println!("Setting up your configuration...\n");

    let api_key = match config.api_key() {
        Some(existing_key) => {
            let use_existing = Select::new()
                .with_prompt("API key already configured. Use existing key?")
                .items(&["Yes, use existing", "No, enter new key"])
                .default(0)
                .interact()?;

            if use_existing == 0 {
                existing_key
            } else {
                get_api_key_from_user()?
            }
        }
        None => get_api_key_from_user()?,
    };
    config.set_api_key(&api_key);

    let region: String = Input::new()
        .with_prompt("Region")
        .default(config.region().unwrap_or_else(|| DEFAULT_REGION.to_string()))
        .interact_text()?;
    config.set_region(region.trim());

    debug!("Saving config to {}", config.path().display());
    config.save()?;

    println!("\nTesting API connection...");
    match test_api_connection(config).await {
        Ok(count) => print_success(&format!("API connection successful ({} resource groups)", count)),
        Err(e) => {
            print_warning(&format!("API connection failed: {}", e));
            println!("You can continue, but commands will fail until the key is fixed.");
        }
    }

    print_success(&format!(
        "Configuration saved to: {}",
        config.path().display()
    ));
    println!("\nYou can now use 'ibmc vpc ls' to list your VPCs.");

    Ok(())
}

/// Get API key from user input
fn get_api_key_from_user() -> Result<String> {
    println!("Please enter your IBM Cloud API key.");
    println!("You can create one at: https://cloud.ibm.com/iam/apikeys");

    let api_key: String = Password::new()
        .with_prompt("API Key")
        .allow_empty_password(false)
        .interact()?;

    if api_key.trim().is_empty() {
        return Err(CliError::InvalidInput("API key cannot be empty".to_string()));
    }

    Ok(api_key.trim().to_string())
}

async fn test_api_connection(config: &Config) -> Result<usize> {
    let client = IbmCloudClient::from_config(config).await?;
    let groups = client.resource_groups().list().await?;

    Ok(groups
        .get("resources")
        .and_then(|r| r.as_array())
        .map_or(0, Vec::len))
}
