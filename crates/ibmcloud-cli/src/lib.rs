//! # IBM Cloud CLI
//!
//! Command-line interface (`ibmc`) for IBM Cloud VPC infrastructure and the
//! Resource Controller.
//! This crate provides the CLI structure, argument parsing, and command routing.

pub mod commands;
pub mod config;
pub mod display;

// Re-export common types
pub use config::Config;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Application-level errors for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Api(#[from] ibmcloud_api::ApiError),

    #[error("Utils error: {0}")]
    Utils(#[from] ibmcloud_utils::UtilsError),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input error: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Main CLI struct
#[derive(Parser)]
#[command(name = "ibmc")]
#[command(about = "A CLI for IBM Cloud VPC and resource instances")]
#[command(version)]
pub struct Cli {
    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Manage virtual server instances
    Instance {
        #[command(subcommand)]
        action: InstanceCommands,
    },
    /// Manage VPCs
    Vpc {
        #[command(subcommand)]
        action: VpcCommands,
    },
    /// Inspect subnets
    Subnet {
        #[command(subcommand)]
        action: SubnetCommands,
    },
    /// Inspect resource groups
    ResourceGroup {
        #[command(subcommand)]
        action: ResourceGroupCommands,
    },
    /// Manage provisioned service instances
    ResourceInstance {
        #[command(subcommand)]
        action: ResourceInstanceCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List instances
    #[command(alias = "ls")]
    List,
    /// Show an instance by name or id
    Get { instance: String },
    /// List instance profiles
    Profiles,
    /// Show an instance profile
    Profile { name: String },
    /// Create an instance
    Create(commands::instance::CreateArgs),
    /// Delete an instance by name or id
    #[command(alias = "rm")]
    Delete {
        instance: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum VpcCommands {
    /// List VPCs
    #[command(alias = "ls")]
    List,
    /// Show a VPC by name or id
    Get { vpc: String },
    /// Show the default network ACL of a VPC
    DefaultAcl { vpc: String },
    /// Show the default security group of a VPC
    DefaultSecurityGroup { vpc: String },
    /// Create a VPC
    Create(commands::vpc::CreateArgs),
    /// Delete a VPC by name or id
    #[command(alias = "rm")]
    Delete {
        vpc: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SubnetCommands {
    /// List subnets
    #[command(alias = "ls")]
    List,
    /// Show a subnet by name or id
    Get { subnet: String },
}

#[derive(Subcommand)]
pub enum ResourceGroupCommands {
    /// List resource groups
    #[command(alias = "ls")]
    List,
    /// Show a resource group by name or id
    Get { group: String },
    /// Show the account's default resource group
    Default,
}

#[derive(Subcommand)]
pub enum ResourceInstanceCommands {
    /// List service instances
    #[command(alias = "ls")]
    List {
        /// Only instances in this resource group (name or id)
        #[arg(long)]
        resource_group: Option<String>,
    },
    /// Show a service instance by name or guid
    Get { instance: String },
    /// Provision a service instance
    Create(commands::resource_instance::CreateArgs),
    /// Delete a service instance by name or guid
    #[command(alias = "rm")]
    Delete {
        instance: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set configuration value (`section.key`)
    Set {
        /// Configuration key, e.g. api.region
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get configuration value (`section.key`)
    Get {
        /// Configuration key, e.g. resolver.ambiguity
        key: String,
    },
    /// Remove configuration value
    Unset {
        /// Configuration key
        key: String,
    },
    /// Show configuration file path
    Path,
}

/// Route `log` records from the library crates to stderr, filtered by `RUST_LOG`
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init in the same process is harmless; ignore it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Main CLI runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = Config::new()?;
    let json = cli.json;

    match cli.command {
        Commands::Init => commands::init::handle(&mut config).await,
        Commands::Instance { action } => commands::instance::handle(action, &config, json).await,
        Commands::Vpc { action } => commands::vpc::handle(action, &config, json).await,
        Commands::Subnet { action } => commands::subnet::handle(action, &config, json).await,
        Commands::ResourceGroup { action } => {
            commands::resource_group::handle(action, &config, json).await
        }
        Commands::ResourceInstance { action } => {
            commands::resource_instance::handle(action, &config, json).await
        }
        Commands::Config { action } => commands::config::handle(action, &mut config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete_with_yes() {
        let cli = Cli::try_parse_from(["ibmc", "instance", "rm", "web-1", "-y"]).unwrap();
        match cli.command {
            Commands::Instance {
                action: InstanceCommands::Delete { instance, yes },
            } => {
                assert_eq!(instance, "web-1");
                assert!(yes);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["ibmc", "vpc", "ls", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Vpc {
                action: VpcCommands::List
            }
        ));
    }
}
