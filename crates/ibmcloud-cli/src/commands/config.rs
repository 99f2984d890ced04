use crate::display::{print_info, print_success};
use crate::{config::Config, ConfigCommands, Result};

/// Handles the `config` command.
///
/// `set` and `unset` write the file immediately; `get` prints the stored value
/// without applying environment overrides.
pub fn handle(action: ConfigCommands, config: &mut Config) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", config.show_config());
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            config.set_value(&key, &value)?;
            config.save()?;
            print_success(&format!("{} updated", key));
            Ok(())
        }
        ConfigCommands::Get { key } => {
            match config.get_value(&key)? {
                Some(value) => println!("{}", value),
                None => print_info(&format!("{} is not set", key)),
            }
            Ok(())
        }
        ConfigCommands::Unset { key } => {
            config.unset_value(&key)?;
            config.save()?;
            print_success(&format!("{} removed", key));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", config.path().display());
            Ok(())
        }
    }
}
