use crate::errors::{CloudError, Result};

/// Fail with `MissingArguments` naming every absent field, in the given order.
///
/// Blank strings count as absent.
pub fn check_required(fields: &[(&str, Option<&str>)]) -> Result<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CloudError::MissingArguments(missing))
    }
}
