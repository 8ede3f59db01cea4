use crate::error::Error;
use std::{fs, path::Path};
use toml::Table;

/// Reads the config from a local TOML file.
pub(super) fn read_config_file(config_file: &Path, env: &str) -> Result<Table, Error> {
    let data = fs::read_to_string(config_file).map_err(|err| {
        let config_file = config_file.display();
        Error::with_source(format!("fail to read the config file `{config_file}`"), err)
    })?;
    let config_table = data.parse::<Table>()?;
    if let Some(file_name) = config_file.file_name().and_then(|s| s.to_str()) {
        tracing::info!(env, "`{file_name}` loaded");
    }
    Ok(config_table)
}
