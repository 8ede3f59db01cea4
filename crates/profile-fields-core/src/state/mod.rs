//! Application scoped state.

use crate::error::Error;
use std::path::Path;
use toml::Table;

mod config;
mod env;

pub use self::env::Env;

/// A state is a record of the env and config.
#[derive(Debug, Clone)]
pub struct State {
    /// Environment.
    env: Env,
    /// Configuration.
    config: Table,
}

impl State {
    /// Creates a new instance with an empty config.
    #[inline]
    pub fn new(env: Env) -> Self {
        Self {
            env,
            config: Table::new(),
        }
    }

    /// Creates a new instance with the config.
    #[inline]
    pub fn with_config(env: Env, config: Table) -> Self {
        Self { env, config }
    }

    /// Picks the env from the `--env=` argument and loads its config from the directory.
    pub fn from_args(
        args: impl IntoIterator<Item = String>,
        config_dir: &Path,
    ) -> Result<Self, Error> {
        let mut state = Self::new(Env::from_args(args));
        state.load_config(config_dir)?;
        Ok(state)
    }

    /// Loads the `config.{env}.toml` file in the directory.
    pub fn load_config(&mut self, config_dir: &Path) -> Result<(), Error> {
        let env = self.env.as_str();
        let config_file = config_dir.join(format!("config.{env}.toml"));
        self.config = config::read_config_file(&config_file, env)?;
        Ok(())
    }

    /// Returns the env.
    #[inline]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Returns a reference to the config.
    #[inline]
    pub fn config(&self) -> &Table {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::{Env, State};
    use crate::extension::TomlTableExt;
    use std::{env, fs};

    #[test]
    fn it_loads_env_config() {
        let config_dir = env::temp_dir().join(format!("profile-fields-{}", std::process::id()));
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.prod.toml"),
            "[profile-fields]\nendpoint = \"/json/users/me/profile_data\"\n",
        )
        .unwrap();

        let mut state = State::new(Env::from("prod"));
        state.load_config(&config_dir).unwrap();
        assert!(state.env().is_prod());
        assert_eq!(
            state
                .config()
                .get_table("profile-fields")
                .and_then(|config| config.get_str("endpoint")),
            Some("/json/users/me/profile_data")
        );

        let args = ["app", "--env=prod"].map(String::from);
        let state = State::from_args(args, &config_dir).unwrap();
        assert_eq!(state.env(), &Env::Prod);
        assert!(state.config().contains_key("profile-fields"));

        let args = ["app", "--env=staging"].map(String::from);
        assert!(State::from_args(args, &config_dir).is_err());
        fs::remove_dir_all(&config_dir).ok();
    }
}
