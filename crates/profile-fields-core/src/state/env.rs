use crate::SharedString;
use std::fmt;

/// Running environment selected with `--env=`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Env {
    /// Local development, with pretty logs.
    #[default]
    Dev,
    /// Production, with JSON logs.
    Prod,
    /// Any other named environment, such as `staging`.
    Custom(SharedString),
}

impl Env {
    /// Picks the env from the last `--env=` argument, or `dev` if there is none.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        args.into_iter()
            .filter_map(|arg| arg.strip_prefix("--env=").map(Self::from))
            .last()
            .unwrap_or_default()
    }

    /// Returns `true` for [`Env::Dev`].
    #[inline]
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    /// Returns `true` for [`Env::Prod`].
    #[inline]
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }

    /// Name used for the `config.{env}.toml` file.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for Env {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Env {
    fn from(name: &str) -> Self {
        match name {
            "dev" => Self::Dev,
            "prod" => Self::Prod,
            _ => Self::Custom(name.to_owned().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Env;

    #[test]
    fn it_parses_env_args() {
        let args = ["app", "--env=prod"].map(String::from);
        assert!(Env::from_args(args).is_prod());
        assert_eq!(Env::from_args(Vec::new()), Env::Dev);

        let args = ["--env=dev", "--env=staging", "--verbose"].map(String::from);
        let env = Env::from_args(args);
        assert_eq!(env, Env::Custom("staging".into()));
        assert_eq!(env.to_string(), "staging");
    }
}
