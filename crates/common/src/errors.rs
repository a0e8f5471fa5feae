use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderRegistryError {
    #[error("There must be at least one provider")]
    EmptySource,
    #[error("'{0}' is not a unique name")]
    DuplicateName(String),
    #[error("'{0}' is not a valid provider name, use letters, digits, '-' and '_'")]
    InvalidName(String),
}
