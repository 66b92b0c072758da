//! Error types for registry construction and source mining
//!
//! Every error here is fatal for a documentation build: there is no
//! partial-success mode. Rendering itself never fails once a registry exists.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::Table;

/// Result alias for fallible apiref operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error for building a registry
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Mining(#[from] MiningError),
}

/// Errors that can occur when loading `apiref.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration integrity errors in the reference data
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read reference data '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{table} entry '{name}' is missing required field '{field}'")]
    MissingField {
        table: Table,
        name: String,
        field: &'static str,
    },

    #[error("{table} entry '{name}' declares no signatures")]
    NoSignatures { table: Table, name: String },

    #[error("duplicate {table} entry '{name}'")]
    Duplicate { table: Table, name: String },

    #[error("alias '{alias}' of {table} '{primary}' collides with an existing entry")]
    AliasCollision {
        table: Table,
        alias: String,
        primary: String,
    },

    #[error("'{0}' is documented both as a decoder and as a method")]
    Overlap(String),

    #[error("{table} '{name}' not found in source code")]
    MissingFromSource { table: Table, name: String },
}

/// Failures of the external source-mining collaborator
#[derive(Error, Debug)]
pub enum MiningError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to read source report '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed source report from {origin}: {source}")]
    Malformed {
        origin: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_identifier() {
        let err = RegistryError::MissingFromSource {
            table: Table::Methods,
            name: "verify".to_string(),
        };
        assert_eq!(err.to_string(), "method 'verify' not found in source code");

        let err = Error::from(RegistryError::AliasCollision {
            table: Table::Decoders,
            alias: "hardcoded".to_string(),
            primary: "always".to_string(),
        });
        assert!(err.to_string().contains("'hardcoded'"));
        assert!(err.to_string().contains("'always'"));
    }

    #[test]
    fn test_failed_command_message() {
        let err = MiningError::Failed {
            command: "node bin/linenos-decoders.js".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`node bin/linenos-decoders.js` exited with exit status: 1: boom"
        );
    }
}
