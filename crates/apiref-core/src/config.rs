//! Site and mining configuration (`apiref.toml`) parsing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "apiref.toml";

/// The complete apiref.toml configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Link targets and rendering options.
    pub site: SiteConfig,

    /// External source-mining commands.
    pub mining: MiningConfig,
}

impl Config {
    /// Load a config from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a config from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Where rendered links point and how rendered types look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page holding the top-level decoder anchors.
    pub decoders_page: String,

    /// Page holding the instance method anchors.
    pub methods_page: String,

    /// Page the type word links to inside rendered types.
    pub type_page: String,

    /// The word hyperlinked inside rendered types.
    pub type_word: String,

    /// Inline color for rendered types.
    pub type_color: String,

    /// Fence tag used when wrapping bare examples.
    pub code_language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            decoders_page: "/api.html".to_string(),
            methods_page: "/Decoder.html".to_string(),
            type_page: "/Decoder.html".to_string(),
            type_word: "Decoder".to_string(),
            type_color: "#267f99".to_string(),
            code_language: "ts".to_string(),
        }
    }
}

/// Shell commands that produce the source reports, one per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Command reporting exported decoders.
    pub decoders_command: String,

    /// Command reporting the decoder class methods.
    pub methods_command: String,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            decoders_command: "node bin/linenos-decoders.js".to_string(),
            methods_command: "node bin/linenos-Decoder-class.js".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.site, SiteConfig::default());
        assert_eq!(config.site.decoders_page, "/api.html");
        assert_eq!(config.mining.methods_command, "node bin/linenos-Decoder-class.js");
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
[site]
decoders_page = "/reference.html"
code_language = "tsx"
"#,
        )
        .unwrap();
        assert_eq!(config.site.decoders_page, "/reference.html");
        assert_eq!(config.site.code_language, "tsx");
        assert_eq!(config.site.methods_page, "/Decoder.html");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::parse("[site]\nfoo = 1\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[mining]\ndecoders_command = \"cat decoders.json\"\n").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.mining.decoders_command, "cat decoders.json");

        let missing = Config::from_path(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
