//! Implementation of the `apiref normalize` command.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

use apiref_core::doc::{normalize, CrossLinker};
use apiref_core::Config;

use crate::generate::{load_registry, SourceArgs};

/// Options for normalizing a text block.
#[derive(Debug)]
pub struct NormalizeOptions {
    /// Input file; stdin when `None`.
    pub file: Option<PathBuf>,
    /// Reference data to cross-link against.
    pub link: Option<SourceArgs>,
}

/// Normalize (and optionally cross-link) the input, returning the output text.
pub fn run(options: &NormalizeOptions, config: &Config) -> Result<String> {
    let input = match &options.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let mut text = normalize(&input);
    if let Some(source) = &options.link {
        let registry = load_registry(source, config)?;
        text = CrossLinker::new(&registry, &config.site).linkify(&text);
    }

    if !text.is_empty() {
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "\n\n  Accepts strings.\n\n\n  More info.\n\n").unwrap();

        let options = NormalizeOptions {
            file: Some(path),
            link: None,
        };
        let output = run(&options, &Config::default()).unwrap();
        assert_eq!(output, "Accepts strings.\n\nMore info.\n");
    }

    #[test]
    fn test_normalize_and_link() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let data = dir.path().join("decoders.toml");
        let decoders = dir.path().join("decoders.json");
        let methods = dir.path().join("methods.json");
        std::fs::write(&input, "    See `string` and `other`.\n").unwrap();
        std::fs::write(
            &data,
            "[[decoders]]\nname = \"string\"\nreturn_type = \"Decoder<string>\"\n",
        )
        .unwrap();
        std::fs::write(&decoders, r#"[{"name": "string"}]"#).unwrap();
        std::fs::write(&methods, "[]").unwrap();

        let options = NormalizeOptions {
            file: Some(input),
            link: Some(SourceArgs {
                data,
                decoders_report: Some(decoders),
                methods_report: Some(methods),
            }),
        };
        let output = run(&options, &Config::default()).unwrap();
        assert_eq!(output, "See [`string`](/api.html#string) and `other`.\n");
    }
}
