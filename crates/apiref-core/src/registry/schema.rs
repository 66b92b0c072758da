//! Reference data file parsing.
//!
//! The data file lists entries as arrays of tables so that file order is
//! preserved:
//!
//! ```toml
//! [[decoders]]
//! name = "always"
//! section = "Constants"
//! type_params = ["T"]
//! params = [["value", "T"]]
//! return_type = "Decoder<T>"
//! aliases = ["hardcoded"]
//! ```
//!
//! A parameter is a `[name, type]` pair; an empty string stands for an
//! absent half. A missing `params` key (as opposed to `params = []`) marks a
//! plain value.

use serde::Deserialize;
use std::path::Path;

use super::types::{Param, RegistryEntry, Signature, Table};
use crate::error::RegistryError;

/// The complete reference data file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceData {
    /// Top-level decoders, in page order.
    #[serde(default)]
    pub decoders: Vec<RawEntry>,

    /// Decoder instance methods, in page order.
    #[serde(default)]
    pub methods: Vec<RawEntry>,
}

impl ReferenceData {
    /// Load reference data from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse reference data from a TOML string.
    pub fn parse(content: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(content)?)
    }

    /// Raw entries of one table.
    pub fn entries(&self, table: Table) -> &[RawEntry] {
        match table {
            Table::Decoders => &self.decoders,
            Table::Methods => &self.methods,
        }
    }
}

/// One entry as written in the data file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEntry {
    /// Entry name (required).
    pub name: String,

    /// Grouping label.
    #[serde(default)]
    pub section: Option<String>,

    /// Type parameters of the single signature.
    #[serde(default)]
    pub type_params: Option<Vec<String>>,

    /// Parameters of the single signature.
    #[serde(default)]
    pub params: Option<Vec<RawParam>>,

    /// Return type of the single signature.
    #[serde(default)]
    pub return_type: Option<String>,

    /// Overloads; takes precedence over the single-signature fields.
    #[serde(default)]
    pub signatures: Option<Vec<RawSignature>>,

    /// Alternate names.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Hand-written description.
    #[serde(default)]
    pub markdown: Option<String>,

    /// Usage example.
    #[serde(default)]
    pub example: Option<String>,
}

/// One overload as written in the data file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSignature {
    #[serde(default)]
    pub type_params: Option<Vec<String>>,

    #[serde(default)]
    pub params: Option<Vec<RawParam>>,

    #[serde(default)]
    pub return_type: Option<String>,
}

/// A `[name, type]` pair.
pub type RawParam = (String, String);

impl RawEntry {
    /// Normalize into the full entry shape.
    pub fn to_entry(&self, table: Table) -> Result<RegistryEntry, RegistryError> {
        let signatures = match &self.signatures {
            Some(raw) if raw.is_empty() => {
                return Err(RegistryError::NoSignatures {
                    table,
                    name: self.name.clone(),
                })
            }
            Some(raw) => raw
                .iter()
                .map(|sig| {
                    build_signature(
                        table,
                        &self.name,
                        sig.type_params.as_deref(),
                        sig.params.as_deref(),
                        sig.return_type.as_deref(),
                    )
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![build_signature(
                table,
                &self.name,
                self.type_params.as_deref(),
                self.params.as_deref(),
                self.return_type.as_deref(),
            )?],
        };

        Ok(RegistryEntry {
            name: self.name.clone(),
            section: self.section.clone(),
            signatures,
            aliases: self.aliases.clone(),
            alias_of: None,
            doc_text: self.markdown.clone(),
            example_text: self.example.clone(),
            source_url: None,
        })
    }
}

fn build_signature(
    table: Table,
    name: &str,
    type_params: Option<&[String]>,
    params: Option<&[RawParam]>,
    return_type: Option<&str>,
) -> Result<Signature, RegistryError> {
    let return_type = return_type.ok_or_else(|| RegistryError::MissingField {
        table,
        name: name.to_string(),
        field: "return_type",
    })?;

    Ok(Signature {
        type_params: type_params.map(<[String]>::to_vec).unwrap_or_default(),
        params: params.map(|params| params.iter().map(to_param).collect()),
        return_type: return_type.to_string(),
    })
}

fn to_param((name, ty): &RawParam) -> Param {
    let non_empty = |s: &String| (!s.is_empty()).then(|| s.clone());
    Param {
        name: non_empty(name),
        ty: non_empty(ty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_signature_is_normalized() {
        let data = ReferenceData::parse(
            r#"
[[decoders]]
name = "string"
section = "Strings"
return_type = "Decoder<string>"
example = "string.verify('hello')"
"#,
        )
        .unwrap();

        let entry = data.decoders[0].to_entry(Table::Decoders).unwrap();
        assert_eq!(entry.signatures.len(), 1);
        assert_eq!(entry.signatures[0].params, None);
        assert!(entry.signatures[0].type_params.is_empty());
        assert_eq!(entry.section.as_deref(), Some("Strings"));
        assert_eq!(entry.example_text.as_deref(), Some("string.verify('hello')"));
    }

    #[test]
    fn test_empty_params_is_callable() {
        let data = ReferenceData::parse(
            r#"
[[decoders]]
name = "never"
params = []
return_type = "Decoder<never>"
"#,
        )
        .unwrap();
        let entry = data.decoders[0].to_entry(Table::Decoders).unwrap();
        assert_eq!(entry.signatures[0].params, Some(vec![]));
        assert!(entry.is_callable());
    }

    #[test]
    fn test_overloads_take_precedence() {
        let data = ReferenceData::parse(
            r#"
[[methods]]
name = "pipe"
type_params = ["V"]

[[methods.signatures]]
type_params = ["V"]
params = [["next", "Decoder<V>"]]
return_type = "Decoder<V>"

[[methods.signatures]]
type_params = ["V"]
params = [["next", "(blob: T) => Decoder<V>"]]
return_type = "Decoder<V>"
"#,
        )
        .unwrap();

        let entry = data.methods[0].to_entry(Table::Methods).unwrap();
        assert_eq!(entry.signatures.len(), 2);
        assert_eq!(
            entry.signatures[1].params,
            Some(vec![Param::new("next", "(blob: T) => Decoder<V>")])
        );
    }

    #[test]
    fn test_empty_halves_become_absent() {
        let data = ReferenceData::parse(
            r#"
[[decoders]]
name = "tuple"
params = [["", "Decoder<A>"], ["", "..."], ["rest", ""]]
return_type = "Decoder<[A, ...]>"
"#,
        )
        .unwrap();
        let entry = data.decoders[0].to_entry(Table::Decoders).unwrap();
        let params = entry.signatures[0].params.as_ref().unwrap();
        assert_eq!(params[0], Param::positional("Decoder<A>"));
        assert_eq!(params[2].name.as_deref(), Some("rest"));
        assert_eq!(params[2].ty, None);
    }

    #[test]
    fn test_empty_signature_list_rejected() {
        let data = ReferenceData::parse(
            r#"
[[decoders]]
name = "broken"
signatures = []
"#,
        )
        .unwrap();
        let err = data.decoders[0].to_entry(Table::Decoders).unwrap_err();
        assert!(matches!(err, RegistryError::NoSignatures { .. }));
    }

    #[test]
    fn test_missing_return_type_rejected() {
        let data = ReferenceData::parse("[[methods]]\nname = \"verify\"\n").unwrap();
        let err = data.methods[0].to_entry(Table::Methods).unwrap_err();
        assert_eq!(
            err.to_string(),
            "method entry 'verify' is missing required field 'return_type'"
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ReferenceData::parse("[[decoders]]\nname = \"x\"\nparam = []\n");
        assert!(matches!(result, Err(RegistryError::Parse(_))));
    }
}
