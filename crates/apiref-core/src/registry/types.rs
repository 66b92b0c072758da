//! Types for representing documented entries

use std::fmt;

/// Which of the two disjoint tables an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Top-level decoders (functions and values)
    Decoders,
    /// Instance methods chained off a decoder value
    Methods,
}

impl Table {
    /// Get the singular display name for the table
    pub fn display_name(&self) -> &'static str {
        match self {
            Table::Decoders => "decoder",
            Table::Methods => "method",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Whether an entry is referenced as a value or called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Value,
    Callable,
}

/// One parameter of a signature. Either half may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    /// Parameter name (absent for positional/variadic parameters)
    pub name: Option<String>,
    /// Type display string
    pub ty: Option<String>,
}

impl Param {
    /// Create a named, typed parameter
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: Some(ty.into()),
        }
    }

    /// Create an unnamed parameter that only shows its type
    pub fn positional(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            ty: Some(ty.into()),
        }
    }
}

/// One call shape of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Type parameter display strings
    pub type_params: Vec<String>,
    /// Parameter list; `None` marks a plain value, as opposed to `Some(vec![])`
    pub params: Option<Vec<Param>>,
    /// Result type display string
    pub return_type: String,
}

impl Signature {
    /// A value signature (no parameter list)
    pub fn value(return_type: impl Into<String>) -> Self {
        Self {
            type_params: Vec::new(),
            params: None,
            return_type: return_type.into(),
        }
    }

    /// A callable signature
    pub fn callable(params: Vec<Param>, return_type: impl Into<String>) -> Self {
        Self {
            type_params: Vec::new(),
            params: Some(params),
            return_type: return_type.into(),
        }
    }

    /// Set the type parameters
    pub fn with_type_params<I, S>(mut self, type_params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params = type_params.into_iter().map(Into::into).collect();
        self
    }

    /// Check if this signature declares a parameter list
    pub fn is_callable(&self) -> bool {
        self.params.is_some()
    }
}

/// A documented identifier (decoder or method)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Unique name within its table
    pub name: String,
    /// Grouping label on the decoders page
    pub section: Option<String>,
    /// Call shapes; never empty once loaded
    pub signatures: Vec<Signature>,
    /// Alternate names (cleared on alias copies)
    pub aliases: Vec<String>,
    /// Primary name, set on alias copies only
    pub alias_of: Option<String>,
    /// Description, authored or mined
    pub doc_text: Option<String>,
    /// Usage example
    pub example_text: Option<String>,
    /// Link to the definition, supplied by source mining
    pub source_url: Option<String>,
}

impl RegistryEntry {
    /// Create a new entry with a single signature
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            section: None,
            signatures: vec![signature],
            aliases: Vec::new(),
            alias_of: None,
            doc_text: None,
            example_text: None,
            source_url: None,
        }
    }

    /// Replace the signatures (overloads)
    pub fn with_signatures(mut self, signatures: Vec<Signature>) -> Self {
        self.signatures = signatures;
        self
    }

    /// Set the section
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the aliases
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the doc text
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_text = Some(doc.into());
        self
    }

    /// Set the example text
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example_text = Some(example.into());
        self
    }

    /// True iff any signature declares a parameter list
    pub fn is_callable(&self) -> bool {
        self.signatures.iter().any(Signature::is_callable)
    }

    /// Value or callable, derived from the signatures
    pub fn kind(&self) -> EntryKind {
        if self.is_callable() {
            EntryKind::Callable
        } else {
            EntryKind::Value
        }
    }

    /// Check if this entry is an expanded alias copy
    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }

    /// Name as shown in headings: methods carry a leading dot
    pub fn display_name(&self, table: Table) -> String {
        match table {
            Table::Decoders => self.name.clone(),
            Table::Methods => format!(".{}", self.name),
        }
    }
}
