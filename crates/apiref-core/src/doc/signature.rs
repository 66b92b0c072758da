//! Signature headings
//!
//! Each signature of an entry renders as one markdown heading:
//!
//! ```text
//! #### <a id="always" href="#always">#</a> **always**<T>(value: T): Decoder<T> (source)
//! ```
//!
//! with every type fragment escaped and styled. Only the first overload of an
//! entry carries the `id`, so anchors stay unique on a page.

use super::html::format_type;
use crate::config::SiteConfig;
use crate::registry::{Param, RegistryEntry, Signature, Table};

/// Default heading level for signature blocks
pub const HEADING_LEVEL: usize = 4;

/// Markdown backlink to an entry's definition, or empty
pub fn source_link(entry: &RegistryEntry) -> String {
    entry
        .source_url
        .as_deref()
        .map(|url| format!("[<small>(source)</small>]({url} 'Source')"))
        .unwrap_or_default()
}

/// Renders signature heading blocks
pub struct SignatureRenderer<'a> {
    site: &'a SiteConfig,
    heading_level: usize,
}

impl<'a> SignatureRenderer<'a> {
    /// Create a renderer with the default heading level
    pub fn new(site: &'a SiteConfig) -> Self {
        Self {
            site,
            heading_level: HEADING_LEVEL,
        }
    }

    /// Use a different heading level
    pub fn with_heading_level(mut self, level: usize) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// One heading per signature of the entry
    pub fn render_entry(&self, table: Table, entry: &RegistryEntry) -> Vec<String> {
        entry
            .signatures
            .iter()
            .enumerate()
            .map(|(i, sig)| self.render_signature(table, entry, sig, i == 0))
            .collect()
    }

    /// Render one heading. `anchored` adds the `id` for the entry name.
    pub fn render_signature(
        &self,
        table: Table,
        entry: &RegistryEntry,
        sig: &Signature,
        anchored: bool,
    ) -> String {
        let name = &entry.name;
        let marker = if anchored {
            format!("<a id=\"{name}\" href=\"#{name}\">#</a>")
        } else {
            format!("<a href=\"#{name}\">#</a>")
        };

        let mut heading = format!(
            "{} {} **{}**{}{}: {}",
            "#".repeat(self.heading_level),
            marker,
            entry.display_name(table),
            self.type_params(sig),
            self.params(sig),
            self.return_type(sig),
        );

        let source = source_link(entry);
        if !source.is_empty() {
            heading.push(' ');
            heading.push_str(&source);
        }
        heading
    }

    /// `<T, V>` segment, or empty when there are no type parameters
    pub fn type_params(&self, sig: &Signature) -> String {
        if sig.type_params.is_empty() {
            return String::new();
        }
        format_type(&format!("<{}>", sig.type_params.join(", ")), self.site)
    }

    /// `(a: A, b: B)` segment, or empty for value signatures
    pub fn params(&self, sig: &Signature) -> String {
        match &sig.params {
            None => String::new(),
            Some(params) => {
                let rendered: Vec<String> = params.iter().map(|p| self.param(p)).collect();
                format!("({})", rendered.join(", "))
            }
        }
    }

    fn param(&self, param: &Param) -> String {
        match (&param.name, &param.ty) {
            (Some(name), Some(ty)) => format!("{name}: {}", format_type(ty, self.site)),
            (None, Some(ty)) => format_type(ty, self.site),
            (Some(name), None) => name.clone(),
            (None, None) => String::new(),
        }
    }

    /// Return type segment
    pub fn return_type(&self, sig: &Signature) -> String {
        format_type(&sig.return_type, self.site)
    }
}
