//! Markdown page generator

use std::sync::OnceLock;

use regex::Regex;

use super::crosslink::CrossLinker;
use super::normalize::combine_doc_and_example;
use super::signature::SignatureRenderer;
use crate::config::SiteConfig;
use crate::registry::{Registry, RegistryEntry, Table};

fn slug_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[^a-z0-9]+").expect("slug pattern is valid"))
}

/// Lowercase and replace every run of characters outside `[a-z0-9]` with `-`
pub fn slugify(s: &str) -> String {
    slug_separator()
        .replace_all(&s.to_lowercase(), "-")
        .into_owned()
}

/// Generates the decoder and method reference pages
pub struct MarkdownGenerator<'a> {
    registry: &'a Registry,
    site: &'a SiteConfig,
    linker: CrossLinker<'a>,
    signatures: SignatureRenderer<'a>,
}

impl<'a> MarkdownGenerator<'a> {
    /// Create a generator over a built registry
    pub fn new(registry: &'a Registry, site: &'a SiteConfig) -> Self {
        Self {
            registry,
            site,
            linker: CrossLinker::new(registry, site),
            signatures: SignatureRenderer::new(site),
        }
    }

    /// The cross-linker used for entry bodies
    pub fn linker(&self) -> &CrossLinker<'a> {
        &self.linker
    }

    /// Body text of an entry: alias note, then linked doc text and example
    pub fn entry_markdown(&self, entry: &RegistryEntry) -> String {
        let body = combine_doc_and_example(
            entry.doc_text.as_deref().unwrap_or_default(),
            entry.example_text.as_deref().unwrap_or_default(),
            &self.site.code_language,
        );
        let body = self.linker.linkify(&body);

        let note = entry
            .alias_of
            .as_deref()
            .and_then(|primary| self.linker.reference(primary))
            .map(|link| format!("Alias of {link}."));

        match (note, body.is_empty()) {
            (Some(note), true) => note,
            (Some(note), false) => format!("{note}\n\n{body}"),
            (None, _) => body,
        }
    }

    /// Signature headings and body of one entry, closed by a rule
    pub fn entry_block(&self, table: Table, entry: &RegistryEntry) -> String {
        let mut output = self.signatures.render_entry(table, entry).join("\n\n");
        output.push_str("\n\n");

        let body = self.entry_markdown(entry);
        if !body.is_empty() {
            output.push_str(&body);
            output.push_str("\n\n");
        }

        output.push_str("---\n\n");
        output
    }

    /// The top-level decoders page, grouped by section
    pub fn decoders_page(&self) -> String {
        let sections = self.registry.by_section();
        let mut output = String::from("# API Reference\n\n");

        if !sections.is_empty() {
            output.push_str("## Contents\n\n");
            for (section, entries) in &sections {
                let links: Vec<String> = entries
                    .iter()
                    .map(|entry| self.linker.decoder_ref(entry))
                    .collect();
                output.push_str(&format!(
                    "- [{section}](#{}): {}\n",
                    slugify(section),
                    links.join(", ")
                ));
            }
            output.push('\n');
        }

        for (section, entries) in &sections {
            output.push_str(&format!(
                "<a id=\"{}\"></a>\n\n## {section}\n\n",
                slugify(section)
            ));
            for entry in entries {
                output.push_str(&self.entry_block(Table::Decoders, entry));
            }
        }

        output
    }

    /// The instance methods page
    pub fn methods_page(&self) -> String {
        let methods = self.registry.methods();
        let mut output = String::from("# Decoder methods\n\n");

        if !methods.is_empty() {
            let links: Vec<String> = methods
                .iter()
                .map(|entry| self.linker.method_ref(&entry.name))
                .collect();
            output.push_str(&links.join(", "));
            output.push_str("\n\n");
        }

        for entry in methods.iter() {
            output.push_str(&self.entry_block(Table::Methods, entry));
        }

        output
    }
}
