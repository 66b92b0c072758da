//! Cross-linking for documentation
//!
//! This module rewrites inline code spans that name a known decoder or method
//! into markdown links. A span qualifies when:
//!
//! - it is preceded by a character that is neither a backtick nor `[` (so
//!   spans already inside a link are left alone); a span opening the text has
//!   no such character and stays as written
//! - its content is an optional `.`, then word characters, then optionally
//!   one or more parentheses
//!
//! The registry, not the parentheses, decides how a reference renders. Names
//! that resolve to nothing are passed through untouched.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::SiteConfig;
use crate::registry::{Match, Registry, RegistryEntry, Table};

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([^`\[])`(\.?)(\w+)([()]+)?`").expect("reference pattern is valid")
    })
}

/// Cross-linker for resolving code-span references to links
pub struct CrossLinker<'a> {
    registry: &'a Registry,
    site: &'a SiteConfig,
}

impl<'a> CrossLinker<'a> {
    /// Create a new cross-linker
    pub fn new(registry: &'a Registry, site: &'a SiteConfig) -> Self {
        Self { registry, site }
    }

    /// Rewrite every resolvable reference in `text`
    pub fn linkify(&self, text: &str) -> String {
        reference_pattern()
            .replace_all(text, |caps: &Captures<'_>| {
                match self.reference(&caps[3]) {
                    Some(link) => format!("{}{link}", &caps[1]),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Render the link for a bare name, if it is documented
    pub fn reference(&self, name: &str) -> Option<String> {
        self.registry.resolve(name).map(|m| self.render(m))
    }

    fn render(&self, m: Match<'_>) -> String {
        match m.table {
            Table::Decoders => self.decoder_ref(m.entry),
            Table::Methods => self.method_ref(&m.entry.name),
        }
    }

    /// Link to a top-level decoder; callables get a `()` suffix
    pub fn decoder_ref(&self, entry: &RegistryEntry) -> String {
        let suffix = if entry.is_callable() { "()" } else { "" };
        format!(
            "[`{name}{suffix}`]({page}#{name})",
            name = entry.name,
            page = self.site.decoders_page
        )
    }

    /// Link to an instance method, always call-styled
    pub fn method_ref(&self, name: &str) -> String {
        format!("[`.{name}()`]({page}#{name})", page = self.site.methods_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EntryTable, Param, Signature};

    fn create_test_registry() -> Registry {
        let decoders = EntryTable::from_entries(
            Table::Decoders,
            vec![
                RegistryEntry::new("null_", Signature::value("Decoder<null>")),
                RegistryEntry::new(
                    "array",
                    Signature::callable(vec![Param::new("decoder", "Decoder<T>")], "Decoder<T[]>")
                        .with_type_params(["T"]),
                ),
                RegistryEntry::new("string", Signature::value("Decoder<string>")),
            ],
        )
        .unwrap();
        let methods = EntryTable::from_entries(
            Table::Methods,
            vec![
                RegistryEntry::new("verify", Signature::callable(vec![Param::new("blob", "mixed")], "T")),
                // A method entry that does not look callable still renders as a call
                RegistryEntry::new("reject", Signature::value("Decoder<T>")),
            ],
        )
        .unwrap();
        Registry::new(decoders, methods).unwrap()
    }

    #[test]
    fn test_value_and_callable_decoders() {
        let registry = create_test_registry();
        let site = SiteConfig::default();
        let linker = CrossLinker::new(&registry, &site);

        assert_eq!(
            linker.linkify("Use `null_` here."),
            "Use [`null_`](/api.html#null_) here."
        );
        assert_eq!(
            linker.linkify("Use `array` here."),
            "Use [`array()`](/api.html#array) here."
        );
        // Trailing parens in the source do not change the rendering
        assert_eq!(
            linker.linkify("Use `null_()` or `array()`."),
            "Use [`null_`](/api.html#null_) or [`array()`](/api.html#array)."
        );
    }

    #[test]
    fn test_method_rendering() {
        let registry = create_test_registry();
        let site = SiteConfig::default();
        let linker = CrossLinker::new(&registry, &site);

        assert_eq!(
            linker.linkify("Call `.verify()` on it."),
            "Call [`.verify()`](/Decoder.html#verify) on it."
        );
        assert_eq!(
            linker.linkify("See `reject`."),
            "See [`.reject()`](/Decoder.html#reject)."
        );
    }

    #[test]
    fn test_unresolved_spans_untouched() {
        let registry = create_test_registry();
        let site = SiteConfig::default();
        let linker = CrossLinker::new(&registry, &site);

        for text in [
            "`foo.bar()` stays",
            "a `foo.bar()` b",
            "call `unknown()` now",
            "an expression `x + 1`",
            "spaced ` string `",
        ] {
            assert_eq!(linker.linkify(text), text);
        }
    }

    #[test]
    fn test_existing_links_and_adjacent_spans_skipped() {
        let registry = create_test_registry();
        let site = SiteConfig::default();
        let linker = CrossLinker::new(&registry, &site);

        let linked = "See [`string`](/api.html#string).";
        assert_eq!(linker.linkify(linked), linked);

        // Double-backtick spans are not references
        assert_eq!(linker.linkify("x ``string`` y"), "x ``string`` y");

        // Idempotent on its own output
        let once = linker.linkify("Use `string` and `.verify()`.");
        assert_eq!(linker.linkify(&once), once);
    }

    #[test]
    fn test_leading_span_needs_preceding_char() {
        let registry = create_test_registry();
        let site = SiteConfig::default();
        let linker = CrossLinker::new(&registry, &site);

        assert_eq!(linker.linkify("`string`"), "`string`");
        assert_eq!(
            linker.linkify("`string` first, then `string`"),
            "`string` first, then [`string`](/api.html#string)"
        );
        assert_eq!(
            linker.linkify("first\n`array`, then `null_`"),
            "first\n[`array()`](/api.html#array), then [`null_`](/api.html#null_)"
        );
    }

    #[test]
    fn test_custom_pages() {
        let registry = create_test_registry();
        let site = SiteConfig {
            decoders_page: "/reference/decoders".to_string(),
            methods_page: "/reference/methods".to_string(),
            ..SiteConfig::default()
        };
        let linker = CrossLinker::new(&registry, &site);
        assert_eq!(
            linker.reference("array").as_deref(),
            Some("[`array()`](/reference/decoders#array)")
        );
        assert_eq!(
            linker.reference("verify").as_deref(),
            Some("[`.verify()`](/reference/methods#verify)")
        );
        assert_eq!(linker.reference("nope"), None);
    }
}
