//! HTML fragments for rendered types

use crate::config::SiteConfig;

/// Escape text for inclusion in HTML, quotes included
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turn every occurrence of the type word into a link to the type page.
///
/// Expects already-escaped text; the inserted markup is not escaped again.
pub fn link_type_word(escaped: &str, site: &SiteConfig) -> String {
    if site.type_word.is_empty() {
        return escaped.to_string();
    }
    let link = format!(
        "<a href=\"{}\" style=\"color: inherit\">{}</a>",
        site.type_page, site.type_word
    );
    escaped.replace(&site.type_word, &link)
}

/// Render a type display string: escaped, type word linked, styled
pub fn format_type(ty: &str, site: &SiteConfig) -> String {
    format!(
        "<i style=\"color: {}\">{}</i>",
        site.type_color,
        link_type_word(&escape_html(ty), site)
    )
}
