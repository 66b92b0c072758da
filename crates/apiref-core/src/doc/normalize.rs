//! Doc-string normalization
//!
//! Raw text blocks come from hand-written data (indented to match the data
//! file) or from mined source comments. Both are brought into one canonical
//! shape so that output is stable under diffing and concatenation:
//!
//! - leading and trailing blank lines are dropped
//! - interior runs of blank lines collapse to exactly one empty line
//! - the leading whitespace of the first content line is stripped, as a
//!   literal prefix, from every line that starts with it

/// Fence marker for markdown code blocks
pub const FENCE: &str = "```";

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Normalize a raw text block. Blank-only input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| !is_blank(l)) else {
        return String::new();
    };
    let end = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(start);

    let mut kept: Vec<&str> = Vec::with_capacity(end - start + 1);
    let mut in_blank_run = false;
    for &line in &lines[start..=end] {
        if is_blank(line) {
            if !in_blank_run {
                kept.push("");
            }
            in_blank_run = true;
        } else {
            kept.push(line);
            in_blank_run = false;
        }
    }

    let prefix = indentation(lines[start]);
    kept.iter()
        .map(|line| line.strip_prefix(prefix).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a description and an example and join them.
///
/// The example is fenced with `language` unless it is empty or already
/// contains a fence. Empty parts are omitted along with their separator.
pub fn combine_doc_and_example(doc: &str, example: &str, language: &str) -> String {
    let doc = normalize(doc);
    let mut example = normalize(example);
    if !example.is_empty() && !example.contains(FENCE) {
        example = format!("{FENCE}{language}\n{example}\n{FENCE}");
    }

    [doc, example]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
