//! Documentation rendering for the decoder reference
//!
//! This module turns a built [`Registry`](crate::Registry) into markdown:
//! normalized doc text, cross-linked code spans and signature headings.

mod crosslink;
mod html;
mod markdown;
mod normalize;
mod signature;

pub use crosslink::CrossLinker;
pub use html::{escape_html, format_type, link_type_word};
pub use markdown::{slugify, MarkdownGenerator};
pub use normalize::{combine_doc_and_example, normalize, FENCE};
pub use signature::{source_link, SignatureRenderer, HEADING_LEVEL};
