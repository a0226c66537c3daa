// src/extract/mod.rs
// =============================================================================
// This module turns fetched pages into hyperlinks.
//
// Submodules:
// - html: parses a page and walks the tree for <a href="..."> elements
// =============================================================================

mod html;

pub use html::{extract_links, parse_document};
