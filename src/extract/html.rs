// src/extract/html.rs
// =============================================================================
// This module finds hyperlinks in an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Never rejects markup: broken HTML is repaired the way a browser would
// - Is built on html5ever (Mozilla's HTML parser)
//
// Instead of a CSS selector we walk the tree ourselves, pre-order and
// depth-first, so links come out in exactly the order they appear in the
// document and each one is produced only when the caller asks for it.
//
// Rust concepts:
// - Iterators: lazy sequences that do work on demand
// - impl Trait: returning "some iterator" without naming its type
// - Lifetimes: the iterator borrows the parsed document
// =============================================================================

use scraper::{ElementRef, Html, Node};

// A hyperlink found in a page
//
// href is the raw attribute value, exactly as written in the markup.
// text is the visible text of the anchor with whitespace collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
}

// Parses a page body into a document tree
//
// html5ever recovers from any input, so this cannot fail. Getting the body
// bytes in the first place can, and that is handled by the caller.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

// Returns the links of a document, lazily and in document order
//
// Every <a> element contributes one Link per "href" attribute it carries.
// The iterator borrows the document and cannot be restarted; to walk the
// links again, call this function again.
//
// Example:
//   <p><a href="/a">A</a> <a name="x">no href</a> <a href="/b"> B </a></p>
//   yields Link { "/a", "A" } then Link { "/b", "B" }
pub fn extract_links(document: &Html) -> impl Iterator<Item = Link> + '_ {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .flat_map(|anchor| {
            anchor
                .value()
                .attrs()
                .filter(|(key, _)| *key == "href")
                .map(move |(_, value)| Link {
                    href: value.to_string(),
                    text: anchor_text(anchor),
                })
        })
}

// Concatenates the text nodes under an element
//
// Only element children are recursed into; comments, doctypes and
// processing instructions contribute nothing. Each element's text is
// collapsed before its parent concatenates it, so "<b> x </b>" adds "x".
fn anchor_text(element: ElementRef<'_>) -> String {
    let mut joined = String::new();

    for child in element.children() {
        match child.value() {
            Node::Text(text) => joined.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    joined.push_str(&anchor_text(child_element));
                }
            }
            _ => {}
        }
    }

    collapse_whitespace(&joined)
}

// Turns every run of whitespace into a single space and trims both ends
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return `impl Iterator` instead of Vec<Link>?
//    - The caller (the crawl engine) handles one link at a time
//    - An iterator computes the next link only when asked
//    - Nothing is allocated for links the caller never looks at
//
// 2. What does the '_ in `+ '_` mean?
//    - The iterator holds references into `document`
//    - '_ ties the iterator's lifetime to that borrow
//    - The compiler then stops us from dropping the document too early
//
// 3. What is ElementRef::wrap?
//    - The tree contains every kind of node (text, comments, elements...)
//    - wrap() returns Some only for element nodes
//    - filter_map(ElementRef::wrap) keeps just the elements
//
// 4. Why `move` in the inner closure?
//    - `anchor` is a small Copy handle into the tree
//    - move copies it into the closure so it outlives the outer closure call
// -----------------------------------------------------------------------------
