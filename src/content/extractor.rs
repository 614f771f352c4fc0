// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML text extraction
//!
//! Collects every visible text node of a document and joins them with
//! single spaces.

use scraper::{Html, Node};

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Extract visible text from HTML
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with a
/// single space. Runs of whitespace inside a node collapse to one space.
///
/// # Arguments
/// * `html` - Raw HTML string
///
/// # Returns
/// Normalised text, empty when the page has no visible text
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    clean_text(&parts.join(" "))
}

/// Normalise whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate content to `max_chars`, preserving word boundaries
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &text[..last_space]),
        None => format!("{}...", truncated),
    }
}
