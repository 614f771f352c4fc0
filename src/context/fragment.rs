// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-link pieces of a context's text

use std::fmt;

/// The text appended for one link while building a context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Page fetched and its text extracted
    Parsed { link: String, text: String },
    /// Fetch or extraction failed; only the link is recorded
    Failed { link: String },
}

impl Fragment {
    pub fn parsed(link: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Parsed {
            link: link.into(),
            text: text.into(),
        }
    }

    pub fn failed(link: impl Into<String>) -> Self {
        Self::Failed { link: link.into() }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed { .. })
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed { link, text } => write!(f, "Link: {}, Parsed content: {}, ", link, text),
            Self::Failed { link } => write!(f, "Link: {}, ", link),
        }
    }
}

/// Concatenate fragments in order into one context blob
pub fn concatenate(fragments: &[Fragment]) -> String {
    fragments.iter().map(ToString::to_string).collect()
}
