// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-role prompt templates

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::OnceLock;

use super::config::ChatConfig;

/// A rendered prompt ready for the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPrompt {
    pub system: String,
    pub human: String,
}

/// System and human message templates
///
/// Placeholders are `{text}` (context text) and `{user_input}` (the
/// utterance). Substitution is a single pass over the template, so
/// placeholder-looking text inside the values is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: String,
    pub human: String,
    /// When false, `{user_input}` renders as the empty string
    pub include_user_input: bool,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{(text|user_input)\}").expect("valid placeholder regex"))
}

impl PromptTemplate {
    pub fn new(system: impl Into<String>, human: impl Into<String>, include_user_input: bool) -> Self {
        Self {
            system: system.into(),
            human: human.into(),
            include_user_input,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(
            config.system_template.clone(),
            config.human_template.clone(),
            config.include_user_input,
        )
    }

    /// Render both messages
    pub fn render(&self, text: &str, user_input: &str) -> ChatPrompt {
        let user_input = if self.include_user_input { user_input } else { "" };
        ChatPrompt {
            system: Self::fill(&self.system, text, user_input),
            human: Self::fill(&self.human, text, user_input),
        }
    }

    fn fill(template: &str, text: &str, user_input: &str) -> String {
        placeholder_pattern()
            .replace_all(template, |caps: &Captures| match &caps[1] {
                "text" => text.to_string(),
                _ => user_input.to_string(),
            })
            .into_owned()
    }
}
