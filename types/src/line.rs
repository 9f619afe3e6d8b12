//! Lines of content typed out by the animator.

use serde::Deserialize;
use std::borrow::Cow;

/// One unit of text content, either a plain string or a prompt/output pair.
///
/// In configuration files a line is written either as a bare string or as a
/// `{ prompt = "...", output = "..." }` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Line {
    Plain(String),
    Prompt { prompt: String, output: String },
}

impl Line {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Line::Plain(text.into())
    }

    #[must_use]
    pub fn prompt(prompt: impl Into<String>, output: impl Into<String>) -> Self {
        Line::Prompt {
            prompt: prompt.into(),
            output: output.into(),
        }
    }

    /// The prompt portion, empty for plain lines.
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        match self {
            Line::Plain(_) => "",
            Line::Prompt { prompt, .. } => prompt,
        }
    }

    /// Text the animator types: prompt and output concatenated as-is.
    #[must_use]
    pub fn full_text(&self) -> Cow<'_, str> {
        match self {
            Line::Plain(text) => Cow::Borrowed(text),
            Line::Prompt { prompt, output } if prompt.is_empty() => Cow::Borrowed(output),
            Line::Prompt { prompt, output } => Cow::Owned(format!("{prompt}{output}")),
        }
    }
}

impl From<&str> for Line {
    fn from(value: &str) -> Self {
        Line::Plain(value.to_string())
    }
}

impl From<String> for Line {
    fn from(value: String) -> Self {
        Line::Plain(value)
    }
}
