use serde::Deserialize;

/// Visual theme of the terminal window.
///
/// Pure selection data; colours are resolved by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalStyle {
    #[default]
    Mac,
    Hacker,
    Light,
}

impl TerminalStyle {
    pub const ALL: [TerminalStyle; 3] = [
        TerminalStyle::Mac,
        TerminalStyle::Hacker,
        TerminalStyle::Light,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TerminalStyle::Mac => "mac",
            TerminalStyle::Hacker => "hacker",
            TerminalStyle::Light => "light",
        }
    }

    /// Parse a style name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mac" => Some(TerminalStyle::Mac),
            "hacker" => Some(TerminalStyle::Hacker),
            "light" => Some(TerminalStyle::Light),
            _ => None,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            TerminalStyle::Mac => TerminalStyle::Hacker,
            TerminalStyle::Hacker => TerminalStyle::Light,
            TerminalStyle::Light => TerminalStyle::Mac,
        }
    }
}
