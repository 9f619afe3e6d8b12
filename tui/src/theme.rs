//! Color themes and glyphs for the macterm window.
//!
//! One palette per [`TerminalStyle`], with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use macterm_engine::{TerminalStyle, UiOptions};

/// Tailwind-derived color constants.
mod colors {
    use super::Color;

    // === Traffic lights ===
    pub const RED_500: Color = Color::Rgb(239, 68, 68);
    pub const YELLOW_500: Color = Color::Rgb(234, 179, 8);
    pub const GREEN_500: Color = Color::Rgb(34, 197, 94);

    // === Greens ===
    pub const GREEN_300: Color = Color::Rgb(134, 239, 172);
    pub const GREEN_400: Color = Color::Rgb(74, 222, 128);

    // === Grays ===
    pub const GRAY_300: Color = Color::Rgb(209, 213, 219);
    pub const GRAY_500: Color = Color::Rgb(107, 114, 128);
    pub const GRAY_700: Color = Color::Rgb(55, 65, 81);
    pub const GRAY_900: Color = Color::Rgb(17, 24, 39);

    pub const BLUE_600: Color = Color::Rgb(37, 99, 235);

    // === Window backgrounds ===
    pub const MAC_BG: Color = Color::Rgb(30, 30, 30); // #1e1e1e
    pub const MAC_BORDER: Color = Color::Rgb(68, 68, 68);
    pub const HACKER_BG: Color = Color::Rgb(0, 0, 0);
    pub const LIGHT_BG: Color = Color::Rgb(255, 255, 255);
}

/// Resolved theme palette used by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub window_bg: Color,
    pub text: Color,
    pub prompt: Color,
    pub output: Color,
    pub border: Color,
    /// Border while the window is being dragged or resized.
    pub border_active: Color,
    pub traffic_lights: [Color; 3],
    pub hint: Color,
}

const TRAFFIC_LIGHTS: [Color; 3] = [colors::RED_500, colors::YELLOW_500, colors::GREEN_500];

impl Palette {
    #[must_use]
    pub fn mac() -> Self {
        Self {
            window_bg: colors::MAC_BG,
            text: Color::White,
            prompt: colors::GREEN_400,
            output: colors::GRAY_300,
            border: colors::MAC_BORDER,
            border_active: colors::GRAY_300,
            traffic_lights: TRAFFIC_LIGHTS,
            hint: colors::GRAY_500,
        }
    }

    #[must_use]
    pub fn hacker() -> Self {
        Self {
            window_bg: colors::HACKER_BG,
            text: colors::GREEN_300,
            prompt: colors::GREEN_400,
            output: colors::GREEN_300,
            border: colors::GREEN_500,
            border_active: colors::GREEN_300,
            traffic_lights: TRAFFIC_LIGHTS,
            hint: colors::GRAY_500,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            window_bg: colors::LIGHT_BG,
            text: colors::GRAY_900,
            prompt: colors::BLUE_600,
            output: colors::GRAY_700,
            border: colors::GRAY_300,
            border_active: colors::GRAY_500,
            traffic_lights: TRAFFIC_LIGHTS,
            hint: colors::GRAY_500,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            window_bg: Color::Black,
            text: Color::White,
            prompt: Color::Cyan,
            output: Color::White,
            border: Color::White,
            border_active: Color::Yellow,
            traffic_lights: [Color::Red, Color::Yellow, Color::Green],
            hint: Color::Gray,
        }
    }
}

#[must_use]
pub fn palette(style: TerminalStyle, options: UiOptions) -> Palette {
    if options.high_contrast {
        return Palette::high_contrast();
    }
    match style {
        TerminalStyle::Mac => Palette::mac(),
        TerminalStyle::Hacker => Palette::hacker(),
        TerminalStyle::Light => Palette::light(),
    }
}

/// ASCII/Unicode glyphs for the window chrome.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub traffic_light: &'static str,
    pub caret: &'static str,
    pub resize_handle: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            traffic_light: "o",
            caret: "|",
            resize_handle: "/",
        }
    } else {
        Glyphs {
            traffic_light: "●",
            caret: "▌",
            resize_handle: "◢",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn window(palette: &Palette) -> Style {
        Style::default().bg(palette.window_bg).fg(palette.text)
    }

    #[must_use]
    pub fn prompt(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.prompt)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn output(palette: &Palette) -> Style {
        Style::default().fg(palette.output)
    }

    #[must_use]
    pub fn hint(palette: &Palette) -> Style {
        Style::default().fg(palette.hint)
    }
}
