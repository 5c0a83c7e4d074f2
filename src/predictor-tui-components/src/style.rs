//! Colour palette and border set shared by every widget.

use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border::Set as BorderSet;

// Accent
pub const ACCENT: Color = Color::Rgb(0, 255, 163); // #00FFA3
pub const ACCENT_DIM: Color = Color::Rgb(0, 139, 87); // #008B57

// Surfaces
pub const SURFACE_0: Color = Color::Rgb(13, 27, 42); // #0D1B2A
pub const SURFACE_1: Color = Color::Rgb(27, 40, 56); // #1B2838
pub const SURFACE_2: Color = Color::Rgb(36, 59, 83); // #243B53

// Text
pub const TEXT: Color = Color::Rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::Rgb(130, 154, 177); // #829AB1
pub const TEXT_MUTED: Color = Color::Rgb(72, 101, 129); // #486581

// Status
pub const SUCCESS: Color = Color::Rgb(0, 245, 212); // #00F5D4
pub const WARNING: Color = Color::Rgb(255, 200, 87); // #FFC857
pub const ERROR: Color = Color::Rgb(255, 107, 107); // #FF6B6B
pub const NEUTRAL: Color = Color::Rgb(130, 154, 177);

// Borders
pub const BORDER: Color = Color::Rgb(27, 73, 101); // #1B4965
pub const BORDER_FOCUS: Color = ACCENT;

/// Rounded border character set used by every boxed widget.
pub const ROUNDED_BORDER: BorderSet = BorderSet {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal_top: "─",
    horizontal_bottom: "─",
    vertical_left: "│",
    vertical_right: "│",
};

/// Border style for a field box.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Style for a list row, highlighted or not.
pub fn row_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(ACCENT)
            .bg(SURFACE_2)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT).bg(SURFACE_1)
    }
}

pub fn placeholder_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}
