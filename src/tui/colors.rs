//! Colour palette shared by every TUI widget

use ratatui::style::Color;

/// Delete actions and errors
pub const ACCENT_PRIMARY: Color = Color::Rgb(235, 94, 85);
/// Keep actions and success
pub const ACCENT_SECONDARY: Color = Color::Rgb(120, 200, 130);
/// Titles, undo, focus
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(245, 190, 80);

pub const TEXT_PRIMARY: Color = Color::Rgb(230, 230, 235);
pub const TEXT_SECONDARY: Color = Color::Rgb(140, 140, 155);

pub const BORDER_COLOR: Color = Color::Rgb(80, 80, 95);
pub const BG_DARK: Color = Color::Rgb(22, 22, 28);
