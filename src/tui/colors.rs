use crate::search_bar::Phase;
use ratatui::style::Color;

/// Background of the highlighted suggestion (#ddd)
pub const HIGHLIGHT_BG: Color = Color::Rgb(221, 221, 221);
pub const HIGHLIGHT_FG: Color = Color::Black;

pub const BORDER_FOCUSED: Color = Color::Cyan;
pub const BORDER_MUTED: Color = Color::DarkGray;
pub const PLACEHOLDER: Color = Color::DarkGray;
pub const SELECTED_TITLE: Color = Color::LightGreen;
pub const STATUS_BG: Color = Color::Rgb(40, 40, 50);

pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::Gray,
        Phase::Typing => Color::Yellow,
        Phase::ShowingSuggestions => Color::Cyan,
        Phase::Selected => Color::LightGreen,
    }
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::Typing => "Typing",
        Phase::ShowingSuggestions => "Suggestions",
        Phase::Selected => "Selected",
    }
}
