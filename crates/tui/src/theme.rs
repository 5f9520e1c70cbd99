//! Dracula palette (https://draculatheme.com/contribute) and the styles the
//! view builds from it.

use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(0x28, 0x2A, 0x36);
pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);
pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
pub const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C);
pub const BG_MODAL_OVERLAY: Color = Color::Rgb(0x1D, 0x1F, 0x27);

pub fn text() -> Style {
    Style::default().fg(FOREGROUND).bg(BG)
}

pub fn muted() -> Style {
    Style::default().fg(COMMENT)
}

/// Border style; focused blocks use the secondary accent.
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(CYAN)
    } else {
        Style::default().fg(CURRENT_LINE)
    }
}

/// Item style for links and buttons.
pub fn item(active: bool, focused: bool) -> Style {
    let mut style = Style::default().fg(if active { PINK } else { FOREGROUND });
    if active {
        style = style.add_modifier(Modifier::BOLD);
    }
    if focused {
        style = style.bg(CURRENT_LINE).add_modifier(Modifier::REVERSED);
    }
    style
}

/// Content behind the mobile overlay.
pub fn dimmed() -> Style {
    Style::default().fg(COMMENT).bg(BG_MODAL_OVERLAY).add_modifier(Modifier::DIM)
}

pub fn warning() -> Style {
    Style::default().fg(ORANGE)
}
