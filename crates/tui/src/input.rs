use crossterm::event::{KeyCode, KeyEvent};
use sidenav_page::{Key, Viewport};

/// Scale between terminal cells and page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiOptions {
    pub px_per_column: u32,
    pub px_per_row: u32,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            px_per_column: 8,
            px_per_row: 16,
        }
    }
}

impl TuiOptions {
    /// Page viewport for a terminal of `columns` x `rows` cells.
    pub fn viewport(&self, columns: u16, rows: u16) -> Viewport {
        Viewport::new(u32::from(columns) * self.px_per_column, u32::from(rows) * self.px_per_row)
    }

    /// Horizontal page coordinate of the centre of `column`.
    pub fn screen_x(&self, column: u16) -> f64 {
        (f64::from(column) + 0.5) * f64::from(self.px_per_column)
    }
}

/// Maps a terminal key press to a page key and its shift state.
pub fn map_key(event: KeyEvent) -> (Key, bool) {
    match event.code {
        KeyCode::Esc => (Key::Escape, false),
        KeyCode::Tab => (Key::Tab, false),
        KeyCode::BackTab => (Key::Tab, true),
        KeyCode::Enter => (Key::Enter, false),
        KeyCode::Char(' ') => (Key::Space, false),
        KeyCode::Char(c) => (Key::Character(c), false),
        other => (Key::Other(format!("{other:?}")), false),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn back_tab_is_shift_tab() {
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(map_key(event), (Key::Tab, true));
        assert_eq!(map_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)), (Key::Space, false));
        assert_eq!(map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), (Key::Escape, false));
    }

    #[test]
    fn terminal_cells_scale_to_pixels() {
        let options = TuiOptions::default();
        assert_eq!(options.viewport(80, 24), Viewport::new(640, 384));
        assert_eq!(options.viewport(160, 50), Viewport::new(1280, 800));
        assert_eq!(options.screen_x(0), 4.0);
    }
}
