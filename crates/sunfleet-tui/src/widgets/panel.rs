//! Rounded bordered block shared by every screen.

use ratatui::widgets::{Block, BorderType, Borders};

use crate::theme;

pub fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}
