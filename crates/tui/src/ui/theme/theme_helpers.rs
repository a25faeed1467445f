use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// List with the theme's selection highlight, wrapped in `block` when given.
pub fn list_with_highlight<'a, T: Theme + ?Sized>(items: Vec<ListItem<'a>>, theme: &T, block: Option<Block<'a>>) -> List<'a> {
    let mut list = List::new(items)
        .style(theme.text_primary_style())
        .highlight_style(theme.selection_style())
        .highlight_symbol("› ");
    if let Some(block) = block {
        list = list.block(block);
    }
    list
}
