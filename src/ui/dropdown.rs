use crate::app::{Dropdown, SavedScreen};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

pub fn render(saved: &SavedScreen, dropdown: &Dropdown, frame: &mut Frame) {
    let area = super::help::centered_rect(40, 60, frame.area());
    frame.render_widget(Clear, area);

    let current = saved.selection.filters.get(dropdown.dimension).as_str();
    let items: Vec<ListItem> = dropdown
        .dimension
        .options()
        .iter()
        .map(|option| {
            let mark = if *option == current { "✓ " } else { "  " };
            ListItem::new(format!("{}{}", mark, option))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", dropdown.dimension.label()))
                .title_bottom(
                    Line::from(" Enter select · Esc close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(dropdown.highlighted));
    frame.render_stateful_widget(list, area, &mut state);
}
