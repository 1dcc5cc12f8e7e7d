use crate::app::{App, CardTarget, HomeScreen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub fn render(app: &App, home: &HomeScreen, frame: &mut Frame) {
    let area = frame.area();
    let cards = &home.cards;
    let featured = cards
        .page()
        .iter()
        .take_while(|c| matches!(c.target, CardTarget::Collection(_)))
        .count();

    // Layout: header(3) + collections + outfits(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(featured as u16 * 2 + 2),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        super::header("Home", "Welcome to your wardrobe"),
        chunks[0],
    );

    let width = area.width as usize;
    let sections = [
        (" Featured Collections ", 0..featured, chunks[1]),
        (" Recent Outfits ", featured..cards.page().len(), chunks[2]),
    ];
    for (title, range, chunk) in sections {
        let (start, count) = (range.start, range.len());
        let items: Vec<ListItem> = range
            .map(|i| super::cards::card_item(&app.dataset, cards, i, width))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(title),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut state = ListState::default();
        if cards.selected >= start && cards.selected - start < count {
            state.select(Some(cards.selected - start));
        }
        frame.render_stateful_widget(list, chunk, &mut state);
    }

    let hints = [
        ("↑↓", "Navigate"),
        ("Space", "Save"),
        ("Enter", "Open"),
        ("S", "Saved"),
        ("?", "Help"),
        ("q", "Quit"),
    ];
    frame.render_widget(super::status_bar(&hints, &app.status_msg), chunks[3]);
}
