use crate::app::{App, SavedScreen, SavedTab};
use crate::filter::{Chip, FilterDimension};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

/// Dropdown trigger keys, in [`FilterDimension::ALL`] order.
const DROPDOWN_KEYS: [char; 4] = ['t', 's', 'm', 'c'];

pub fn render(app: &App, saved: &SavedScreen, frame: &mut Frame) {
    let area = frame.area();
    let tab = saved.selection.tab;

    // Layout: header(3) + tabs(3) + content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        super::header("Saved", "Your collections, outfits and items"),
        chunks[0],
    );

    // ── Tab strip ──
    let tab_titles: Vec<Line> = SavedTab::ALL
        .iter()
        .map(|t| {
            let style = if *t == tab {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(t.label(), style))
        })
        .collect();

    let tab_index = SavedTab::ALL.iter().position(|t| *t == tab).unwrap_or(0);

    let tabs = Tabs::new(tab_titles)
        .select(tab_index)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" [Tab/1-3] "),
        )
        .highlight_style(Style::default().fg(Color::Cyan));
    frame.render_widget(tabs, chunks[1]);

    // ── Tab content ──
    let list_area = match tab {
        SavedTab::Collections => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)])
                .split(chunks[2]);
            render_chips(saved.selection.chip, frame, parts[0]);
            parts[1]
        }
        SavedTab::Outfits => chunks[2],
        SavedTab::Items => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(3),
                ])
                .split(chunks[2]);
            render_dropdowns(saved, frame, parts[0]);
            render_pills(saved, frame, parts[1]);
            parts[2]
        }
    };
    render_list(app, saved, frame, list_area);

    // ── Status bar ──
    let hints: &[(&str, &str)] = match tab {
        SavedTab::Collections => &[
            ("←→", "Chip"),
            ("+", "Add"),
            ("Space", "Save"),
            ("H", "Home"),
            ("?", "Help"),
        ],
        SavedTab::Outfits => &[
            ("↑↓", "Navigate"),
            ("Space", "Save"),
            ("H", "Home"),
            ("?", "Help"),
        ],
        SavedTab::Items => &[
            ("t/s/m/c", "Filter"),
            ("x", "Remove"),
            ("Esc", "Clear"),
            ("H", "Home"),
            ("?", "Help"),
        ],
    };
    frame.render_widget(super::status_bar(hints, &app.status_msg), chunks[3]);
}

fn render_chips(selected: Chip, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " + Add new ",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    for chip in Chip::ALL {
        spans.push(Span::raw(" "));
        let style = if chip == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(
            format!(" {} {} ", chip.icon(), chip.label()),
            style,
        ));
    }
    let chips = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Collections "),
    );
    frame.render_widget(chips, area);
}

fn render_dropdowns(saved: &SavedScreen, frame: &mut Frame, area: Rect) {
    let filters = &saved.selection.filters;
    let mut spans = Vec::new();
    for (dimension, key) in FilterDimension::ALL.into_iter().zip(DROPDOWN_KEYS) {
        let value = filters.get(dimension);
        let style = if value.is_all() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!("{}: {} ▾ ", dimension.label(), value),
            style,
        ));
    }
    let row = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters "),
    );
    frame.render_widget(row, area);
}

fn render_pills(saved: &SavedScreen, frame: &mut Frame, area: Rect) {
    let filters = &saved.selection.filters;
    let line = if filters.is_empty() {
        Line::from(Span::styled(
            " No active filters",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (_, value) in filters.active() {
            spans.push(Span::styled(
                format!("[{} ×]", value),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            "x remove last · Esc clear all",
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(app: &App, saved: &SavedScreen, frame: &mut Frame, area: Rect) {
    let cards = &saved.cards;
    let tab = saved.selection.tab;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", tab.label()));

    if cards.cards.is_empty() {
        let empty = match tab {
            SavedTab::Items => " No items match the current filters",
            _ => " No outfits in this collection yet",
        };
        let msg = Paragraph::new(empty)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let width = area.width as usize;
    let items: Vec<ListItem> = (0..cards.page().len())
        .map(|i| super::cards::card_item(&app.dataset, cards, i, width))
        .collect();

    let page_info = format!(
        " {}-{} of {} ",
        cards.offset + 1,
        cards.offset + cards.page().len(),
        cards.cards.len()
    );

    let list = List::new(items)
        .block(block.title_bottom(Line::from(page_info).alignment(Alignment::Right)))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(cards.selected));
    frame.render_stateful_widget(list, area, &mut state);
}
