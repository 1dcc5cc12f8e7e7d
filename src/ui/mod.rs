mod cards;
mod dropdown;
mod help;
mod home;
mod saved;

use crate::app::{App, Screen};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match &app.screen {
        Screen::Home(home) => home::render(app, home, frame),
        Screen::Saved(saved) => {
            saved::render(app, saved, frame);
            if let Some(dropdown) = &saved.dropdown {
                dropdown::render(saved, dropdown, frame);
            }
        }
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Truncate a string to `max_width` columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push('…');
    result
}

/// Truncate or pad `s` to exactly `width` columns.
pub fn pad_str(s: &str, width: usize) -> String {
    let truncated = truncate_str(s, width);
    let fill = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(fill))
}

fn header(title: &str, subtitle: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}", title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   {}", subtitle), Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

/// Key hints followed by the status message.
fn status_bar<'a>(hints: &[(&'a str, &'a str)], status_msg: &'a str) -> Paragraph<'a> {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(format!(" {}  ", action)));
    }
    spans.push(Span::styled(status_msg, Style::default().fg(Color::DarkGray)));
    Paragraph::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SavedTab;
    use crate::config::Config;
    use crate::data::Dataset;
    use crate::filter::{ChipMatcher, FilterDimension};
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        App::new(
            Dataset::bundled().unwrap(),
            Config::default(),
            ChipMatcher::default(),
        )
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Blazer", 10), "Blazer");
        assert_eq!(truncate_str("Oversized Blazer", 8), "Oversiz…");
        // wide characters count as two columns
        assert_eq!(truncate_str("ブレザー", 5), "ブレ…");
    }

    #[test]
    fn test_pad_str() {
        assert_eq!(pad_str("Gray", 6), "Gray  ");
        assert_eq!(pad_str("Light Gray", 6), "Light…");
    }

    #[test]
    fn test_render_home() {
        let screen = draw(&app());
        assert!(screen.contains("Featured Collections"));
        assert!(screen.contains("Work Essentials"));
        assert!(screen.contains("Recent Outfits"));
        assert!(screen.contains("Date Night"));
    }

    #[test]
    fn test_render_saved_tabs() {
        let mut app = app();
        app.show_saved();
        let screen = draw(&app);
        assert!(screen.contains("+ Add new"));
        assert!(screen.contains("Business Casual"));

        app.select_tab(SavedTab::Items).unwrap();
        let screen = draw(&app);
        assert!(screen.contains("Type"));
        assert!(screen.contains("Oversized Blazer"));
    }

    #[test]
    fn test_render_dropdown_and_help() {
        let mut app = app();
        app.show_saved();
        app.select_tab(SavedTab::Items).unwrap();
        app.open_dropdown(FilterDimension::Color).unwrap();
        let screen = draw(&app);
        assert!(screen.contains("Navy"));

        app.show_help = true;
        let screen = draw(&app);
        assert!(screen.contains("Keybindings"));
    }
}
