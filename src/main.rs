mod anim;
mod app;
mod cards;
mod config;
mod data;
mod filter;
mod logging;
mod ui;

use app::{App, SavedTab, Screen};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use data::{Dataset, WardrobeItem};
use filter::{Chip, ChipMatcher, FilterDimension, FilterValue, ItemFilter};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use wildmatch::WildMatch;

/// Terminal browser for a wardrobe of items, outfits and collections
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dataset JSON file replacing the bundled catalogue
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the TUI (default)
    Run,
    /// Print the items passing the given filters
    Items {
        /// Item category (top, bottom, outerwear, footwear, accessory)
        #[arg(long = "type")]
        kind: Option<String>,
        /// Style tag, matched exactly
        #[arg(long)]
        style: Option<String>,
        /// Occasion, matched case-insensitively
        #[arg(long)]
        mood: Option<String>,
        /// Color, matched exactly
        #[arg(long)]
        color: Option<String>,
        /// Wildcard pattern over item names (case-insensitive)
        #[arg(long)]
        name: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print outfits, optionally classified under a collection chip
    Outfits {
        /// work, leisure, date or party
        #[arg(long, value_parser = parse_chip)]
        chip: Option<Chip>,
    },
    /// Validate the dataset and print record counts
    Check,
}

fn parse_chip(s: &str) -> Result<Chip, String> {
    Chip::from_id(&s.to_lowercase())
        .ok_or_else(|| format!("unknown chip '{}' (expected work, leisure, date or party)", s))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path).map_err(|e| e.user_message())?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: {}", e.user_message());
            Config::default()
        }),
    };

    if let Some(log_path) = logging::default_log_path() {
        if let Err(e) = logging::init(&log_path, &config.log_level) {
            eprintln!("Warning: could not open log file {}: {}", log_path.display(), e);
        }
    }

    let data_path = cli.data.or_else(|| config.data_path.clone());
    let dataset = match &data_path {
        Some(path) => Dataset::load(path),
        None => Dataset::bundled(),
    }
    .map_err(|e| {
        tracing::error!("Dataset rejected: {}", e);
        e.user_message()
    })?;

    let matcher = ChipMatcher::new(config.strict_chip_matching)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Items {
            kind,
            style,
            mood,
            color,
            name,
            json,
        } => {
            let mut filter = ItemFilter::default();
            filter.set(FilterDimension::Type, FilterValue::from(kind));
            filter.set(FilterDimension::Style, FilterValue::from(style));
            filter.set(FilterDimension::Mood, FilterValue::from(mood));
            filter.set(FilterDimension::Color, FilterValue::from(color));
            let items = select_items(&dataset, &filter, name.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in &items {
                    println!("{}", item_row(item));
                }
                eprintln!("{} of {} items", items.len(), dataset.items().len());
            }
        }
        Commands::Outfits { chip } => {
            let outfits: Vec<_> = match chip {
                Some(chip) => matcher
                    .outfits_for(chip, &dataset)
                    .into_iter()
                    .map(|(_, o)| o)
                    .collect(),
                None => dataset.outfits().iter().collect(),
            };
            for outfit in outfits {
                let slots: Vec<String> = dataset
                    .slot_names(outfit)
                    .into_iter()
                    .map(|(slot, name)| format!("{}: {}", slot.label(), name))
                    .collect();
                println!(
                    "{:<10} {:<18} [{}]  {}",
                    outfit.id,
                    outfit.title,
                    outfit.tags.join(", "),
                    slots.join(" | ")
                );
            }
        }
        Commands::Check => {
            println!(
                "{}: {} items, {} outfits, {} collections",
                data_path
                    .as_ref()
                    .map_or("bundled dataset".to_string(), |p| p.display().to_string()),
                dataset.items().len(),
                dataset.outfits().len(),
                dataset.collections().len()
            );
        }
        Commands::Run => {
            let tick_rate = config.tick_rate();
            let mut app = App::new(dataset, config, matcher);

            // Init terminal
            let mut terminal = ratatui::init();

            // Initial page size setup
            let result = match terminal.size() {
                Ok(size) => {
                    app.update_page_size(size.height);
                    run_app(&mut terminal, &mut app, tick_rate)
                }
                Err(e) => Err(e.into()),
            };

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!("Event loop stopped: {}", e);
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Items passing `filter` whose name matches the optional wildcard.
fn select_items<'a>(
    dataset: &'a Dataset,
    filter: &ItemFilter,
    name: Option<&str>,
) -> Vec<&'a WardrobeItem> {
    let pattern = name.map(|n| WildMatch::new(&n.to_lowercase()));
    filter
        .apply(dataset.items())
        .into_iter()
        .filter(|item| {
            pattern
                .as_ref()
                .is_none_or(|p| p.matches(&item.name.to_lowercase()))
        })
        .collect()
}

fn item_row(item: &WardrobeItem) -> String {
    format!(
        "{:<4} {} {:<10} {} {}",
        item.id,
        ui::pad_str(&item.name, 28),
        item.category.as_str(),
        ui::pad_str(&item.color, 12),
        item.brand.as_deref().unwrap_or("-")
    )
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key)?;
                    }
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            app.tick(elapsed);
            last_tick = Instant::now();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), Box<dyn std::error::Error>> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    // Dropdown is modal
    if app.saved().is_ok_and(|s| s.dropdown.is_some()) {
        return handle_dropdown_key(app, key);
    }

    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return Ok(());
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return Ok(());
        }
        KeyCode::Char('H') => {
            app.show_home();
            return Ok(());
        }
        KeyCode::Char('S') => {
            app.show_saved();
            return Ok(());
        }
        _ => {}
    }

    if handle_list_key(app, key) {
        return Ok(());
    }
    if matches!(app.screen, Screen::Saved(_)) {
        handle_saved_key(app, key)?;
    }
    Ok(())
}

/// Navigation and card actions shared by both screens.
fn handle_list_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.cards_mut().next(),
        KeyCode::Up | KeyCode::Char('k') => app.cards_mut().prev(),
        KeyCode::PageDown => app.cards_mut().page_down(),
        KeyCode::PageUp => app.cards_mut().page_up(),
        KeyCode::Char('g') => app.cards_mut().first(),
        KeyCode::Char('G') => app.cards_mut().last(),
        KeyCode::Char(' ') => app.toggle_bookmark(),
        KeyCode::Enter => app.press(),
        _ => return false,
    }
    true
}

fn handle_saved_key(app: &mut App, key: KeyEvent) -> Result<(), app::ScopeError> {
    match key.code {
        KeyCode::Tab => return app.next_tab(),
        KeyCode::BackTab => return app.prev_tab(),
        KeyCode::Char('1') => return app.select_tab(SavedTab::Collections),
        KeyCode::Char('2') => return app.select_tab(SavedTab::Outfits),
        KeyCode::Char('3') => return app.select_tab(SavedTab::Items),
        _ => {}
    }

    match app.selection()?.tab {
        SavedTab::Collections => match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.prev_chip()?,
            KeyCode::Right | KeyCode::Char('l') => app.next_chip()?,
            KeyCode::Char('+') => app.add_new_collection(),
            _ => {}
        },
        SavedTab::Outfits => {}
        SavedTab::Items => match key.code {
            KeyCode::Char('t') => app.open_dropdown(FilterDimension::Type)?,
            KeyCode::Char('s') => app.open_dropdown(FilterDimension::Style)?,
            KeyCode::Char('m') => app.open_dropdown(FilterDimension::Mood)?,
            KeyCode::Char('c') => app.open_dropdown(FilterDimension::Color)?,
            KeyCode::Char('x') | KeyCode::Backspace => app.remove_last_filter()?,
            KeyCode::Esc | KeyCode::Char('X') => app.clear_filters()?,
            _ => {}
        },
    }
    Ok(())
}

fn handle_dropdown_key(app: &mut App, key: KeyEvent) -> Result<(), Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.dropdown_next()?,
        KeyCode::Up | KeyCode::Char('k') => app.dropdown_prev()?,
        KeyCode::Enter => app.dropdown_confirm()?,
        KeyCode::Esc | KeyCode::Char('q') => app.close_dropdown()?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            Dataset::bundled().unwrap(),
            Config::default(),
            ChipMatcher::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_cli_defaults_to_run() {
        let cli = Cli::try_parse_from(["wardrobe-explorer"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.data.is_none());
    }

    #[test]
    fn test_cli_items_filters() {
        let cli = Cli::try_parse_from([
            "wardrobe-explorer",
            "items",
            "--type",
            "footwear",
            "--color",
            "Brown",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Items { kind, color, .. }) => {
                assert_eq!(kind.as_deref(), Some("footwear"));
                assert_eq!(color.as_deref(), Some("Brown"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_chip() {
        assert!(Cli::try_parse_from(["wardrobe-explorer", "outfits", "--chip", "gym"]).is_err());
        let cli =
            Cli::try_parse_from(["wardrobe-explorer", "outfits", "--chip", "Date"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Outfits {
                chip: Some(Chip::Date)
            })
        ));
    }

    #[test]
    fn test_select_items_by_name_pattern() {
        let dataset = Dataset::bundled().unwrap();
        let mut filter = ItemFilter::default();
        filter.set(FilterDimension::Type, FilterValue::parse("top"));
        let ids: Vec<&str> = select_items(&dataset, &filter, Some("*SHIRT*"))
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["z3", "3", "10", "13"]);
        assert_eq!(select_items(&dataset, &filter, None).len(), 8);
    }

    #[test]
    fn test_screen_switch_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('S'));
        assert!(app.selection().is_ok());
        press(&mut app, KeyCode::Char('H'));
        assert!(matches!(app.screen, Screen::Home(_)));
    }

    #[test]
    fn test_tab_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('S'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.selection().unwrap().tab, SavedTab::Items);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selection().unwrap().tab, SavedTab::Collections);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.selection().unwrap().tab, SavedTab::Items);
    }

    #[test]
    fn test_dropdown_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('S'));
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.saved().unwrap().dropdown.is_some());

        // q inside the dropdown closes it instead of quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert!(app.saved().unwrap().dropdown.is_none());

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.selection().unwrap().filters.color,
            FilterValue::parse("Black")
        );
        press(&mut app, KeyCode::Char('x'));
        assert!(app.selection().unwrap().filters.is_empty());
    }

    #[test]
    fn test_chip_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('S'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection().unwrap().chip, Chip::Leisure);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selection().unwrap().chip, Chip::Party);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.status_msg, "Add new collection");
    }

    #[test]
    fn test_help_and_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_space_toggles_bookmark() {
        let mut app = app();
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Char(' '));
        let selected = app.cards().selected;
        assert!(!app.cards().bookmarks.is_saved(selected));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(app.should_quit);
    }
}
