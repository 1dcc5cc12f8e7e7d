use crate::anim::{EntranceFrom, EntranceSet};
use crate::cards::Bookmarks;
use crate::config::{Config, StartScreen};
use crate::data::{Dataset, ItemRef, OutfitRef};
use crate::filter::{Chip, ChipMatcher, FilterDimension, FilterValue, ItemFilter};
use std::time::Duration;
use thiserror::Error;

/// Tabs of the Saved screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavedTab {
    #[default]
    Collections,
    Outfits,
    Items,
}

impl SavedTab {
    pub fn next(self) -> Self {
        match self {
            Self::Collections => Self::Outfits,
            Self::Outfits => Self::Items,
            Self::Items => Self::Collections,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Collections => Self::Items,
            Self::Outfits => Self::Collections,
            Self::Items => Self::Outfits,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Collections => "Collections",
            Self::Outfits => "Outfits",
            Self::Items => "Items",
        }
    }

    pub const ALL: [SavedTab; 3] = [Self::Collections, Self::Outfits, Self::Items];
}

/// Tab and filter choices of one Saved screen instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub tab: SavedTab,
    pub filters: ItemFilter,
    pub chip: Chip,
}

impl SelectionState {
    pub fn select_tab(&mut self, tab: SavedTab) {
        self.tab = tab;
    }

    pub fn select_filter(&mut self, dimension: FilterDimension, value: FilterValue) {
        self.filters.set(dimension, value);
    }

    pub fn select_chip(&mut self, chip: Chip) {
        self.chip = chip;
    }
}

/// Raised when screen-scoped state is requested from outside its screen.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScopeError {
    #[error("{accessor} used outside the Saved screen")]
    OutsideScreen { accessor: &'static str },
}

/// What a card in a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    Item(ItemRef),
    Outfit(OutfitRef),
    Collection(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub target: CardTarget,
    pub id: String,
}

/// Paged list of cards. Only the visible page is mounted.
#[derive(Debug)]
pub struct CardList {
    pub cards: Vec<Card>,
    pub offset: usize,
    pub selected: usize,
    pub page_size: usize,
    pub bookmarks: Bookmarks,
    pub entrances: EntranceSet,
    stagger: Duration,
    from: EntranceFrom,
}

impl CardList {
    pub fn new(
        page_size: usize,
        stagger: Duration,
        from: EntranceFrom,
        persist_bookmarks: bool,
    ) -> Self {
        Self {
            cards: Vec::new(),
            offset: 0,
            selected: 0,
            page_size: page_size.max(1),
            bookmarks: Bookmarks::new(persist_bookmarks),
            entrances: EntranceSet::default(),
            stagger,
            from,
        }
    }

    /// Replace the list content and mount its first page.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.offset = 0;
        self.selected = 0;
        self.mount_page();
    }

    /// Cards currently mounted.
    pub fn page(&self) -> &[Card] {
        let start = self.offset.min(self.cards.len());
        let end = (start + self.page_size).min(self.cards.len());
        &self.cards[start..end]
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.page().get(self.selected)
    }

    fn mount_page(&mut self) {
        self.entrances.cancel();
        let ids: Vec<String> = self.page().iter().map(|c| c.id.clone()).collect();
        let count = ids.len();
        self.bookmarks.mount(ids);
        self.entrances = EntranceSet::staggered(count, self.stagger, self.from)
            .on_last_complete(move || tracing::debug!(cards = count, "Entrance finished"));
    }

    pub fn unmount(&mut self) {
        self.entrances.cancel();
        if !self.bookmarks.is_empty() {
            tracing::debug!(cards = self.bookmarks.len(), "Cards unmounted");
        }
        self.bookmarks.unmount();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return;
        }
        let absolute = self.offset + self.selected;
        self.page_size = page_size;
        self.offset = (absolute / page_size) * page_size;
        self.selected = absolute - self.offset;
        self.mount_page();
    }

    /// Move selection down in the list.
    pub fn next(&mut self) {
        if self.page().is_empty() {
            return;
        }
        if self.selected + 1 < self.page().len() {
            self.selected += 1;
        } else {
            // Next page
            let new_offset = self.offset + self.page_size;
            if new_offset < self.cards.len() {
                self.offset = new_offset;
                self.selected = 0;
                self.mount_page();
            }
        }
    }

    /// Move selection up in the list.
    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else if self.offset > 0 {
            // Prev page
            self.offset = self.offset.saturating_sub(self.page_size);
            self.mount_page();
            self.selected = self.page().len().saturating_sub(1);
        }
    }

    pub fn page_down(&mut self) {
        let new_offset = self.offset + self.page_size;
        if new_offset < self.cards.len() {
            self.offset = new_offset;
            self.mount_page();
            self.selected = 0;
        } else {
            self.last();
        }
    }

    pub fn page_up(&mut self) {
        if self.offset > 0 {
            self.offset = self.offset.saturating_sub(self.page_size);
            self.mount_page();
        }
        self.selected = 0;
    }

    pub fn first(&mut self) {
        let remount = self.offset != 0;
        self.offset = 0;
        self.selected = 0;
        if remount {
            self.mount_page();
        }
    }

    pub fn last(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        let last_page_start = ((self.cards.len() - 1) / self.page_size) * self.page_size;
        if last_page_start != self.offset {
            self.offset = last_page_start;
            self.mount_page();
        }
        self.selected = self.page().len().saturating_sub(1);
    }

    /// Flip the selected card's bookmark. Collections carry no bookmark.
    pub fn toggle_selected(&mut self) -> Option<bool> {
        let target = self.selected_card()?.target;
        match target {
            CardTarget::Collection(_) => None,
            _ => self.bookmarks.toggle(self.selected),
        }
    }
}

/// Modal option list for one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub dimension: FilterDimension,
    pub highlighted: usize,
}

#[derive(Debug)]
pub struct HomeScreen {
    pub cards: CardList,
}

#[derive(Debug)]
pub struct SavedScreen {
    pub selection: SelectionState,
    pub cards: CardList,
    pub dropdown: Option<Dropdown>,
}

/// The mounted screen. Screen-local state is dropped on switch.
#[derive(Debug)]
pub enum Screen {
    Home(HomeScreen),
    Saved(SavedScreen),
}

/// Rows taken by chrome around the Saved card list.
pub const SAVED_OVERHEAD: u16 = 14;
/// Rows per rendered card.
pub const CARD_HEIGHT: u16 = 2;

/// Number of featured collections and recent outfits on Home.
pub const FEATURED_COLLECTIONS: usize = 4;
pub const RECENT_OUTFITS: usize = 3;

/// Main application state.
pub struct App {
    pub dataset: Dataset,
    pub config: Config,
    pub matcher: ChipMatcher,
    pub screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,
    pub page_size: usize,
    pub status_msg: String,
}

impl App {
    pub fn new(dataset: Dataset, config: Config, matcher: ChipMatcher) -> Self {
        let page_size = 10;
        let home = Self::mount_home(&dataset, &config);
        let mut app = Self {
            dataset,
            config,
            matcher,
            screen: Screen::Home(home),
            should_quit: false,
            show_help: false,
            page_size,
            status_msg: String::new(),
        };
        if app.config.start_screen == StartScreen::Saved {
            app.show_saved();
        }
        app.status_msg = format!(
            "{} items, {} outfits, {} collections",
            app.dataset.items().len(),
            app.dataset.outfits().len(),
            app.dataset.collections().len()
        );
        app
    }

    fn mount_home(dataset: &Dataset, config: &Config) -> HomeScreen {
        let mut cards: Vec<Card> = dataset
            .collections()
            .iter()
            .take(FEATURED_COLLECTIONS)
            .enumerate()
            .map(|(i, c)| Card {
                target: CardTarget::Collection(i),
                id: c.id.clone(),
            })
            .collect();
        cards.extend(dataset.outfit_refs().take(RECENT_OUTFITS).map(|r| Card {
            target: CardTarget::Outfit(r),
            id: dataset.outfit(r).id.clone(),
        }));

        // Home is short enough to mount in full
        let mut list = CardList::new(
            cards.len().max(1),
            config.outfit_stagger(),
            config.entrance_from,
            config.persist_bookmarks,
        );
        list.set_cards(cards);
        HomeScreen { cards: list }
    }

    pub fn show_home(&mut self) {
        if matches!(self.screen, Screen::Home(_)) {
            return;
        }
        self.unmount_screen();
        self.screen = Screen::Home(Self::mount_home(&self.dataset, &self.config));
        tracing::debug!("Mounted Home screen");
    }

    pub fn show_saved(&mut self) {
        if matches!(self.screen, Screen::Saved(_)) {
            return;
        }
        self.unmount_screen();
        self.screen = Screen::Saved(SavedScreen {
            selection: SelectionState::default(),
            cards: CardList::new(
                self.page_size,
                self.config.outfit_stagger(),
                self.config.entrance_from,
                self.config.persist_bookmarks,
            ),
            dropdown: None,
        });
        tracing::debug!("Mounted Saved screen");
        self.refresh();
    }

    fn unmount_screen(&mut self) {
        self.cards_mut().unmount();
    }

    pub fn cards(&self) -> &CardList {
        match &self.screen {
            Screen::Home(home) => &home.cards,
            Screen::Saved(saved) => &saved.cards,
        }
    }

    pub fn cards_mut(&mut self) -> &mut CardList {
        match &mut self.screen {
            Screen::Home(home) => &mut home.cards,
            Screen::Saved(saved) => &mut saved.cards,
        }
    }

    pub fn saved(&self) -> Result<&SavedScreen, ScopeError> {
        match &self.screen {
            Screen::Saved(saved) => Ok(saved),
            Screen::Home(_) => Err(ScopeError::OutsideScreen { accessor: "saved" }),
        }
    }

    pub fn saved_mut(&mut self) -> Result<&mut SavedScreen, ScopeError> {
        match &mut self.screen {
            Screen::Saved(saved) => Ok(saved),
            Screen::Home(_) => Err(ScopeError::OutsideScreen {
                accessor: "saved_mut",
            }),
        }
    }

    /// Selection state of the mounted Saved screen.
    pub fn selection(&self) -> Result<&SelectionState, ScopeError> {
        match &self.screen {
            Screen::Saved(saved) => Ok(&saved.selection),
            Screen::Home(_) => Err(ScopeError::OutsideScreen {
                accessor: "selection",
            }),
        }
    }

    pub fn selection_mut(&mut self) -> Result<&mut SelectionState, ScopeError> {
        match &mut self.screen {
            Screen::Saved(saved) => Ok(&mut saved.selection),
            Screen::Home(_) => Err(ScopeError::OutsideScreen {
                accessor: "selection_mut",
            }),
        }
    }

    /// Re-run the filter or classifier and remount the Saved list.
    pub fn refresh(&mut self) {
        let Screen::Saved(saved) = &mut self.screen else {
            return;
        };
        let dataset = &self.dataset;
        let selection = &saved.selection;
        let (cards, stagger) = match selection.tab {
            SavedTab::Collections => (
                self.matcher
                    .outfits_for(selection.chip, dataset)
                    .into_iter()
                    .map(|(r, o)| Card {
                        target: CardTarget::Outfit(r),
                        id: o.id.clone(),
                    })
                    .collect::<Vec<_>>(),
                self.config.outfit_stagger(),
            ),
            SavedTab::Outfits => (
                dataset
                    .outfit_refs()
                    .map(|r| Card {
                        target: CardTarget::Outfit(r),
                        id: dataset.outfit(r).id.clone(),
                    })
                    .collect(),
                self.config.outfit_stagger(),
            ),
            SavedTab::Items => (
                dataset
                    .item_refs()
                    .filter(|r| selection.filters.matches(dataset.item(*r)))
                    .map(|r| Card {
                        target: CardTarget::Item(r),
                        id: dataset.item(r).id.clone(),
                    })
                    .collect(),
                self.config.item_stagger(),
            ),
        };
        saved.cards.stagger = stagger;
        saved.cards.set_cards(cards);
        tracing::debug!(
            tab = selection.tab.label(),
            chip = selection.chip.id(),
            filters = ?selection.filters.active(),
            cards = saved.cards.cards.len(),
            "Saved list refreshed"
        );
    }

    pub fn select_tab(&mut self, tab: SavedTab) -> Result<(), ScopeError> {
        let selection = self.selection_mut()?;
        if selection.tab == tab {
            return Ok(());
        }
        selection.select_tab(tab);
        self.refresh();
        Ok(())
    }

    pub fn next_tab(&mut self) -> Result<(), ScopeError> {
        let tab = self.selection()?.tab.next();
        self.select_tab(tab)
    }

    pub fn prev_tab(&mut self) -> Result<(), ScopeError> {
        let tab = self.selection()?.tab.prev();
        self.select_tab(tab)
    }

    pub fn select_filter(
        &mut self,
        dimension: FilterDimension,
        value: FilterValue,
    ) -> Result<(), ScopeError> {
        self.selection_mut()?.select_filter(dimension, value);
        self.refresh();
        self.report_filter_count()
    }

    /// Drop the last active filter pill.
    pub fn remove_last_filter(&mut self) -> Result<(), ScopeError> {
        let last = self
            .selection()?
            .filters
            .active()
            .last()
            .map(|(dim, _)| *dim);
        match last {
            Some(dimension) => self.select_filter(dimension, FilterValue::All),
            None => Ok(()),
        }
    }

    pub fn clear_filters(&mut self) -> Result<(), ScopeError> {
        self.selection_mut()?.filters.clear();
        self.refresh();
        self.report_filter_count()
    }

    fn report_filter_count(&mut self) -> Result<(), ScopeError> {
        let count = self.saved()?.cards.cards.len();
        self.status_msg = format!("{} items match", count);
        Ok(())
    }

    pub fn select_chip(&mut self, chip: Chip) -> Result<(), ScopeError> {
        let selection = self.selection_mut()?;
        if selection.chip == chip {
            return Ok(());
        }
        selection.select_chip(chip);
        self.refresh();
        Ok(())
    }

    pub fn next_chip(&mut self) -> Result<(), ScopeError> {
        let chip = self.selection()?.chip.next();
        self.select_chip(chip)
    }

    pub fn prev_chip(&mut self) -> Result<(), ScopeError> {
        let chip = self.selection()?.chip.prev();
        self.select_chip(chip)
    }

    /// Open the dropdown for `dimension` with the current value highlighted.
    pub fn open_dropdown(&mut self, dimension: FilterDimension) -> Result<(), ScopeError> {
        let saved = self.saved_mut()?;
        let current = saved.selection.filters.get(dimension).as_str();
        let highlighted = dimension
            .options()
            .iter()
            .position(|o| *o == current)
            .unwrap_or(0);
        saved.dropdown = Some(Dropdown {
            dimension,
            highlighted,
        });
        Ok(())
    }

    pub fn close_dropdown(&mut self) -> Result<(), ScopeError> {
        self.saved_mut()?.dropdown = None;
        Ok(())
    }

    pub fn dropdown_next(&mut self) -> Result<(), ScopeError> {
        if let Some(dropdown) = self.saved_mut()?.dropdown.as_mut() {
            let len = dropdown.dimension.options().len();
            dropdown.highlighted = (dropdown.highlighted + 1) % len;
        }
        Ok(())
    }

    pub fn dropdown_prev(&mut self) -> Result<(), ScopeError> {
        if let Some(dropdown) = self.saved_mut()?.dropdown.as_mut() {
            let len = dropdown.dimension.options().len();
            dropdown.highlighted = (dropdown.highlighted + len - 1) % len;
        }
        Ok(())
    }

    /// Apply the highlighted option and close the dropdown.
    pub fn dropdown_confirm(&mut self) -> Result<(), ScopeError> {
        let Some(dropdown) = self.saved_mut()?.dropdown.take() else {
            return Ok(());
        };
        let label = dropdown
            .dimension
            .options()
            .get(dropdown.highlighted)
            .copied()
            .unwrap_or(crate::filter::ALL_LABEL);
        self.select_filter(dropdown.dimension, FilterValue::parse(label))
    }

    pub fn toggle_bookmark(&mut self) {
        if let Some(saved) = self.cards_mut().toggle_selected() {
            self.status_msg = if saved {
                "Saved".to_string()
            } else {
                "Removed from saved".to_string()
            };
        }
    }

    /// Report a press on the selected card.
    pub fn press(&mut self) {
        let Some(card) = self.cards().selected_card() else {
            return;
        };
        let msg = match card.target {
            CardTarget::Item(r) => format!("Item pressed: {}", self.dataset.item(r).name),
            CardTarget::Outfit(r) => format!("Outfit pressed: {}", self.dataset.outfit(r).title),
            CardTarget::Collection(i) => format!(
                "Collection pressed: {}",
                self.dataset.collections()[i].name
            ),
        };
        tracing::info!("{}", msg);
        self.status_msg = msg;
    }

    pub fn add_new_collection(&mut self) {
        tracing::info!("Add new collection");
        self.status_msg = "Add new collection".to_string();
    }

    /// Advance entrance animations of the mounted list.
    pub fn tick(&mut self, dt: Duration) {
        self.cards_mut().entrances.tick(dt);
    }

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let rows = terminal_height.saturating_sub(SAVED_OVERHEAD) / CARD_HEIGHT;
        self.page_size = (rows as usize).max(1);
        if let Screen::Saved(saved) = &mut self.screen {
            saved.cards.set_page_size(self.page_size);
        }
    }
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

    fn saved_app() -> App {
        let mut app = app();
        app.show_saved();
        app
    }

    fn card_ids(app: &App) -> Vec<String> {
        app.cards().cards.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_starts_on_home() {
        let app = app();
        assert!(matches!(app.screen, Screen::Home(_)));
        // two collections followed by three outfits
        assert_eq!(app.cards().cards.len(), 5);
        assert!(matches!(
            app.cards().cards[0].target,
            CardTarget::Collection(0)
        ));
    }

    #[test]
    fn test_start_screen_from_config() {
        let config = Config {
            start_screen: StartScreen::Saved,
            ..Config::default()
        };
        let app = App::new(Dataset::bundled().unwrap(), config, ChipMatcher::default());
        assert!(app.selection().is_ok());
    }

    #[test]
    fn test_selection_outside_saved_fails() {
        let mut app = app();
        assert_eq!(
            app.selection().unwrap_err(),
            ScopeError::OutsideScreen {
                accessor: "selection"
            }
        );
        assert!(app.select_tab(SavedTab::Items).is_err());
        assert!(app
            .select_filter(FilterDimension::Color, FilterValue::parse("Black"))
            .is_err());
        assert!(app.open_dropdown(FilterDimension::Type).is_err());
    }

    #[test]
    fn test_saved_initial_state() {
        let app = saved_app();
        let selection = app.selection().unwrap();
        assert_eq!(selection.tab, SavedTab::Collections);
        assert_eq!(selection.chip, Chip::Work);
        assert!(selection.filters.is_empty());
        assert_eq!(card_ids(&app), vec!["outfit-1"]);
    }

    #[test]
    fn test_tab_switch_keeps_filters() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.select_filter(FilterDimension::Color, FilterValue::parse("Black"))
            .unwrap();
        app.select_tab(SavedTab::Outfits).unwrap();
        app.select_tab(SavedTab::Items).unwrap();
        let selection = app.selection().unwrap();
        assert_eq!(selection.filters.color, FilterValue::parse("Black"));
        assert_eq!(selection.tab, SavedTab::Items);
    }

    #[test]
    fn test_filter_change_keeps_tab_and_other_dimensions() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.select_filter(FilterDimension::Type, FilterValue::parse("top"))
            .unwrap();
        app.select_filter(FilterDimension::Mood, FilterValue::parse("Date"))
            .unwrap();
        let selection = app.selection().unwrap();
        assert_eq!(selection.tab, SavedTab::Items);
        assert_eq!(selection.filters.kind, FilterValue::parse("top"));
        assert_eq!(card_ids(&app), vec!["1", "2", "7"]);
        assert_eq!(app.status_msg, "3 items match");
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = saved_app();
        app.next_tab().unwrap();
        assert_eq!(app.selection().unwrap().tab, SavedTab::Outfits);
        assert_eq!(app.cards().cards.len(), 4);
        app.prev_tab().unwrap();
        app.prev_tab().unwrap();
        assert_eq!(app.selection().unwrap().tab, SavedTab::Items);
        assert_eq!(app.cards().cards.len(), 21);
    }

    #[test]
    fn test_chip_selection_reclassifies() {
        let mut app = saved_app();
        app.select_chip(Chip::Date).unwrap();
        assert_eq!(card_ids(&app), vec!["outfit-3"]);
        app.next_chip().unwrap();
        assert_eq!(app.selection().unwrap().chip, Chip::Party);
        assert!(app.cards().cards.is_empty());
        assert!(app.cards().selected_card().is_none());
    }

    #[test]
    fn test_dropdown_flow() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.open_dropdown(FilterDimension::Type).unwrap();
        assert_eq!(app.saved().unwrap().dropdown.as_ref().unwrap().highlighted, 0);
        app.dropdown_next().unwrap();
        app.dropdown_next().unwrap();
        app.dropdown_confirm().unwrap();
        assert!(app.saved().unwrap().dropdown.is_none());
        assert_eq!(
            app.selection().unwrap().filters.kind,
            FilterValue::parse("bottom")
        );

        // reopening highlights the current value
        app.open_dropdown(FilterDimension::Type).unwrap();
        assert_eq!(app.saved().unwrap().dropdown.as_ref().unwrap().highlighted, 2);
        app.dropdown_prev().unwrap();
        app.close_dropdown().unwrap();
        assert_eq!(
            app.selection().unwrap().filters.kind,
            FilterValue::parse("bottom")
        );
    }

    #[test]
    fn test_dropdown_wraps() {
        let mut app = saved_app();
        app.open_dropdown(FilterDimension::Mood).unwrap();
        app.dropdown_prev().unwrap();
        let len = FilterDimension::Mood.options().len();
        assert_eq!(
            app.saved().unwrap().dropdown.as_ref().unwrap().highlighted,
            len - 1
        );
    }

    #[test]
    fn test_remove_last_filter_and_clear() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.select_filter(FilterDimension::Type, FilterValue::parse("top"))
            .unwrap();
        app.select_filter(FilterDimension::Color, FilterValue::parse("Blue"))
            .unwrap();
        app.remove_last_filter().unwrap();
        let filters = &app.selection().unwrap().filters;
        assert!(filters.color.is_all());
        assert_eq!(filters.kind, FilterValue::parse("top"));

        app.clear_filters().unwrap();
        assert!(app.selection().unwrap().filters.is_empty());
        assert_eq!(app.cards().cards.len(), 21);
        app.remove_last_filter().unwrap();
    }

    #[test]
    fn test_bookmark_toggle_involution() {
        let mut app = saved_app();
        app.toggle_bookmark();
        assert!(!app.cards().bookmarks.is_saved(0));
        assert_eq!(app.status_msg, "Removed from saved");
        app.toggle_bookmark();
        assert!(app.cards().bookmarks.is_saved(0));
    }

    #[test]
    fn test_paging_remounts_and_resets_bookmarks() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.cards_mut().set_page_size(4);
        app.toggle_bookmark();
        assert!(!app.cards().bookmarks.is_saved(0));

        app.cards_mut().page_down();
        assert_eq!(app.cards().offset, 4);
        app.cards_mut().page_up();
        assert!(app.cards().bookmarks.is_saved(0));
    }

    #[test]
    fn test_paging_keeps_bookmarks_when_persisted() {
        let config = Config {
            persist_bookmarks: true,
            ..Config::default()
        };
        let mut app = App::new(Dataset::bundled().unwrap(), config, ChipMatcher::default());
        app.show_saved();
        app.select_tab(SavedTab::Items).unwrap();
        app.cards_mut().set_page_size(4);
        app.toggle_bookmark();
        app.cards_mut().page_down();
        app.cards_mut().page_up();
        assert!(!app.cards().bookmarks.is_saved(0));
    }

    #[test]
    fn test_filter_change_remounts_cards() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.toggle_bookmark();
        app.select_filter(FilterDimension::Style, FilterValue::parse("Crop"))
            .unwrap();
        app.select_filter(FilterDimension::Style, FilterValue::All)
            .unwrap();
        assert!(app.cards().bookmarks.is_saved(0));
    }

    #[test]
    fn test_list_navigation_across_pages() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.cards_mut().set_page_size(5);
        for _ in 0..5 {
            app.cards_mut().next();
        }
        assert_eq!(app.cards().offset, 5);
        assert_eq!(app.cards().selected, 0);
        app.cards_mut().prev();
        assert_eq!(app.cards().offset, 0);
        assert_eq!(app.cards().selected, 4);

        app.cards_mut().last();
        assert_eq!(app.cards().offset, 20);
        assert_eq!(app.cards().selected_card().unwrap().id, "16");
        app.cards_mut().page_down();
        assert_eq!(app.cards().offset, 20);
        app.cards_mut().first();
        assert_eq!(app.cards().selected_card().unwrap().id, "z1");
    }

    #[test]
    fn test_page_size_keeps_selected_card() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.cards_mut().set_page_size(3);
        for _ in 0..7 {
            app.cards_mut().next();
        }
        let before = app.cards().selected_card().unwrap().id.clone();
        app.cards_mut().set_page_size(5);
        assert_eq!(app.cards().selected_card().unwrap().id, before);
    }

    #[test]
    fn test_switching_screens_discards_selection() {
        let mut app = saved_app();
        app.select_tab(SavedTab::Items).unwrap();
        app.show_home();
        assert!(app.selection().is_err());
        app.show_saved();
        assert_eq!(app.selection().unwrap().tab, SavedTab::Collections);
    }

    #[test]
    fn test_home_collections_have_no_bookmark() {
        let mut app = app();
        app.toggle_bookmark();
        assert!(app.cards().bookmarks.is_saved(0));
        app.press();
        assert_eq!(app.status_msg, "Collection pressed: Work Essentials");

        app.cards_mut().last();
        app.toggle_bookmark();
        assert!(!app.cards().bookmarks.is_saved(4));
        app.press();
        assert_eq!(app.status_msg, "Outfit pressed: Date Night");
    }

    #[test]
    fn test_tick_advances_entrances() {
        let mut app = saved_app();
        assert!(app.cards().entrances.is_running());
        app.tick(Duration::from_secs(5));
        assert!(!app.cards().entrances.is_running());
    }

    #[test]
    fn test_update_page_size() {
        let mut app = saved_app();
        app.update_page_size(SAVED_OVERHEAD + 3 * CARD_HEIGHT);
        assert_eq!(app.page_size, 3);
        assert_eq!(app.cards().page_size, 3);
        app.update_page_size(2);
        assert_eq!(app.page_size, 1);
    }
}
