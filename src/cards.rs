use std::collections::HashMap;

/// Saved flag every card starts with when it mounts.
pub const DEFAULT_SAVED: bool = true;

/// Bookmark flags of the cards currently mounted in one list.
///
/// Each mounted card owns one flag. In local mode the flags live only as
/// long as the cards are mounted, so paging a card out of view and back
/// resets it to [`DEFAULT_SAVED`]. With `persist` enabled the flags are
/// mirrored into a session map keyed by record id and restored on mount.
#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    mounted: Vec<(String, bool)>,
    session: Option<HashMap<String, bool>>,
}

impl Bookmarks {
    pub fn new(persist: bool) -> Self {
        Self {
            mounted: Vec::new(),
            session: persist.then(HashMap::new),
        }
    }

    /// Replace the mounted cards. Previously mounted flags are discarded.
    pub fn mount<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let session = self.session.as_ref();
        self.mounted = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                let saved = session
                    .and_then(|map| map.get(&id).copied())
                    .unwrap_or(DEFAULT_SAVED);
                (id, saved)
            })
            .collect();
    }

    pub fn unmount(&mut self) {
        self.mounted.clear();
    }

    pub fn is_saved(&self, card: usize) -> bool {
        self.mounted
            .get(card)
            .map_or(DEFAULT_SAVED, |(_, saved)| *saved)
    }

    /// Flip one card's flag and return the new value.
    pub fn toggle(&mut self, card: usize) -> Option<bool> {
        let (id, saved) = self.mounted.get_mut(card)?;
        *saved = !*saved;
        if let Some(map) = self.session.as_mut() {
            map.insert(id.clone(), *saved);
        }
        tracing::debug!(card = %id, saved = *saved, "Bookmark toggled");
        Some(*saved)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_mount_saved() {
        let mut marks = Bookmarks::new(false);
        marks.mount(["a", "b", "c"]);
        assert_eq!(marks.len(), 3);
        assert!((0..3).all(|i| marks.is_saved(i)));
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut marks = Bookmarks::new(false);
        marks.mount(["a"]);
        assert_eq!(marks.toggle(0), Some(false));
        assert_eq!(marks.toggle(0), Some(true));
        assert!(marks.is_saved(0));
    }

    #[test]
    fn test_toggle_is_per_card() {
        let mut marks = Bookmarks::new(false);
        marks.mount(["a", "b"]);
        marks.toggle(1);
        assert!(marks.is_saved(0));
        assert!(!marks.is_saved(1));
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut marks = Bookmarks::new(false);
        assert_eq!(marks.toggle(0), None);
        assert!(marks.is_empty());
    }

    #[test]
    fn test_remount_resets_local_flags() {
        let mut marks = Bookmarks::new(false);
        marks.mount(["a", "b"]);
        marks.toggle(0);
        marks.mount(["c"]);
        marks.mount(["a", "b"]);
        assert!(marks.is_saved(0));
    }

    #[test]
    fn test_remount_keeps_session_flags() {
        let mut marks = Bookmarks::new(true);
        marks.mount(["a", "b"]);
        marks.toggle(0);
        marks.unmount();
        marks.mount(["b", "a"]);
        assert!(marks.is_saved(0));
        assert!(!marks.is_saved(1));
    }
}
