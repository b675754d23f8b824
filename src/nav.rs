//! Page counter and navigation history.
//!
//! The exhibit is a single strip of pages addressed by a non-negative
//! counter. Every counter change is mirrored into a navigation history so
//! that back/forward actions can restore earlier pages, and each recorded
//! entry carries the shareable `?page=N` form of the index.

/// A single navigation record: the page index plus its shareable query form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub index: u32,
    pub query: String,
}

impl HistoryEntry {
    /// Entry for a page index, query rendered as `?page=N`.
    pub fn for_index(index: u32) -> Self {
        Self {
            index,
            query: format!("?page={index}"),
        }
    }
}

/// Parse the index back out of a `?page=N` query string.
pub fn page_from_query(query: &str) -> Option<u32> {
    query
        .strip_prefix("?page=")
        .and_then(|raw| raw.parse::<u32>().ok())
}

/// Where pushed entries go and where restored indices come from.
///
/// Kept behind a trait so the page transition logic is testable without a
/// window or a live session.
pub trait NavigationHistory {
    /// Record an entry as the newest navigation point.
    fn push(&mut self, entry: HistoryEntry);

    /// The entry the session is currently positioned on, if any.
    fn current(&self) -> Option<&HistoryEntry>;
}

/// In-memory session history with browser-like cursor semantics.
///
/// `push` from a back-navigated position discards the forward branch,
/// exactly as a browser history does.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All recorded entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Step back one entry. Returns the restored entry, or None when the
    /// session is already at its oldest point.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. Returns the restored entry, or None when
    /// there is no forward branch.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }
}

impl NavigationHistory for SessionHistory {
    fn push(&mut self, entry: HistoryEntry) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }
}

/// The page counter and its coupling to the navigation history.
///
/// Transitions are total: `advance` has no upper bound (indices past the
/// authored content fall through to the dispatch fallback), `retreat`
/// clamps at zero rather than wrapping. The asymmetry is deliberate and
/// mirrors the exhibit's original behavior.
#[derive(Debug)]
pub struct PageFlow<H: NavigationHistory> {
    index: u32,
    history: H,
}

impl<H: NavigationHistory> PageFlow<H> {
    /// Start on `initial`, recording it as the first entry when the
    /// history does not already sit on it.
    pub fn new(initial: u32, history: H) -> Self {
        let mut flow = Self {
            index: initial,
            history,
        };
        flow.record();
        flow
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Move one page forward and record the new position.
    pub fn advance(&mut self) {
        self.index = self.index.saturating_add(1);
        self.record();
    }

    /// Move one page back, clamped at the first page, and record the new
    /// position. At zero this is a no-op (nothing is recorded either,
    /// since the value is unchanged).
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.record();
    }

    /// Adopt the index restored by an external navigation event.
    ///
    /// Never records: the restored entry already lives in the history.
    /// A `None` event (navigation with no stored index) is a no-op.
    /// Returns whether the counter was updated.
    pub fn sync_from_history(&mut self, entry: Option<&HistoryEntry>) -> bool {
        match entry {
            Some(restored) => {
                self.index = restored.index;
                true
            }
            None => false,
        }
    }

    /// Record the current index unless the history already sits on it.
    /// Skipping the equal case keeps back/forward stacks duplicate-free.
    fn record(&mut self) {
        if self.history.current().map(|entry| entry.index) == Some(self.index) {
            return;
        }
        self.history.push(HistoryEntry::for_index(self.index));
    }
}

impl PageFlow<SessionHistory> {
    /// External back navigation: restore the previous entry, if any.
    pub fn navigate_back(&mut self) -> bool {
        let restored = self.history.back().cloned();
        self.sync_from_history(restored.as_ref())
    }

    /// External forward navigation: restore the next entry, if any.
    pub fn navigate_forward(&mut self) -> bool {
        let restored = self.history.forward().cloned();
        self.sync_from_history(restored.as_ref())
    }

    pub fn session(&self) -> &SessionHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_query_renders_page_number() {
        let entry = HistoryEntry::for_index(7);
        assert_eq!(entry.index, 7);
        assert_eq!(entry.query, "?page=7");
    }

    #[test]
    fn query_round_trips() {
        for index in [0, 1, 42, u32::MAX] {
            let entry = HistoryEntry::for_index(index);
            assert_eq!(page_from_query(&entry.query), Some(index));
        }
        assert_eq!(page_from_query("?page=abc"), None);
        assert_eq!(page_from_query("page=3"), None);
        assert_eq!(page_from_query(""), None);
    }

    #[test]
    fn new_flow_records_initial_entry() {
        let flow = PageFlow::new(0, SessionHistory::new());
        assert_eq!(flow.index(), 0);
        assert_eq!(flow.session().len(), 1);
        assert_eq!(flow.history().current().map(|e| e.index), Some(0));
    }

    #[test]
    fn retreat_clamps_at_zero_without_recording() {
        let mut flow = PageFlow::new(0, SessionHistory::new());
        flow.retreat();
        assert_eq!(flow.index(), 0, "retreat at the floor must stay at zero");
        assert_eq!(
            flow.session().len(),
            1,
            "unchanged index must not push a duplicate entry"
        );
    }

    #[test]
    fn push_truncates_forward_branch() {
        let mut history = SessionHistory::new();
        history.push(HistoryEntry::for_index(0));
        history.push(HistoryEntry::for_index(1));
        history.push(HistoryEntry::for_index(2));

        assert_eq!(history.back().map(|e| e.index), Some(1));
        history.push(HistoryEntry::for_index(5));

        let indices: Vec<u32> = history.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 5]);
        assert_eq!(history.forward(), None, "forward branch was discarded");
    }

    #[test]
    fn back_at_oldest_is_noop() {
        let mut history = SessionHistory::new();
        assert_eq!(history.back(), None);

        history.push(HistoryEntry::for_index(0));
        assert_eq!(history.back(), None, "single entry has nothing behind it");
        assert_eq!(history.current().map(|e| e.index), Some(0));
    }

    #[test]
    fn sync_without_entry_is_noop() {
        let mut flow = PageFlow::new(3, SessionHistory::new());
        assert!(!flow.sync_from_history(None));
        assert_eq!(flow.index(), 3);
    }
}
