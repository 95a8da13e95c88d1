//! SearchBar state
//!
//! Holds everything the autocomplete widget knows: the query, the current
//! suggestions, which row is highlighted, whether the list is open and which
//! book was picked. It is frontend-agnostic; the TUI feeds it events with a
//! timestamp and runs the [`FetchRequest`]s it hands out.
//!
//! Requests carry a sequence number so a slow response for an old query can
//! never overwrite suggestions for a newer one.

use crate::catalog::Suggestion;
use crate::debounce::Debouncer;
use crate::error::Result;
use std::time::{Duration, Instant};

/// A lookup the owner should run against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: String,
}

/// Coarse widget state, derived from the individual flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing typed and nothing selected
    Idle,
    /// Query entered, list open but nothing to show yet
    Typing,
    /// List open with at least one suggestion
    ShowingSuggestions,
    /// A book was picked and the list is closed
    Selected,
}

pub struct SearchBar {
    query: String,
    suggestions: Vec<Suggestion>,
    active: Option<usize>,
    show_suggestions: bool,
    selected: Option<Suggestion>,

    debouncer: Debouncer<String>,
    issued_seq: u64,
    applied_seq: u64,
    in_flight: usize,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new(crate::debounce::DEFAULT_DELAY)
    }
}

impl SearchBar {
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            active: None,
            show_suggestions: false,
            selected: None,
            debouncer: Debouncer::new(debounce_delay),
            issued_seq: 0,
            applied_seq: 0,
            in_flight: 0,
        }
    }

    // --- Accessors ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.selected.as_ref()
    }

    /// The list is drawn only while open and while there is a query
    pub fn list_visible(&self) -> bool {
        self.show_suggestions && !self.query.is_empty()
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// True while a lookup is armed or waiting for a response
    pub fn is_searching(&self) -> bool {
        self.debouncer.is_pending() || self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// How long the owner may sleep before the next [`poll`](Self::poll) matters
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    pub fn phase(&self) -> Phase {
        if self.list_visible() {
            if self.suggestions.is_empty() {
                Phase::Typing
            } else {
                Phase::ShowingSuggestions
            }
        } else if self.selected.is_some() {
            Phase::Selected
        } else if self.query.is_empty() {
            Phase::Idle
        } else {
            Phase::Typing
        }
    }

    // --- Input ---

    /// Record a new query text. Opens the list and clears the highlight.
    ///
    /// An empty query clears the suggestions right away and drops both the
    /// armed lookup and any response still on its way.
    pub fn input_changed(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.show_suggestions = true;
        self.active = None;

        if self.query.is_empty() {
            self.suggestions.clear();
            self.debouncer.cancel();
            self.applied_seq = self.issued_seq;
            tracing::debug!("query cleared");
        } else {
            self.debouncer.schedule(self.query.clone(), now);
        }
    }

    /// Hand out the pending lookup once the debounce delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        let query = self.debouncer.poll(now)?;
        self.issued_seq += 1;
        self.in_flight += 1;
        tracing::info!(seq = self.issued_seq, query = %query, "dispatching lookup");
        Some(FetchRequest {
            seq: self.issued_seq,
            query,
        })
    }

    /// Install the outcome of a lookup. Failures count as "no suggestions".
    ///
    /// Returns false if the response was older than what is already shown.
    pub fn apply_response(&mut self, seq: u64, result: Result<Vec<Suggestion>>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if seq <= self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "discarding stale response");
            return false;
        }
        self.applied_seq = seq;

        match result {
            Ok(suggestions) => {
                tracing::debug!(seq, count = suggestions.len(), "suggestions updated");
                self.suggestions = suggestions;
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(seq, error = %e, "lookup failed, showing no suggestions");
                self.suggestions.clear();
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "catalog unusable, showing no suggestions");
                self.suggestions.clear();
            }
        }
        self.active = None;
        true
    }

    // --- Navigation ---

    /// ArrowDown: first row from nothing, otherwise one down, stopping at the last row
    pub fn select_next(&mut self) {
        let last = match self.suggestions.len() {
            0 => return,
            n => n - 1,
        };
        self.active = match self.active {
            None => Some(0),
            Some(i) => Some((i + 1).min(last)),
        };
    }

    /// ArrowUp: one up, stopping at the first row. Nothing highlighted stays that way.
    pub fn select_prev(&mut self) {
        if let Some(i) = self.active {
            self.active = Some(i.saturating_sub(1));
        }
    }

    /// Pointer over a row
    pub fn hover(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.active = Some(index);
        }
    }

    // --- Selection ---

    /// Enter: pick the highlighted row and close the list.
    ///
    /// Returns the newly picked book. With nothing highlighted the list still
    /// closes, nothing is returned and the previous pick stays.
    pub fn commit_active(&mut self) -> Option<&Suggestion> {
        self.show_suggestions = false;
        let book = self.active.and_then(|i| self.suggestions.get(i))?.clone();
        tracing::info!(title = %book.title, "book selected");
        self.selected = Some(book);
        self.selected.as_ref()
    }

    /// Click on a row: pick it and close the list
    pub fn click(&mut self, index: usize) -> Option<&Suggestion> {
        let book = self.suggestions.get(index)?.clone();
        tracing::info!(title = %book.title, "book selected");
        self.selected = Some(book);
        self.show_suggestions = false;
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookSearchError;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    const DELAY: Duration = Duration::from_millis(300);

    fn books(titles: &[&str]) -> Vec<Suggestion> {
        titles.iter().map(|t| Suggestion::new(*t)).collect()
    }

    /// A bar that already shows the given titles for the query "Book"
    fn showing(titles: &[&str]) -> SearchBar {
        let t0 = Instant::now();
        let mut bar = SearchBar::new(DELAY);
        bar.input_changed("Book", t0);
        let req = bar.poll(t0 + DELAY).unwrap();
        assert!(bar.apply_response(req.seq, Ok(books(titles))));
        bar
    }

    #[test]
    fn starts_idle() {
        let bar = SearchBar::default();
        assert_eq!(bar.phase(), Phase::Idle);
        assert!(!bar.list_visible());
        assert_eq!(bar.active_index(), None);
        assert!(bar.selected().is_none());
    }

    #[test]
    fn typing_opens_list_and_resets_highlight() {
        let mut bar = showing(&["Book 1", "Book 2"]);
        bar.select_next();
        assert_eq!(bar.active_index(), Some(0));

        bar.input_changed("Book ", Instant::now());
        assert!(bar.show_suggestions());
        assert_eq!(bar.active_index(), None);
    }

    #[test]
    fn keystrokes_within_window_yield_one_request_for_final_value() {
        let t0 = Instant::now();
        let mut bar = SearchBar::new(DELAY);
        for (i, q) in ["B", "Bo", "Boo", "Book"].iter().enumerate() {
            bar.input_changed(*q, t0 + Duration::from_millis(50 * i as u64));
            assert_eq!(bar.poll(t0 + Duration::from_millis(50 * i as u64 + 10)), None);
        }

        let last = t0 + Duration::from_millis(150);
        assert_eq!(bar.poll(last + DELAY - Duration::from_millis(1)), None);
        assert_eq!(
            bar.poll(last + DELAY),
            Some(FetchRequest {
                seq: 1,
                query: "Book".to_string()
            })
        );
        assert_eq!(bar.poll(last + DELAY * 10), None);
        assert_eq!(bar.in_flight(), 1);
    }

    #[test]
    fn empty_query_clears_without_request() {
        let mut bar = showing(&["Book 1"]);
        let now = Instant::now();
        bar.input_changed("Boo", now);
        bar.input_changed("", now);

        assert!(bar.suggestions().is_empty());
        assert!(!bar.is_searching());
        assert_eq!(bar.poll(now + DELAY * 2), None);
        assert!(!bar.list_visible());
    }

    #[test]
    fn clearing_drops_in_flight_responses() {
        let t0 = Instant::now();
        let mut bar = SearchBar::new(DELAY);
        bar.input_changed("Dune", t0);
        let req = bar.poll(t0 + DELAY).unwrap();

        bar.input_changed("", t0 + DELAY);
        assert!(!bar.apply_response(req.seq, Ok(books(&["Dune"]))));
        assert!(bar.suggestions().is_empty());
        assert_eq!(bar.in_flight(), 0);
    }

    #[test]
    fn stale_response_is_discarded() {
        let t0 = Instant::now();
        let mut bar = SearchBar::new(DELAY);
        bar.input_changed("Du", t0);
        let old = bar.poll(t0 + DELAY).unwrap();
        bar.input_changed("Dune", t0 + DELAY);
        let new = bar.poll(t0 + DELAY * 2).unwrap();

        assert!(bar.apply_response(new.seq, Ok(books(&["Dune"]))));
        assert!(!bar.apply_response(old.seq, Ok(books(&["Dust", "Duke"]))));
        assert_eq!(bar.suggestions(), books(&["Dune"]).as_slice());
    }

    #[test]
    fn failed_lookup_shows_nothing() {
        let mut bar = showing(&["Book 1"]);
        let now = Instant::now();
        bar.input_changed("Books", now);
        let req = bar.poll(now + DELAY).unwrap();
        let decode = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();

        assert!(bar.apply_response(req.seq, Err(BookSearchError::Decode(decode))));
        assert!(bar.suggestions().is_empty());
        assert!(bar.list_visible());
        assert_eq!(bar.phase(), Phase::Typing);
    }

    #[test]
    fn arrow_keys_clamp_at_both_ends() {
        let mut bar = showing(&["Book 1", "Book 2"]);

        bar.select_prev();
        assert_eq!(bar.active_index(), None);

        bar.select_next();
        assert_eq!(bar.active_index(), Some(0));
        bar.select_next();
        assert_eq!(bar.active_index(), Some(1));
        bar.select_next();
        assert_eq!(bar.active_index(), Some(1));

        bar.select_prev();
        assert_eq!(bar.active_index(), Some(0));
        bar.select_prev();
        assert_eq!(bar.active_index(), Some(0));
    }

    #[test]
    fn arrow_down_on_empty_list_is_noop() {
        let mut bar = SearchBar::default();
        bar.select_next();
        assert_eq!(bar.active_index(), None);
    }

    #[test]
    fn hover_highlights_only_valid_rows() {
        let mut bar = showing(&["Book 1", "Book 2"]);
        bar.hover(1);
        assert!(bar.is_highlighted(1));
        assert!(!bar.is_highlighted(0));

        bar.hover(5);
        assert_eq!(bar.active_index(), Some(1));
    }

    #[test]
    fn click_selects_and_closes_list() {
        let mut bar = showing(&["Book 1", "Book 2"]);
        assert_eq!(bar.click(0), Some(&Suggestion::new("Book 1")));
        assert!(!bar.list_visible());
        assert_eq!(bar.phase(), Phase::Selected);
        assert_eq!(bar.click(9), None);
    }

    #[test]
    fn enter_commits_highlighted_row() {
        let mut bar = showing(&["Book 1", "Book 2"]);
        bar.select_next();
        bar.select_next();
        assert_eq!(bar.commit_active(), Some(&Suggestion::new("Book 2")));
        assert!(!bar.show_suggestions());
    }

    #[test]
    fn enter_without_highlight_keeps_previous_pick() {
        let mut bar = showing(&["Book 1", "Book 2"]);
        bar.click(1);
        bar.input_changed("Book", Instant::now());
        assert_eq!(bar.commit_active(), None);
        assert!(!bar.list_visible());
        assert_eq!(bar.selected(), Some(&Suggestion::new("Book 2")));
    }

    /// Collects formatted log output for one test
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogCapture {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn failed_lookup_log(error: BookSearchError) -> Vec<String> {
        let capture = LogCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let t0 = Instant::now();
            let mut bar = SearchBar::new(DELAY);
            bar.input_changed("Dune", t0);
            let req = bar.poll(t0 + DELAY).unwrap();
            assert!(bar.apply_response(req.seq, Err(error)));
            assert!(bar.suggestions().is_empty());
        });
        capture.lines()
    }

    #[test]
    fn recoverable_failure_logs_warning() {
        let lines = failed_lookup_log(BookSearchError::Status {
            status: 503,
            url: "http://localhost".to_string(),
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("lookup failed"));
    }

    #[test]
    fn unrecoverable_failure_logs_error() {
        let lines = failed_lookup_log(BookSearchError::InvalidEndpoint("nope".to_string()));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("catalog unusable"));
    }

    #[test]
    fn selection_survives_further_typing() {
        let mut bar = showing(&["Book 1"]);
        bar.click(0);
        bar.input_changed("Something else", Instant::now());
        assert_eq!(bar.selected(), Some(&Suggestion::new("Book 1")));
        // previous suggestions stay listed until the next response lands
        assert_eq!(bar.phase(), Phase::ShowingSuggestions);
    }

    #[test]
    fn new_suggestions_reset_highlight() {
        let t0 = Instant::now();
        let mut bar = showing(&["Book 1", "Book 2", "Book 3"]);
        bar.select_next();
        bar.select_next();
        bar.input_changed("Book 1", t0);
        let req = bar.poll(t0 + DELAY).unwrap();
        bar.select_next();
        bar.select_next();
        bar.apply_response(req.seq, Ok(books(&["Book 1"])));
        assert_eq!(bar.active_index(), None);
    }
}
