use std::collections::HashSet;

use crate::keyword::{Keyword, KeywordSet};
use crate::sink::ResultSink;
use crate::store::KeywordStore;

/// Whether any keywords are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherState {
    /// No keywords, `detect` does nothing
    Idle,
    /// At least one keyword is watched
    Armed,
}

/// Watches a keyword list and reports each keyword the first time it shows
/// up in the text fed to `detect`.
///
/// Detections are remembered until the next `configure` or `clear`.
pub struct KeywordMatcher<S: KeywordStore, R: ResultSink> {
    store: S,
    sink: R,
    raw: String,
    keywords: KeywordSet,
    detected: HashSet<String>,
    detection_order: Vec<String>,
}

impl<S: KeywordStore, R: ResultSink> KeywordMatcher<S, R> {
    /// Create a matcher from whatever list `store` has saved.
    ///
    /// An unreadable store is logged and treated as empty.
    pub fn new(store: S, sink: R) -> Self {
        let raw = match store.get() {
            Ok(raw) => raw.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to load saved keywords, starting empty: {}", e);
                String::new()
            }
        };
        let keywords = KeywordSet::parse(&raw);

        tracing::info!("Keyword matcher ready with {} keyword(s)", keywords.len());

        Self {
            store,
            sink,
            raw,
            keywords,
            detected: HashSet::new(),
            detection_order: Vec::new(),
        }
    }

    /// Replace the keyword list and start a new session.
    ///
    /// The raw string is saved unchanged. A save failure is logged; the new
    /// list is used either way.
    pub fn configure(&mut self, raw: &str) {
        self.keywords = KeywordSet::parse(raw);
        self.raw = raw.to_string();

        if let Err(e) = self.store.set(raw) {
            tracing::warn!("Failed to save keywords: {}", e);
        }

        self.reset_session();

        tracing::info!(
            "Keywords updated: {} keyword(s), state {:?}",
            self.keywords.len(),
            self.state()
        );
    }

    /// Scan `text` and report keywords seen for the first time this session.
    ///
    /// Returns the new detections in keyword-list order. Empty text or an
    /// empty keyword list is a no-op.
    pub fn detect(&mut self, text: &str) -> Vec<String> {
        if text.is_empty() || self.keywords.is_empty() {
            return Vec::new();
        }

        let mut newly_detected = Vec::new();

        for keyword in &self.keywords {
            if self.detected.contains(keyword.text()) {
                continue;
            }

            if keyword.matches_text(text) {
                Self::record(
                    keyword,
                    &mut self.detected,
                    &mut self.detection_order,
                    &mut self.sink,
                );
                newly_detected.push(keyword.text().to_string());
            }
        }

        if !newly_detected.is_empty() {
            tracing::debug!("Detected {:?} in {:?}", newly_detected, text);
        }

        newly_detected
    }

    /// Forget detections and empty the display. Keywords are kept.
    pub fn clear(&mut self) {
        self.reset_session();
        tracing::debug!("Detection session cleared");
    }

    pub fn state(&self) -> MatcherState {
        if self.keywords.is_empty() {
            MatcherState::Idle
        } else {
            MatcherState::Armed
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Raw list exactly as last configured or loaded
    pub fn raw_keywords(&self) -> &str {
        &self.raw
    }

    /// Keywords detected this session, in detection order
    pub fn detected(&self) -> &[String] {
        &self.detection_order
    }

    pub fn is_detected(&self, keyword: &str) -> bool {
        self.detected.contains(keyword)
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (S, R) {
        (self.store, self.sink)
    }

    fn reset_session(&mut self) {
        self.detected.clear();
        self.detection_order.clear();
        self.sink.clear();
    }

    fn record(
        keyword: &Keyword,
        detected: &mut HashSet<String>,
        detection_order: &mut Vec<String>,
        sink: &mut R,
    ) {
        detected.insert(keyword.text().to_string());
        detection_order.push(keyword.text().to_string());
        sink.show(keyword.text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::sink::RecordingSink;
    use crate::store::MemoryStore;

    fn matcher(raw: &str) -> KeywordMatcher<MemoryStore, RecordingSink> {
        let mut matcher = KeywordMatcher::new(MemoryStore::new(), RecordingSink::new());
        matcher.configure(raw);
        matcher
    }

    /// Store that refuses every operation
    struct BrokenStore;

    impl KeywordStore for BrokenStore {
        fn get(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::NoConfigDir)
        }

        fn set(&mut self, _raw: &str) -> Result<(), StoreError> {
            Err(StoreError::NoConfigDir)
        }
    }

    #[test]
    fn test_new_loads_saved_keywords() {
        let matcher = KeywordMatcher::new(
            MemoryStore::with_value("goal, red card"),
            RecordingSink::new(),
        );
        assert_eq!(matcher.keywords().texts(), vec!["goal", "red card"]);
        assert_eq!(matcher.raw_keywords(), "goal, red card");
        assert_eq!(matcher.state(), MatcherState::Armed);
        assert!(matcher.detected().is_empty());
    }

    #[test]
    fn test_new_without_saved_keywords_is_idle() {
        let matcher = KeywordMatcher::new(MemoryStore::new(), RecordingSink::new());
        assert_eq!(matcher.state(), MatcherState::Idle);
        assert!(matcher.keywords().is_empty());
    }

    #[test]
    fn test_configure_persists_raw_string() {
        let matcher = matcher(" a , b ,");
        assert_eq!(matcher.store().get().unwrap().as_deref(), Some(" a , b ,"));
        assert_eq!(matcher.keywords().texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_configure_then_clear_is_empty() {
        let mut matcher = matcher("a,b");
        matcher.detect("a b");
        matcher.clear();
        assert!(matcher.detected().is_empty());
        assert!(matcher.sink().shown().is_empty());
        assert_eq!(matcher.keywords().len(), 2);
    }

    #[test]
    fn test_detect_is_idempotent() {
        let mut matcher = matcher("cat, dog");
        let first = matcher.detect("the cat and the dog");
        let after_first = matcher.detected().to_vec();

        let second = matcher.detect("the cat and the dog");

        assert_eq!(first, vec!["cat", "dog"]);
        assert!(second.is_empty());
        assert_eq!(matcher.detected(), after_first.as_slice());
        assert_eq!(matcher.sink().shown(), ["cat", "dog"]);
    }

    #[test]
    fn test_word_boundary() {
        let mut matcher = matcher("cat");
        assert!(matcher.detect("category").is_empty());
        assert_eq!(matcher.detect("a cat sat"), vec!["cat"]);
    }

    #[test]
    fn test_case_insensitive_reports_configured_text() {
        let mut matcher = matcher("Hello");
        assert_eq!(matcher.detect("well, hello there"), vec!["Hello"]);
        assert_eq!(matcher.sink().shown(), ["Hello"]);
    }

    #[test]
    fn test_reconfigure_resets_session() {
        let mut matcher = matcher("a,b");
        assert_eq!(matcher.detect("a"), vec!["a"]);

        matcher.configure("a,b");
        assert!(matcher.detected().is_empty());
        assert!(matcher.sink().shown().is_empty());

        assert_eq!(matcher.detect("a"), vec!["a"]);
    }

    #[test]
    fn test_reconfigure_drops_old_keywords() {
        let mut matcher = matcher("goal");
        matcher.configure("corner");
        assert!(matcher.detect("goal!").is_empty());
        assert_eq!(matcher.detect("corner kick"), vec!["corner"]);
    }

    #[test]
    fn test_duplicates_notify_once() {
        let mut matcher = matcher("a, a ,b");
        assert_eq!(matcher.keywords().len(), 3);

        assert_eq!(matcher.detect("a b"), vec!["a", "b"]);
        assert_eq!(matcher.sink().shown(), ["a", "b"]);
    }

    #[test]
    fn test_ties_reported_in_keyword_order() {
        let mut matcher = matcher("zeta, alpha");
        assert_eq!(matcher.detect("alpha then zeta"), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_detect_noop_on_empty_text() {
        let mut matcher = matcher("a");
        let clears = matcher.sink().clear_count();

        assert!(matcher.detect("").is_empty());
        assert!(matcher.sink().shown().is_empty());
        assert_eq!(matcher.sink().clear_count(), clears);
    }

    #[test]
    fn test_detect_noop_when_idle() {
        let mut matcher = matcher(" , ");
        assert_eq!(matcher.state(), MatcherState::Idle);
        assert!(matcher.detect("anything at all").is_empty());
        assert!(matcher.sink().shown().is_empty());
    }

    #[test]
    fn test_metacharacter_keyword_does_not_break_list() {
        let mut matcher = matcher("(x, a.b, ok");
        assert_eq!(matcher.keywords().len(), 3);
        assert!(matcher.detect("axb").is_empty());
        assert_eq!(matcher.detect("ok (x a.b"), vec!["(x", "a.b", "ok"]);
    }

    #[test]
    fn test_unbuildable_keyword_skipped() {
        let raw = format!("goal, {}, corner", "a".repeat(3_000_000));
        let mut matcher = matcher(&raw);

        assert_eq!(matcher.keywords().texts(), vec!["goal", "corner"]);
        assert_eq!(matcher.state(), MatcherState::Armed);
        assert_eq!(matcher.detect("corner then goal"), vec!["goal", "corner"]);
    }

    #[test]
    fn test_detections_accumulate_across_calls() {
        let mut matcher = matcher("kickoff, goal, full time");
        matcher.detect("Kickoff!");
        matcher.detect("GOAL");
        matcher.detect("goal again");

        assert_eq!(matcher.detected(), ["kickoff", "goal"]);
        assert!(matcher.is_detected("goal"));
        assert!(!matcher.is_detected("full time"));
    }

    #[test]
    fn test_broken_store_does_not_block_configure() {
        let mut matcher = KeywordMatcher::new(BrokenStore, RecordingSink::new());
        assert_eq!(matcher.state(), MatcherState::Idle);

        matcher.configure("goal");
        assert_eq!(matcher.state(), MatcherState::Armed);
        assert_eq!(matcher.detect("goal"), vec!["goal"]);
    }

    #[test]
    fn test_into_parts() {
        let mut matcher = matcher("a");
        matcher.detect("a");

        let (store, sink) = matcher.into_parts();
        assert_eq!(store.get().unwrap().as_deref(), Some("a"));
        assert_eq!(sink.shown(), ["a"]);
    }
}
