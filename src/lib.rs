//! Keyword watching for text streams such as live captions or chat.
//!
//! ## Architecture
//!
//! ```text
//! host text ──> KeywordMatcher::detect ──> ResultSink::show
//!                     │
//!                     └── KeywordStore (raw keyword list)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use keyword_watch::{KeywordMatcher, MemoryStore, RecordingSink};
//!
//! let mut matcher = KeywordMatcher::new(MemoryStore::new(), RecordingSink::new());
//! matcher.configure("goal, red card");
//!
//! assert_eq!(matcher.detect("GOAL! What a strike"), vec!["goal"]);
//! assert!(matcher.detect("another goal").is_empty());
//! ```

pub mod config;
pub mod error;
pub mod keyword;
pub mod matcher;
pub mod sink;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppResult, ConfigError, KeywordError, StoreError};
pub use keyword::{Keyword, KeywordSet};
pub use matcher::{KeywordMatcher, MatcherState};
pub use sink::{ChannelSink, LogSink, RecordingSink, ResultSink, SinkEvent};
pub use store::{JsonFileStore, KeywordStore, MemoryStore};
