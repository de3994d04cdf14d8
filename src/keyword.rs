use regex::Regex;

use crate::error::KeywordError;

/// A single watched term with its compiled whole-word pattern
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    pattern: Regex,
}

impl Keyword {
    /// Build a keyword from raw list input.
    ///
    /// The entry is trimmed; an empty result is rejected. Keyword text is
    /// escaped before it goes into the pattern, so metacharacters match
    /// literally.
    pub fn new(raw: &str) -> Result<Self, KeywordError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(KeywordError::Empty);
        }

        let pattern = Regex::new(&Self::pattern_source(text)).map_err(|source| {
            KeywordError::Pattern {
                keyword: text.to_string(),
                source,
            }
        })?;

        Ok(Self {
            text: text.to_string(),
            pattern,
        })
    }

    /// Normalized keyword text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Case-insensitive whole-word test against `haystack`
    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }

    /// Match the whole text first, then each whitespace-delimited token
    pub fn matches_text(&self, text: &str) -> bool {
        self.is_match(text) || text.split_whitespace().any(|token| self.is_match(token))
    }

    /// Pattern source for a trimmed keyword.
    ///
    /// Half boundaries only look outward: the character before the keyword
    /// and the one after it must not be word characters, whatever the
    /// keyword's own edge characters are.
    fn pattern_source(text: &str) -> String {
        format!(r"(?i)\b{{start-half}}{}\b{{end-half}}", regex::escape(text))
    }
}

/// Ordered keyword list parsed from a comma-separated string.
///
/// Duplicates are kept in input order; detection is tracked per keyword text.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Split on commas, trim, drop empty entries.
    ///
    /// An entry whose pattern fails to build is logged and skipped; the rest
    /// of the list is still used.
    pub fn parse(raw: &str) -> Self {
        let keywords = raw
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .filter_map(|entry| match Keyword::new(entry) {
                Ok(keyword) => Some(keyword),
                Err(e) => {
                    tracing::warn!("Skipping keyword {:?}: {}", entry.trim(), e);
                    None
                }
            })
            .collect();

        Self { keywords }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keyword texts in list order
    pub fn texts(&self) -> Vec<&str> {
        self.keywords.iter().map(Keyword::text).collect()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
