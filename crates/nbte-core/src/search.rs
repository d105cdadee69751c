use regex::{Regex, RegexBuilder};

use crate::edit::Document;
use crate::error::ParseError;
use crate::path::NodePath;

/// Search request: text or pattern plus matching options. Changing any
/// field means rebuilding the index.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
}

/// Ordered index of matching paths over one document snapshot, with a
/// circular cursor for forward/backward navigation.
///
/// The cursor starts "before the first result", so the first
/// `next_match()` lands on match 0. The index is a snapshot: rebuild after
/// any structural mutation.
#[derive(Debug, Default)]
pub struct SearchIndex {
    matches: Vec<NodePath>,
    cursor: Option<usize>,
}

enum Matcher {
    Substring { needle: String, case_sensitive: bool },
    Pattern(Regex),
}

impl Matcher {
    fn compile(query: &SearchQuery) -> Result<Matcher, ParseError> {
        if query.use_regex {
            RegexBuilder::new(&query.text)
                .case_insensitive(!query.case_sensitive)
                .build()
                .map(Matcher::Pattern)
                .map_err(|e| ParseError::InvalidRegex(e.to_string()))
        } else {
            let needle = if query.case_sensitive {
                query.text.clone()
            } else {
                query.text.to_lowercase()
            };
            Ok(Matcher::Substring {
                needle,
                case_sensitive: query.case_sensitive,
            })
        }
    }

    fn is_match(&self, hay: &str) -> bool {
        match self {
            Matcher::Substring {
                needle,
                case_sensitive,
            } => {
                if *case_sensitive {
                    hay.contains(needle.as_str())
                } else {
                    hay.to_lowercase().contains(needle.as_str())
                }
            }
            Matcher::Pattern(re) => re.is_match(hay),
        }
    }
}

impl SearchIndex {
    /// Depth-first, pre-order match index: a node matches on its display
    /// name, else (short-circuit) on its formatted scalar/array text.
    /// An invalid pattern is reported and matches nothing; it never aborts
    /// the traversal of anything else.
    pub fn build(doc: &Document, query: &SearchQuery) -> Result<SearchIndex, ParseError> {
        let matcher = Matcher::compile(query)?;
        let matches = doc
            .snapshot()
            .into_iter()
            .filter(|e| {
                matcher.is_match(&e.name) || (!e.is_container && matcher.is_match(&e.value_text))
            })
            .map(|e| e.path)
            .collect();
        Ok(SearchIndex {
            matches,
            cursor: None,
        })
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[NodePath] {
        &self.matches
    }

    /// The match the cursor sits on, if navigation has started.
    pub fn current(&self) -> Option<&NodePath> {
        self.matches.get(self.cursor?)
    }

    /// Advance circularly; `None` when there are no matches (cursor state
    /// is left unchanged).
    pub fn next_match(&mut self) -> Option<&NodePath> {
        if self.matches.is_empty() {
            return None;
        }
        let i = match self.cursor {
            Some(i) => (i + 1) % self.matches.len(),
            None => 0,
        };
        self.cursor = Some(i);
        self.matches.get(i)
    }

    /// Step backward circularly. The initial position is one before match
    /// 0, so the first backward step is `(-1 - 1) mod len`, landing on the
    /// second-to-last match (match 0 when there are two or fewer).
    pub fn prev_match(&mut self) -> Option<&NodePath> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        let i = match self.cursor {
            Some(i) => (i + len - 1) % len,
            None => (len * 2 - 2) % len,
        };
        self.cursor = Some(i);
        self.matches.get(i)
    }
}
