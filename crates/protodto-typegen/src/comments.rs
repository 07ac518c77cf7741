//! Source comments keyed by structural path.
//!
//! The schema compiler addresses every declaration by a path of descriptor
//! field numbers and list indices, e.g. `[4, 2, 2, 0]` is the first field
//! (`2, 0`) of the third top-level message (`4, 2`).

use crate::input::SourceCodeInfo;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading and trailing comment text of one location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub leading: Option<String>,
    pub trailing: Option<String>,
}

/// Comments of one schema unit, built once when the unit is loaded.
#[derive(Debug, Clone, Default)]
pub struct CommentTable {
    entries: HashMap<Vec<i32>, Comment>,
}

impl CommentTable {
    pub fn new(info: Option<&SourceCodeInfo>) -> Self {
        let mut entries: HashMap<Vec<i32>, Comment> = HashMap::new();
        for location in info.map(|i| i.location.as_slice()).unwrap_or_default() {
            let entry = entries.entry(location.path.clone()).or_default();
            // First location carrying a comment wins.
            if entry.leading.is_none() {
                entry.leading = location.leading_comments.clone();
            }
            if entry.trailing.is_none() {
                entry.trailing = location.trailing_comments.clone();
            }
        }
        Self { entries }
    }

    /// Sanitised leading comment at `path`, or an empty string.
    pub fn leading(&self, path: &[i32]) -> String {
        self.entries
            .get(path)
            .and_then(|c| c.leading.as_deref())
            .map(sanitize)
            .unwrap_or_default()
    }

    /// Sanitised trailing comment at `path`, or an empty string.
    pub fn trailing(&self, path: &[i32]) -> String {
        self.entries
            .get(path)
            .and_then(|c| c.trailing.as_deref())
            .map(sanitize)
            .unwrap_or_default()
    }

    /// Leading comment, falling back to the trailing one. Used for enum
    /// values, which are usually documented at the end of their line.
    pub fn leading_or_trailing(&self, path: &[i32]) -> String {
        let leading = self.leading(path);
        if leading.is_empty() {
            self.trailing(path)
        } else {
            leading
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flatten a comment so it can sit inside generated doc strings and struct
/// tags: quotes and backticks become `'`, whitespace runs become one space.
pub fn sanitize(raw: &str) -> String {
    let comment = raw.replace(['"', '`'], "'");
    WHITESPACE.replace_all(&comment, " ").trim().to_string()
}
