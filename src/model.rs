use std::collections::HashMap;

use crate::error::Error;

/// How an assignment's value is delimited on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// No delimiters; the value runs to the end of the line.
    #[default]
    Bare,
    /// Single quotes; no escape processing inside.
    Single,
    /// Double quotes; `\"` and `\\` are escape sequences, newlines may be literal.
    Double,
}

/// A decoded `KEY=VALUE` line, possibly spanning several physical lines
/// when the value is quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    /// Fully decoded value: delimiters stripped, double-quote escapes
    /// resolved, embedded newlines kept literal.
    pub value: String,
    pub quote: QuoteStyle,
    /// Trailing comment after the value, stored with its leading `#`.
    pub comment: Option<String>,
    /// Original logical-line text. Present on entries produced by the
    /// parser so untouched lines are written back byte-for-byte; cleared
    /// by any mutation.
    pub(crate) raw: Option<String>,
}

/// One logical line of a dotenv document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Assignment(Assignment),
    /// A `#` comment line, or a line the parser could not read as an
    /// assignment. Reproduced unchanged on output.
    Comment { raw: String },
    /// An empty or whitespace-only line.
    Blank,
}

/// Ordered sequence of entries plus an index from key to its assignment.
///
/// Keys are unique: a later assignment for an existing key overwrites the
/// earlier entry in place instead of appending a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded value for `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        let idx = *self.index.get(key)?;
        match &self.entries[idx] {
            Entry::Assignment(assignment) => Some(&assignment.value),
            _ => None,
        }
    }

    /// Snapshot of all key/value pairs in document order.
    pub fn get_all(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Assignment(assignment) => {
                    Some((assignment.key.clone(), assignment.value.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any `set` or `delete` has touched the document since it was
    /// parsed or created.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Set `key` to `value`, quoting only when the value requires it.
    ///
    /// Replaces the value in place when the key already exists, keeping the
    /// entry's position; the previous quote style and any inline comment are
    /// dropped and recomputed. New keys are appended at the end.
    pub fn set(&mut self, key: &str, value: &str) -> Result<&mut Self, Error> {
        self.set_with(key, value, false)
    }

    /// Set `key` to `value`, always wrapping the value in double quotes.
    pub fn set_quoted(&mut self, key: &str, value: &str) -> Result<&mut Self, Error> {
        self.set_with(key, value, true)
    }

    fn set_with(&mut self, key: &str, value: &str, force_quote: bool) -> Result<&mut Self, Error> {
        if !is_valid_key(key) {
            return Err(Error::InvalidKey {
                key: key.to_owned(),
            });
        }

        let assignment = Assignment {
            key: key.to_owned(),
            value: value.to_owned(),
            quote: choose_quote(value, force_quote),
            comment: None,
            raw: None,
        };

        if let Some(idx) = self.index.get(key).copied() {
            self.entries[idx] = Entry::Assignment(assignment);
        } else {
            self.index.insert(key.to_owned(), self.entries.len());
            self.entries.push(Entry::Assignment(assignment));
        }

        self.modified = true;
        Ok(self)
    }

    /// Remove `key` and its entry. No-op when the key is absent.
    pub fn delete(&mut self, key: &str) -> &mut Self {
        let Some(idx) = self.index.remove(key) else {
            return self;
        };

        self.entries.remove(idx);
        for position in self.index.values_mut() {
            if *position > idx {
                *position -= 1;
            }
        }
        self.modified = true;
        self
    }

    /// Append a parsed entry, replacing the earlier entry in place when an
    /// assignment re-uses an existing key. Does not mark the document
    /// modified; this is the parser building the initial state.
    pub(crate) fn push_parsed(&mut self, entry: Entry) {
        let Entry::Assignment(assignment) = entry else {
            self.entries.push(entry);
            return;
        };

        if let Some(existing_idx) = self.index.get(&assignment.key).copied() {
            self.entries[existing_idx] = Entry::Assignment(assignment);
        } else {
            self.index.insert(assignment.key.clone(), self.entries.len());
            self.entries.push(Entry::Assignment(assignment));
        }
    }
}

/// Whether `value` can be written without delimiters and still read back
/// unchanged.
fn choose_quote(value: &str, force_quote: bool) -> QuoteStyle {
    if !force_quote && !value.chars().any(requires_quoting) {
        QuoteStyle::Bare
    } else {
        QuoteStyle::Double
    }
}

fn requires_quoting(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '"' | '\'' | '#')
}

/// Keys match `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
