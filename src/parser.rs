use std::borrow::Cow;

use crate::model::{Assignment, Document, Entry, QuoteStyle, is_valid_key};

/// Parse dotenv text into a format-preserving [`Document`].
///
/// Parsing never fails: lines that cannot be read as assignments are kept
/// verbatim as comment entries, and an unterminated quote extends to the end
/// of the input. Line endings are normalized to LF before scanning.
pub fn parse_str(input: &str) -> Document {
    let normalized = normalize_newlines(input);
    let input = normalized.as_ref();

    let mut document = Document::new();
    let mut offset = 0usize;
    while offset < input.len() {
        let (entry, next_offset) = scan_entry(input, offset);
        document.push_parsed(entry);
        offset = next_offset;
    }

    document
}

/// Consume one logical line starting at `start`. A logical line is a single
/// physical line, except for quoted assignments whose value runs across
/// physical lines up to the closing delimiter.
fn scan_entry(input: &str, start: usize) -> (Entry, usize) {
    let bytes = input.as_bytes();
    let line_end = find_line_end(bytes, start);
    let line = &input[start..line_end];
    let after = skip_newline(bytes, line_end);

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return (Entry::Blank, after);
    }
    if trimmed.starts_with('#') {
        return (
            Entry::Comment {
                raw: line.to_owned(),
            },
            after,
        );
    }

    let Some(eq_idx) = line.find('=') else {
        return (
            Entry::Comment {
                raw: line.to_owned(),
            },
            after,
        );
    };
    let key = line[..eq_idx].trim();
    if !is_valid_key(key) {
        return (
            Entry::Comment {
                raw: line.to_owned(),
            },
            after,
        );
    }

    let value_part = &line[eq_idx + 1..];
    let value_region = value_part.trim_start();
    match value_region.chars().next() {
        Some(delimiter @ ('"' | '\'')) => {
            let skipped_ws = value_part.len() - value_region.len();
            let open_idx = start + eq_idx + 1 + skipped_ws;
            scan_quoted(input, start, key, delimiter, open_idx)
        }
        _ => (scan_bare(line, key, value_part), after),
    }
}

/// An unquoted value runs to the end of the line or to the first unescaped
/// `#`, which starts the inline comment. No escape decoding happens; keeping
/// the bytes verbatim is what lets a value containing `\#` survive a
/// re-parse unchanged.
fn scan_bare(line: &str, key: &str, value_part: &str) -> Entry {
    let bytes = value_part.as_bytes();
    let mut hash_idx = None;
    for (idx, &byte) in bytes.iter().enumerate() {
        if byte == b'#' && !is_preceded_by_odd_backslashes(bytes, idx) {
            hash_idx = Some(idx);
            break;
        }
    }

    let (value_text, comment) = match hash_idx {
        Some(idx) => (
            &value_part[..idx],
            Some(value_part[idx..].trim_end().to_owned()),
        ),
        None => (value_part, None),
    };

    Entry::Assignment(Assignment {
        key: key.to_owned(),
        value: value_text.trim().to_owned(),
        quote: QuoteStyle::Bare,
        comment,
        raw: Some(line.to_owned()),
    })
}

/// Scan a quoted value starting at the opening delimiter, consuming physical
/// lines until the unescaped matching delimiter. `#` inside the quotes is
/// literal. A missing closing delimiter extends the value to end of input.
fn scan_quoted(
    input: &str,
    statement_start: usize,
    key: &str,
    delimiter: char,
    open_idx: usize,
) -> (Entry, usize) {
    let tail = &input[open_idx + 1..];
    let mut value = String::new();
    let mut closing = None;

    if delimiter == '"' {
        let mut escaped = false;
        for (rel, ch) in tail.char_indices() {
            if escaped {
                // Only `\"` and `\\` are escape sequences; any other
                // backslash pair passes through as both bytes.
                match ch {
                    '"' | '\\' => value.push(ch),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '"' => {
                    closing = Some(open_idx + 1 + rel);
                    break;
                }
                other => value.push(other),
            }
        }
        if escaped {
            value.push('\\');
        }
    } else {
        for (rel, ch) in tail.char_indices() {
            if ch == delimiter && !is_preceded_by_odd_backslashes(tail.as_bytes(), rel) {
                closing = Some(open_idx + 1 + rel);
                break;
            }
        }
        value = match closing {
            Some(abs) => input[open_idx + 1..abs].to_owned(),
            None => tail.to_owned(),
        };
    }

    let quote = if delimiter == '"' {
        QuoteStyle::Double
    } else {
        QuoteStyle::Single
    };

    let Some(close_idx) = closing else {
        return (
            Entry::Assignment(Assignment {
                key: key.to_owned(),
                value,
                quote,
                comment: None,
                raw: Some(input[statement_start..].to_owned()),
            }),
            input.len(),
        );
    };

    let bytes = input.as_bytes();
    let line_end = find_line_end(bytes, close_idx + 1);
    // After the closing delimiter only whitespace and an optional trailing
    // comment are meaningful; anything else is malformed and dropped from
    // the decoded entry (the raw text still keeps it).
    let trailing = input[close_idx + 1..line_end].trim();
    let comment = trailing.starts_with('#').then(|| trailing.to_owned());

    (
        Entry::Assignment(Assignment {
            key: key.to_owned(),
            value,
            quote,
            comment,
            raw: Some(input[statement_start..line_end].to_owned()),
        }),
        skip_newline(bytes, line_end),
    )
}

fn find_line_end(bytes: &[u8], from: usize) -> usize {
    let mut idx = from;
    while idx < bytes.len() && bytes[idx] != b'\n' {
        idx += 1;
    }
    idx
}

fn skip_newline(bytes: &[u8], idx: usize) -> usize {
    if idx < bytes.len() && bytes[idx] == b'\n' {
        idx + 1
    } else {
        idx
    }
}

fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            out.push('\n');
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            continue;
        }
        out.push(ch);
    }

    Cow::Owned(out)
}

fn is_preceded_by_odd_backslashes(bytes: &[u8], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }

    let mut cursor = idx;
    let mut backslash_count = 0usize;
    while cursor > 0 && bytes[cursor - 1] == b'\\' {
        cursor -= 1;
        backslash_count += 1;
    }

    backslash_count % 2 == 1
}
