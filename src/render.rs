use crate::model::{Assignment, Document, Entry, QuoteStyle};

/// Render a document back to dotenv text.
///
/// Entries untouched since parsing are reproduced from their original
/// bytes; mutated and new assignments are encoded from their quote style.
/// Output always uses LF line endings with a single trailing newline per
/// entry, regardless of the source file's convention.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    for entry in document.entries() {
        match entry {
            Entry::Blank => {}
            Entry::Comment { raw } => out.push_str(raw),
            Entry::Assignment(assignment) => render_assignment(&mut out, assignment),
        }
        out.push('\n');
    }
    out
}

fn render_assignment(out: &mut String, assignment: &Assignment) {
    if let Some(raw) = &assignment.raw {
        out.push_str(raw);
        return;
    }

    out.push_str(&assignment.key);
    out.push('=');
    match assignment.quote {
        QuoteStyle::Bare => out.push_str(&assignment.value),
        QuoteStyle::Single => {
            // The parser only produces this style when the value contains
            // no unescaped delimiter, so the bytes go back verbatim.
            out.push('\'');
            out.push_str(&assignment.value);
            out.push('\'');
        }
        QuoteStyle::Double => {
            out.push('"');
            for ch in assignment.value.chars() {
                if matches!(ch, '"' | '\\') {
                    out.push('\\');
                }
                out.push(ch);
            }
            out.push('"');
        }
    }

    if let Some(comment) = &assignment.comment {
        out.push(' ');
        out.push_str(comment);
    }
}
