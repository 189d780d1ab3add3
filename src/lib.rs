//! Read, mutate, and rewrite `.env` files without clobbering their layout.
//!
//! [`EnvWriter`] owns one parsed document: comments, blank lines, quoting
//! style, and multi-line quoted values of untouched entries survive a
//! rewrite byte-for-byte, while [`EnvWriter::set`] and [`EnvWriter::delete`]
//! re-encode only the entries they change.
//!
//! `${VAR}` placeholders are preserved verbatim; expanding them is the job
//! of whatever consumes the file.

mod error;
mod model;
mod parser;
mod render;
mod storage;
mod writer;

pub use error::Error;
pub use model::{Assignment, Document, Entry, QuoteStyle};
pub use parser::parse_str;
pub use render::render;
pub use storage::Storage;
pub use writer::EnvWriter;
