use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::Document;
use crate::parser::parse_str;
use crate::render::render;
use crate::storage::Storage;

/// Facade over one dotenv document, optionally bound to a source file.
///
/// An unbound writer starts from an empty document; a writer built with
/// [`EnvWriter::from_path`] (or [`EnvWriter::load`]) parses the source file
/// up front and fails fast when the path cannot be read. Mutations operate
/// purely in memory; nothing is persisted until [`EnvWriter::write`] or
/// [`EnvWriter::write_to`].
#[derive(Debug, Clone, Default)]
pub struct EnvWriter {
    source: Option<PathBuf>,
    document: Document,
    storage: Storage,
}

impl EnvWriter {
    /// Create an unbound writer with an empty document and disk storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the storage backend. Intended for in-memory use in tests and
    /// embedding; call before [`EnvWriter::load`].
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    /// Bind a source file and parse it into the document.
    pub fn load(mut self, path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = self
            .storage
            .read(path)
            .map_err(|source| Error::SourceUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        self.document = parse_str(&text);
        self.source = Some(path.to_path_buf());
        Ok(self)
    }

    /// Construct a writer bound to `path` on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::new().load(path)
    }

    /// Decoded value for `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.document.get(key)
    }

    /// Snapshot of all key/value pairs in document order.
    pub fn get_all(&self) -> Vec<(String, String)> {
        self.document.get_all()
    }

    /// Set `key` to `value`, quoting only when the value requires it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<&mut Self, Error> {
        self.document.set(key, value)?;
        Ok(self)
    }

    /// Set `key` to `value`, always wrapping the value in double quotes.
    pub fn set_quoted(&mut self, key: &str, value: &str) -> Result<&mut Self, Error> {
        self.document.set_quoted(key, value)?;
        Ok(self)
    }

    /// Remove `key`. No-op when absent.
    pub fn delete(&mut self, key: &str) -> &mut Self {
        self.document.delete(key);
        self
    }

    /// Render the current document without touching storage.
    pub fn content(&self) -> String {
        render(&self.document)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.document.is_modified()
    }

    /// Write the rendered document back to the bound source path.
    ///
    /// Returns `Ok(false)` when the write was skipped: `overwrite` is false,
    /// the destination already exists, and no mutation has touched the
    /// document since it was parsed. Pass `overwrite = true` to force the
    /// bytes out regardless.
    pub fn write(&mut self, overwrite: bool) -> Result<bool, Error> {
        self.write_impl(overwrite, None)
    }

    /// Write the rendered document to an explicit destination path.
    pub fn write_to(&mut self, overwrite: bool, path: impl AsRef<Path>) -> Result<bool, Error> {
        self.write_impl(overwrite, Some(path.as_ref()))
    }

    fn write_impl(&mut self, overwrite: bool, dest: Option<&Path>) -> Result<bool, Error> {
        let Some(dest) = dest.or(self.source.as_deref()) else {
            return Err(Error::NoDestination);
        };

        if !overwrite && !self.document.is_modified() && self.storage.exists(dest) {
            return Ok(false);
        }

        let content = render(&self.document);
        let dest = dest.to_path_buf();
        self.storage
            .write(&dest, &content)
            .map_err(|source| Error::NotWritable { path: dest, source })?;
        Ok(true)
    }
}
