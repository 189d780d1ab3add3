use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Backend for reading and writing dotenv files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    kind: StorageKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StorageKind {
    /// Read and write through the filesystem.
    Disk,
    /// Back reads and writes onto an in-memory map keyed by path.
    Memory(BTreeMap<PathBuf, String>),
}

impl Default for Storage {
    fn default() -> Self {
        Self::disk()
    }
}

impl Storage {
    /// Filesystem-backed storage.
    pub fn disk() -> Self {
        Self {
            kind: StorageKind::Disk,
        }
    }

    /// Empty in-memory storage.
    ///
    /// Use this to exercise the writer without touching the filesystem.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// In-memory storage seeded with existing file contents.
    pub fn from_memory(map: BTreeMap<PathBuf, String>) -> Self {
        Self {
            kind: StorageKind::Memory(map),
        }
    }

    pub fn as_memory(&self) -> Option<&BTreeMap<PathBuf, String>> {
        match &self.kind {
            StorageKind::Memory(map) => Some(map),
            StorageKind::Disk => None,
        }
    }

    pub fn as_memory_mut(&mut self) -> Option<&mut BTreeMap<PathBuf, String>> {
        match &mut self.kind {
            StorageKind::Memory(map) => Some(map),
            StorageKind::Disk => None,
        }
    }

    pub(crate) fn read(&self, path: &Path) -> io::Result<String> {
        match &self.kind {
            StorageKind::Disk => std::fs::read_to_string(path),
            StorageKind::Memory(map) => map.get(path).cloned().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no in-memory file at {}", path.display()),
                )
            }),
        }
    }

    pub(crate) fn exists(&self, path: &Path) -> bool {
        match &self.kind {
            StorageKind::Disk => path.exists(),
            StorageKind::Memory(map) => map.contains_key(path),
        }
    }

    pub(crate) fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        match &mut self.kind {
            StorageKind::Disk => std::fs::write(path, content),
            StorageKind::Memory(map) => {
                map.insert(path.to_path_buf(), content.to_owned());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_content() {
        let mut storage = Storage::memory();
        let path = Path::new("/virtual/.env");

        assert!(!storage.exists(path));
        storage.write(path, "A=1\n").expect("write should succeed");
        assert!(storage.exists(path));
        assert_eq!(storage.read(path).expect("read should succeed"), "A=1\n");
    }

    #[test]
    fn missing_memory_file_reads_as_not_found() {
        let storage = Storage::memory();
        let err = storage
            .read(Path::new("/virtual/missing"))
            .expect_err("expected read failure");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
