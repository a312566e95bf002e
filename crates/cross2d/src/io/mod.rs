//! Platform filesystem shim.
//!
//! Resource loaders (shader packs, textures) go through [`Io`] so that each
//! platform can map paths onto its own storage (bundled read-only assets,
//! home directory, memory cards). Every operation reports failure through a
//! sentinel (`false`, `None`, empty list) and a log line; nothing here is
//! fatal.

mod desktop;

use std::path::{Path, PathBuf};

pub use desktop::DesktopIo;

/// Kind of filesystem object at a path.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FileType {
    File,
    Directory,
    /// Nothing at that path (or not accessible).
    Missing,
}

/// One directory listing entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub file_type: FileType,
    /// Size in bytes; zero for directories.
    pub size: u64,
}

impl DirEntry {
    /// Dot-files are hidden.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Filesystem primitives consumed by the rendering core.
pub trait Io {
    fn exists(&self, path: &Path) -> bool;

    /// Size in bytes, `0` when the path does not exist.
    fn size(&self, path: &Path) -> u64;

    fn file_type(&self, path: &Path) -> FileType;

    /// Creates the directory and any missing parents.
    fn create_dir(&self, path: &Path) -> bool;

    /// Lists `path`. `sort` puts directories first, then orders by
    /// case-insensitive name; `show_hidden` keeps dot-files.
    fn list_dir(&self, path: &Path, sort: bool, show_hidden: bool) -> Vec<DirEntry>;

    fn read(&self, path: &Path) -> Option<Vec<u8>>;

    fn write(&self, path: &Path, data: &[u8]) -> bool;

    /// Writable per-user data root.
    fn home_path(&self) -> PathBuf;

    /// Read-only bundled asset root (fixed per platform).
    fn romfs_path(&self) -> PathBuf;

    /// [`read`](Self::read) for UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Option<String> {
        let bytes = self.read(path)?;
        match String::from_utf8(bytes) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("{}: not valid UTF-8: {e}", path.display());
                None
            }
        }
    }
}

/// Directories first, then case-insensitive name order.
pub fn sort_entries(entries: &mut [DirEntry]) {
    entries.sort_by(|a, b| {
        let a_dir = a.file_type == FileType::Directory;
        let b_dir = b.file_type == FileType::Directory;
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}
