use std::fs;
use std::path::{Path, PathBuf};

use super::{sort_entries, DirEntry, FileType, Io};

/// `std::fs`-backed [`Io`] for desktop targets.
#[derive(Debug, Clone)]
pub struct DesktopIo {
    romfs: PathBuf,
    home: PathBuf,
}

impl DesktopIo {
    /// Uses `romfs` as the bundled asset root and the user's home directory
    /// (current directory when unknown) as the data root.
    pub fn new(romfs: impl Into<PathBuf>) -> Self {
        Self {
            romfs: romfs.into(),
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Overrides the data root.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = home.into();
        self
    }
}

impl Default for DesktopIo {
    fn default() -> Self {
        Self::new("./data")
    }
}

fn file_type_of(meta: &fs::Metadata) -> FileType {
    if meta.is_dir() {
        FileType::Directory
    } else {
        FileType::File
    }
}

impl Io for DesktopIo {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn size(&self, path: &Path) -> u64 {
        fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }

    fn file_type(&self, path: &Path) -> FileType {
        fs::metadata(path)
            .map(|m| file_type_of(&m))
            .unwrap_or(FileType::Missing)
    }

    fn create_dir(&self, path: &Path) -> bool {
        match fs::create_dir_all(path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("create_dir {}: {e}", path.display());
                false
            }
        }
    }

    fn list_dir(&self, path: &Path, sort: bool, show_hidden: bool) -> Vec<DirEntry> {
        let reader = match fs::read_dir(path) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("list_dir {}: {e}", path.display());
                return Vec::new();
            }
        };

        let mut entries: Vec<DirEntry> = reader
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let meta = e.metadata().ok()?;
                let file_type = file_type_of(&meta);
                Some(DirEntry {
                    name: e.file_name().to_string_lossy().into_owned(),
                    path: e.path(),
                    file_type,
                    size: if file_type == FileType::File { meta.len() } else { 0 },
                })
            })
            .filter(|e| show_hidden || !e.is_hidden())
            .collect();

        if sort {
            sort_entries(&mut entries);
        }
        entries
    }

    fn read(&self, path: &Path) -> Option<Vec<u8>> {
        fs::read(path)
            .map_err(|e| log::debug!("read {}: {e}", path.display()))
            .ok()
    }

    fn write(&self, path: &Path, data: &[u8]) -> bool {
        match fs::write(path, data) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("write {}: {e}", path.display());
                false
            }
        }
    }

    fn home_path(&self) -> PathBuf {
        self.home.clone()
    }

    fn romfs_path(&self) -> PathBuf {
        self.romfs.clone()
    }
}
