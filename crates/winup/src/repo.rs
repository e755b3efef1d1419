use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use winup_backend::WindowsUpdate;

const DOWNLOADS_DIR: &str = "Downloads";
const MANIFEST_FILE: &str = "updates_manifest.json";
const PACKAGE_EXTENSION: &str = "msu";

/// Filesystem cache of downloaded update packages plus their manifest.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    #[must_use]
    pub fn manifest_file(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Create the download directory if it is not there yet.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created.
    pub fn ensure_downloads_dir(&self) -> io::Result<PathBuf> {
        let dir = self.downloads_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Whether the download directory exists and holds anything at all.
    #[must_use]
    pub fn has_downloads(&self) -> bool {
        std::fs::read_dir(self.downloads_dir())
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
    }

    /// Installable package files in the download directory, sorted by name.
    ///
    /// # Errors
    /// Returns an error when the download directory cannot be read.
    pub fn msu_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.downloads_dir())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PACKAGE_EXTENSION))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Overwrite the manifest with the given update list.
    ///
    /// # Errors
    /// Returns an error when the manifest cannot be serialized or written.
    pub fn write_manifest(&self, updates: &[WindowsUpdate]) -> io::Result<()> {
        let content = serde_json::to_string_pretty(updates)?;
        std::fs::write(self.manifest_file(), content)?;
        debug!("Wrote manifest with {} entries", updates.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use winup_backend::WindowsUpdate;

    use super::LocalRepository;

    fn update(title: &str) -> WindowsUpdate {
        WindowsUpdate {
            title: title.to_string(),
            kb: Some("KB5034123".to_string()),
            size: Some(1024),
            is_downloaded: true,
        }
    }

    #[test]
    fn ensure_downloads_dir_is_idempotent() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");
        let repo = LocalRepository::new(dir.path());

        let first = repo.ensure_downloads_dir().expect("first create should work");
        let second = repo
            .ensure_downloads_dir()
            .expect("second create should be a no-op");

        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn has_downloads_tracks_directory_contents() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");
        let repo = LocalRepository::new(dir.path());

        assert!(!repo.has_downloads());

        let downloads = repo.ensure_downloads_dir().expect("dir should be creatable");
        assert!(!repo.has_downloads());

        std::fs::write(downloads.join("kb1.msu"), b"").expect("file should be writable");
        assert!(repo.has_downloads());
    }

    #[test]
    fn msu_files_filters_by_extension_case_insensitively() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");
        let repo = LocalRepository::new(dir.path());
        let downloads = repo.ensure_downloads_dir().expect("dir should be creatable");

        for name in ["b.msu", "a.MSU", "notes.txt", "installer.exe"] {
            std::fs::write(downloads.join(name), b"").expect("file should be writable");
        }

        let files = repo.msu_files().expect("listing should work");
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().expect("entry has a name").to_string_lossy())
            .collect();

        assert_eq!(names, vec!["a.MSU", "b.msu"]);
    }

    #[test]
    fn msu_files_errors_when_directory_is_missing() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");
        let repo = LocalRepository::new(dir.path().join("absent"));

        assert!(repo.msu_files().is_err());
    }

    #[test]
    fn write_manifest_overwrites_wholesale() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");
        let repo = LocalRepository::new(dir.path());

        repo.write_manifest(&[update("First"), update("Second")])
            .expect("manifest should be writable");
        repo.write_manifest(&[update("Only")])
            .expect("manifest rewrite should work");

        let content =
            std::fs::read_to_string(repo.manifest_file()).expect("manifest should be readable");
        let value: serde_json::Value =
            serde_json::from_str(&content).expect("manifest should be JSON");

        let entries = value.as_array().expect("manifest should be an array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["Title"], "Only");
        assert_eq!(entries[0]["KB"], "KB5034123");
        assert_eq!(entries[0]["IsDownloaded"], true);
    }
}
