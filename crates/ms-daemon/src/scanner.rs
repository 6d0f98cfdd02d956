//! Initial scan of the watch directory.
//!
//! Files that arrived while the daemon was down produce no filesystem
//! events, so startup walks the watch root once and registers everything
//! it finds. Uses the `ignore` walker with standard filters disabled — a
//! download folder is not a source tree, and hidden or ignored files must
//! still be relocated.

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;

use crate::error::DaemonError;

/// Walks the watch root collecting every plain file.
///
/// # Examples
///
/// ```ignore
/// use ms_daemon::LibraryWalker;
/// use camino::Utf8Path;
///
/// let walker = LibraryWalker::new(Utf8Path::new("/downloads"))?;
/// let files = walker.collect_files()?;
/// println!("Found {} existing files", files.len());
/// ```
#[derive(Debug)]
pub struct LibraryWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
}

impl LibraryWalker {
    /// Creates a walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::Config`] if the root doesn't exist or isn't
    /// a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, DaemonError> {
        if !root.exists() {
            return Err(ms_core::ConfigError::MissingDirectory(root.to_owned()).into());
        }
        if !root.is_dir() {
            return Err(ms_core::ConfigError::InvalidPath {
                path: root.to_owned(),
                reason: "not a directory".to_owned(),
            }
            .into());
        }

        Ok(Self {
            root: root.to_owned(),
        })
    }

    /// Collects every plain file under the root, recursively.
    ///
    /// Non-UTF-8 paths are logged and skipped — they cannot be classified
    /// or tracked, but they must not abort the scan for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::Walk`] if traversal itself fails.
    pub fn collect_files(&self) -> Result<Vec<Utf8PathBuf>, DaemonError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            match Utf8Path::from_path(entry.path()) {
                Some(utf8_path) => paths.push(utf8_path.to_owned()),
                None => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        "Skipping non-UTF-8 path during initial scan"
                    );
                }
            }
        }

        Ok(paths)
    }

    /// Builds the walker. Standard filters stay off: gitignore rules and
    /// hidden-file skipping make no sense in a download directory.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .threads(1)
            .require_git(false)
            .build()
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("Invalid temp path")
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let result = LibraryWalker::new(Utf8Path::new("/no/such/root"));
        assert!(matches!(result, Err(DaemonError::Config(_))));
    }

    #[test]
    fn test_collect_files_finds_nested_files() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        fs::create_dir_all(root.join("sub/deeper").as_std_path()).unwrap();
        fs::write(root.join("top.mkv").as_std_path(), "x").unwrap();
        fs::write(root.join("sub/deeper/inner.mp4").as_std_path(), "x").unwrap();
        fs::write(root.join(".hidden.mkv").as_std_path(), "x").unwrap();

        let walker = LibraryWalker::new(&root).unwrap();
        let mut files = walker.collect_files().unwrap();
        files.sort();

        let names: Vec<&str> = files.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"top.mkv"));
        assert!(names.contains(&"inner.mp4"));
        // Hidden files are not skipped
        assert!(names.contains(&".hidden.mkv"));
    }

    #[test]
    fn test_collect_files_skips_directories() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        fs::create_dir_all(root.join("only/dirs/here").as_std_path()).unwrap();

        let walker = LibraryWalker::new(&root).unwrap();
        assert!(walker.collect_files().unwrap().is_empty());
    }
}
