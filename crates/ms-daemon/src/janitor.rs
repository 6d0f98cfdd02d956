//! Empty-directory pruning under the watch root.
//!
//! Moves and deletions leave behind the directory skeletons that release
//! folders arrive in. After each reconciliation tick the janitor removes
//! every subtree directly under the watch root that no longer contains a
//! single file at any depth.

use camino::{Utf8Path, Utf8PathBuf};

/// Returns `true` iff `dir` contains, at every depth, only directories —
/// never a plain file — bottoming out in leaves with zero entries.
///
/// A path that does not exist or is not a directory is not an empty tree.
/// Unreadable directories are treated as non-empty: when in doubt, leave
/// the tree alone.
#[must_use]
pub fn is_empty_tree(dir: &Utf8Path) -> bool {
    if !dir.is_dir() {
        return false;
    }

    let Ok(entries) = dir.read_dir_utf8() else {
        return false;
    };

    for entry in entries {
        let Ok(entry) = entry else {
            return false;
        };
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if !is_dir || !is_empty_tree(entry.path()) {
            return false;
        }
    }

    true
}

/// Returns the maximal empty subtrees directly under `root`.
///
/// Children are tested with [`is_empty_tree`]; once a child tests empty it
/// is returned whole rather than descended into. `root` itself is never
/// returned.
#[must_use]
pub fn find_empty_trees(root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(entries) = root.read_dir_utf8() else {
        return Vec::new();
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| is_empty_tree(entry.path()))
        .map(|entry| entry.path().to_owned())
        .collect()
}

/// Removes every empty subtree directly under `root`, returning how many
/// were removed.
///
/// Removal failures are logged and skipped; the next tick retries.
pub fn clean(root: &Utf8Path) -> usize {
    let mut removed = 0;
    for dir in find_empty_trees(root) {
        match std::fs::remove_dir_all(dir.as_std_path()) {
            Ok(()) => {
                tracing::info!(path = %dir, "Removed empty directory tree");
                removed += 1;
            }
            Err(error) => {
                tracing::warn!(path = %dir, error = %error, "Failed to remove empty directory tree");
            }
        }
    }
    removed
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
    fn test_leaf_empty_directory_is_empty_tree() {
        let temp = TempDir::new().unwrap();
        assert!(is_empty_tree(&utf8(&temp)));
    }

    #[test]
    fn test_nested_empty_directories_are_empty_tree() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        fs::create_dir_all(root.join("a/b/c").as_std_path()).unwrap();
        fs::create_dir_all(root.join("a/d").as_std_path()).unwrap();
        assert!(is_empty_tree(&root));
    }

    #[test]
    fn test_file_at_any_depth_breaks_emptiness() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        fs::create_dir_all(root.join("a/b").as_std_path()).unwrap();
        fs::write(root.join("a/b/leftover.nfo").as_std_path(), "x").unwrap();
        assert!(!is_empty_tree(&root));
    }

    #[test]
    fn test_missing_path_is_not_empty_tree() {
        assert!(!is_empty_tree(Utf8Path::new("/no/such/directory")));
    }

    #[test]
    fn test_find_empty_trees_returns_maximal_subtrees() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        // `empty` is wholly empty; `busy` holds a file deep down
        fs::create_dir_all(root.join("empty/inner").as_std_path()).unwrap();
        fs::create_dir_all(root.join("busy/inner").as_std_path()).unwrap();
        fs::write(root.join("busy/inner/file.mkv").as_std_path(), "x").unwrap();

        let found = find_empty_trees(&root);
        assert_eq!(found, vec![root.join("empty")]);
    }

    #[test]
    fn test_find_empty_trees_never_returns_root() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        assert!(find_empty_trees(&root).is_empty());
    }

    #[test]
    fn test_clean_removes_empty_trees_only() {
        let temp = TempDir::new().unwrap();
        let root = utf8(&temp);
        fs::create_dir_all(root.join("empty/nested/deeper").as_std_path()).unwrap();
        fs::create_dir_all(root.join("busy").as_std_path()).unwrap();
        fs::write(root.join("busy/file.mkv").as_std_path(), "x").unwrap();

        let removed = clean(&root);
        assert_eq!(removed, 1);
        assert!(!root.join("empty").exists());
        assert!(root.join("busy/file.mkv").exists());
    }
}
