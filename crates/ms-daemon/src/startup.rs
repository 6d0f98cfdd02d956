//! Startup directory checks with bounded backoff.
//!
//! The watch root and the four destination roots may live on storage that
//! mounts after the daemon starts (network shares, external drives).
//! Missing directories are therefore a retryable condition: the check
//! re-runs on a fixed backoff and only escalates to a fatal error after a
//! bounded number of attempts.

use std::time::Duration;

use camino::Utf8PathBuf;
use ms_core::Config;

use crate::error::DaemonError;

/// Waits until every required directory exists.
///
/// Rechecks on each attempt (a directory may appear between attempts).
///
/// # Errors
///
/// Returns [`DaemonError::MissingDirectories`] when directories are still
/// missing after `startup_max_attempts` rounds.
pub async fn wait_for_directories(config: &Config) -> Result<(), DaemonError> {
    let backoff = Duration::from_secs(config.watch.startup_backoff_secs);
    let max_attempts = config.watch.startup_max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let missing = missing_directories(config);
        if missing.is_empty() {
            return Ok(());
        }

        attempts += 1;
        if attempts >= max_attempts {
            return Err(DaemonError::MissingDirectories { attempts, missing });
        }

        tracing::warn!(?missing, attempt = attempts, "Required directories missing, waiting");
        tokio::time::sleep(backoff).await;
    }
}

/// Returns the required directories that do not currently exist.
fn missing_directories(config: &Config) -> Vec<Utf8PathBuf> {
    config
        .required_directories()
        .into_iter()
        .filter(|path| !path.exists())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn config_with_roots(root: &Utf8PathBuf) -> Config {
        let mut config = Config::default();
        config.watch.watch_dir = root.join("watch");
        config.library.movie_dir = root.join("movie");
        config.library.show_dir = root.join("show");
        config.library.misc_dir = root.join("misc");
        config.library.non_video_dir = root.join("non_video");
        config.watch.startup_max_attempts = 2;
        config.watch.startup_backoff_secs = 0;
        config
    }

    #[tokio::test]
    async fn test_all_directories_present() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let config = config_with_roots(&root);

        for dir in config.required_directories() {
            std::fs::create_dir_all(dir.as_std_path()).unwrap();
        }

        assert!(wait_for_directories(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_directories_escalate_after_bounded_attempts() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let config = config_with_roots(&root);
        // Nothing created: all five roots are missing

        match wait_for_directories(&config).await {
            Err(DaemonError::MissingDirectories { attempts, missing }) => {
                assert_eq!(attempts, 2);
                assert_eq!(missing.len(), 5);
            }
            other => panic!("Expected MissingDirectories, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_appearing_between_attempts_is_noticed() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let mut config = config_with_roots(&root);
        config.watch.startup_max_attempts = 5;
        config.watch.startup_backoff_secs = 1;

        for dir in config.required_directories() {
            std::fs::create_dir_all(dir.as_std_path()).unwrap();
        }
        // Remove one root, then restore it from a background task
        std::fs::remove_dir(config.library.misc_dir.as_std_path()).unwrap();
        let misc = config.library.misc_dir.clone();
        let restore = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            std::fs::create_dir_all(misc.as_std_path()).unwrap();
        });

        assert!(wait_for_directories(&config).await.is_ok());
        restore.await.unwrap();
    }
}
