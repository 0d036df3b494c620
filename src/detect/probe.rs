//! Filesystem Probe
//!
//! Read-only existence and content checks relative to a project root.
//! Every failure collapses to "absent" so callers can degrade a signal
//! instead of propagating an error.

use std::path::{Path, PathBuf};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `name` exists below the root. Permission errors count as absent.
    pub async fn exists(&self, name: &str) -> bool {
        let path = self.root.join(name);
        match tokio::fs::try_exists(&path).await {
            Ok(found) => found,
            Err(e) => {
                debug!("Probe of {} failed: {}", path.display(), e);
                false
            }
        }
    }

    /// First of `names` that exists, checked in order
    pub async fn find_first(&self, names: &[&str]) -> Option<PathBuf> {
        for name in names {
            if self.exists(name).await {
                return Some(self.root.join(name));
            }
        }
        None
    }

    /// File content, or `None` when missing or unreadable
    pub async fn read(&self, name: &str) -> Option<String> {
        let path = self.root.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_exists_and_read() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("yarn.lock"), "# yarn").unwrap();
        let probe = FsProbe::new(temp.path());

        assert!(probe.exists("yarn.lock").await);
        assert!(!probe.exists("pnpm-lock.yaml").await);
        assert_eq!(probe.read("yarn.lock").await.as_deref(), Some("# yarn"));
        assert!(probe.read("missing.json").await.is_none());
    }

    #[tokio::test]
    async fn test_find_first_respects_order() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.json"), "{}").unwrap();
        std::fs::write(temp.path().join("c.json"), "{}").unwrap();
        let probe = FsProbe::new(temp.path());

        let found = probe.find_first(&["a.json", "b.json", "c.json"]).await;
        assert_eq!(found, Some(temp.path().join("b.json")));
        assert!(probe.find_first(&["a.json"]).await.is_none());
    }
}
