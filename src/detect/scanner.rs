use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::constants::markers::SKIP_DIRS;
use crate::types::Result;

/// Blocking source-tree walker that skips dependency and build-output dirs
pub struct SourceScanner {
    root: PathBuf,
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
}

impl SourceScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: Vec::new(),
            skip_dirs: SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Whether any file with a matching extension exists.
    ///
    /// Fails only when the root itself cannot be listed; unreadable
    /// subdirectories are skipped.
    pub fn any_match(&self) -> Result<bool> {
        std::fs::read_dir(&self.root)?;
        Ok(self.walk().next().is_some())
    }

    /// Matching files, in walk order
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        std::fs::read_dir(&self.root)?;
        Ok(self.walk().collect())
    }

    fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let skip_dirs = self.skip_dirs.clone();
        WalkBuilder::new(&self.root)
            // Ignore files must not hide sources; SKIP_DIRS does the pruning
            .standard_filters(false)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| skip_dirs.iter().any(|d| d == name)))
            })
            .build()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| self.check_extension(path))
    }

    fn check_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_nested_typescript() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("src/lib")).unwrap();
        std::fs::write(temp.path().join("src/lib/index.ts"), "export {}").unwrap();

        let scanner = SourceScanner::new(temp.path()).with_extensions(&["ts", "tsx"]);
        assert!(scanner.any_match().unwrap());
        assert_eq!(scanner.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_skips_node_modules_and_dist() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        std::fs::create_dir_all(temp.path().join("dist")).unwrap();
        std::fs::write(temp.path().join("node_modules/pkg/index.d.ts"), "").unwrap();
        std::fs::write(temp.path().join("dist/index.ts"), "").unwrap();
        std::fs::write(temp.path().join("index.js"), "").unwrap();

        let scanner = SourceScanner::new(temp.path()).with_extensions(&["ts"]);
        assert!(!scanner.any_match().unwrap());
    }

    #[test]
    fn test_ignore_files_do_not_hide_sources() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".git")).unwrap();
        std::fs::create_dir_all(temp.path().join("generated")).unwrap();
        std::fs::write(temp.path().join(".gitignore"), "generated/\n").unwrap();
        std::fs::write(temp.path().join(".ignore"), "*.ts\n").unwrap();
        std::fs::write(temp.path().join("generated/api.ts"), "export {}").unwrap();

        let scanner = SourceScanner::new(temp.path()).with_extensions(&["ts"]);
        assert!(scanner.any_match().unwrap());
        assert_eq!(scanner.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        let scanner = SourceScanner::new(temp.path().join("nope"));
        assert!(scanner.any_match().is_err());
    }
}
