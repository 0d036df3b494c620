//! Atomic file writer
//!
//! Content is written to a temporary file in the target directory and then
//! persisted over the target, so readers observe either the old or the new
//! content. An optional best-effort backup copies the previous file first.
//! A replaced file keeps its permissions; a new file gets the mode a plain
//! create would give it (0o666 less the umask).

use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::types::{Result, ScaffoldError};

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Copy an existing target aside before replacing it
    pub backup: bool,
    /// Backup destination; defaults to `<path>.bak`
    pub backup_path: Option<PathBuf>,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

impl WriteOptions {
    pub fn with_backup(mut self) -> Self {
        self.backup = true;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteResult {
    pub path: PathBuf,
    pub written: bool,
    /// UTF-8 length of the content
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
}

/// Default backup location for a target file
pub fn default_backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

pub fn write_atomic(path: &Path, content: &str, options: &WriteOptions) -> Result<WriteResult> {
    let bytes = content.len();

    if options.dry_run {
        debug!("Dry run: would write {} bytes to {}", bytes, path.display());
        return Ok(WriteResult {
            path: path.to_path_buf(),
            written: false,
            bytes,
            backup_path: None,
        });
    }

    let previous = std::fs::metadata(path).ok().map(|m| m.permissions());
    let exists = previous.is_some();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| {
        ScaffoldError::file_system(
            format!("Cannot create directory {}: {}", parent.display(), e),
            Some(path),
        )
    })?;

    let backup_path = if exists && options.backup {
        let target = options
            .backup_path
            .clone()
            .unwrap_or_else(|| default_backup_path(path));
        match std::fs::copy(path, &target) {
            Ok(_) => {
                debug!("Backed up {} to {}", path.display(), target.display());
                Some(target)
            }
            Err(e) => {
                warn!("Backup of {} failed, continuing: {}", path.display(), e);
                None
            }
        }
    } else {
        None
    };

    let fail = |e: std::io::Error| {
        ScaffoldError::file_system(
            format!("Failed to write {}: {}", path.display(), e),
            Some(path),
        )
    };

    let mut temp = create_temp(&parent, previous).map_err(fail)?;
    temp.write_all(content.as_bytes()).map_err(fail)?;
    temp.as_file().sync_all().map_err(fail)?;
    temp.persist(path).map_err(|e| fail(e.error))?;

    debug!("Wrote {} bytes to {}", bytes, path.display());
    Ok(WriteResult {
        path: path.to_path_buf(),
        written: true,
        bytes,
        backup_path,
    })
}

/// Temp file beside the target, carrying the permissions the target should end with
fn create_temp(parent: &Path, previous: Option<Permissions>) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Applied at creation, so the process umask still masks it
        builder.permissions(Permissions::from_mode(0o666));
    }
    let temp = builder.tempfile_in(parent)?;

    if let Some(permissions) = previous {
        temp.as_file().set_permissions(permissions)?;
    }
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c.json");

        let result = write_atomic(&path, "{}", &WriteOptions::default()).unwrap();
        assert!(result.written);
        assert_eq!(result.bytes, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_backup_default_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".testweaverc.json");
        fs::write(&path, "old").unwrap();

        let result =
            write_atomic(&path, "new", &WriteOptions::default().with_backup()).unwrap();
        assert!(result.written);

        let backup = temp.path().join(".testweaverc.json.bak");
        assert_eq!(result.backup_path, Some(backup.clone()));
        assert_eq!(fs::read_to_string(backup).unwrap(), "old");
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_backup_failure_does_not_abort() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "old").unwrap();

        let options = WriteOptions {
            backup: true,
            backup_path: Some(temp.path().join("missing-dir/file.bak")),
            ..Default::default()
        };
        let result = write_atomic(&path, "new", &options).unwrap();
        assert!(result.written);
        assert!(result.backup_path.is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/test.ts");
        let content = "describe('héllo', () => {});";

        let result =
            write_atomic(&path, content, &WriteOptions::default().dry_run(true)).unwrap();
        assert!(!result.written);
        assert_eq!(result.bytes, content.len());
        assert_ne!(result.bytes, content.chars().count());
        assert!(!path.exists());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_replaces_existing_with_backup_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("c.json");
        fs::write(&path, "old").unwrap();

        let options = WriteOptions {
            backup: true,
            ..Default::default()
        };
        let result = write_atomic(&path, "new", &options).unwrap();
        assert!(result.written);
        assert_eq!(result.backup_path, Some(temp.path().join("c.json.bak")));
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_mode_matches_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("plain.ts");
        fs::write(&plain, "x").unwrap();
        let atomic = temp.path().join("atomic.ts");
        write_atomic(&atomic, "x", &WriteOptions::default()).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&atomic), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.sh");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o750)).unwrap();

        write_atomic(&path, "new", &WriteOptions::default()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }
}
