//! Target file read/write helpers.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Read the target file as UTF-8 text.
pub fn read_target(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read target {}", path.display()))
}

/// Atomically write the patched text (temp file + rename).
pub fn write_target(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = tmp_sibling(path)?;
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp target {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace target {}", path.display()))?;
    Ok(())
}

/// Copy the unpatched target to `<stem>.backup.<ext>` next to it, following
/// the naming the project already uses for manual backups.
pub fn backup_target(path: &Path) -> Result<PathBuf> {
    let backup_path = backup_sibling(path)?;
    fs::copy(path, &backup_path)
        .with_context(|| format!("write backup {}", backup_path.display()))?;
    debug!(backup = %backup_path.display(), "backup written");
    Ok(backup_path)
}

fn tmp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("target has no file name: {}", path.display()))?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn backup_sibling(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| anyhow!("target has no file name: {}", path.display()))?;
    let name = match path.extension().and_then(OsStr::to_str) {
        Some(ext) => format!("{stem}.backup.{ext}"),
        None => format!("{stem}.backup"),
    };
    Ok(path.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_leaves_no_temp_residue() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("service.ts");
        fs::write(&path, "before").expect("seed target");

        write_target(&path, "after").expect("write target");

        assert_eq!(fs::read_to_string(&path).expect("read target"), "after");
        assert!(!temp.path().join("service.ts.tmp").exists());
    }

    #[test]
    fn backup_uses_project_naming() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("dropboxUploadService.ts");
        fs::write(&path, "original").expect("seed target");

        let backup = backup_target(&path).expect("backup");

        assert!(backup.ends_with("dropboxUploadService.backup.ts"));
        assert_eq!(fs::read_to_string(&backup).expect("read backup"), "original");
    }

    #[test]
    fn backup_without_extension_appends_suffix() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("service");
        fs::write(&path, "original").expect("seed target");

        let backup = backup_target(&path).expect("backup");
        assert!(backup.ends_with("service.backup"));
    }

    #[test]
    fn read_missing_target_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = read_target(&temp.path().join("absent.ts")).expect_err("read should fail");
        assert!(err.to_string().contains("read target"));
    }
}
