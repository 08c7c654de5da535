//! Tool configuration stored in `dropfix.toml` at the project root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Dropfix configuration (TOML).
///
/// Intended to be edited by humans. Missing fields default to the layout of
/// the project this tool was written against.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DropfixConfig {
    /// Target source file, relative to the project root.
    pub target: PathBuf,

    /// Keep a `<stem>.backup.<ext>` copy of the original next to the target.
    pub backup: bool,
}

impl Default for DropfixConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("src/services/dropboxUploadService.ts"),
            backup: true,
        }
    }
}

impl DropfixConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target.as_os_str().is_empty() {
            return Err(anyhow!("target must be a non-empty path"));
        }
        if self.target.is_absolute() {
            return Err(anyhow!("target must be relative to the project root"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DropfixConfig::default()`.
pub fn load_config(path: &Path) -> Result<DropfixConfig> {
    if !path.exists() {
        let cfg = DropfixConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DropfixConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DropfixConfig::default());
    }

    #[test]
    fn load_reads_custom_target() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("dropfix.toml");
        fs::write(&path, "target = \"lib/upload.ts\"\nbackup = false\n").expect("write config");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.target, PathBuf::from("lib/upload.ts"));
        assert!(!cfg.backup);
    }

    #[test]
    fn load_rejects_absolute_target() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("dropfix.toml");
        fs::write(&path, "target = \"/etc/upload.ts\"\n").expect("write config");

        let err = load_config(&path).expect_err("load should fail");
        assert!(err.to_string().contains("relative"));
    }

    #[test]
    fn load_rejects_empty_target() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("dropfix.toml");
        fs::write(&path, "target = \"\"\n").expect("write config");

        let err = load_config(&path).expect_err("load should fail");
        assert!(err.to_string().contains("non-empty"));
    }
}
