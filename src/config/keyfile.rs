//! Loader for the grouped key/value account config written by Mission
//! Control (`accounts.cfg`). Groups look like `[account-id]` headers
//! followed by `key=value` lines; `#` comments and blank lines are
//! ignored.

use crate::domain::model::ConfigGroups;
use crate::utils::error::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Platform default location of the Empathy account config,
/// `<user-data-dir>/telepathy/mission-control/accounts.cfg`.
pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or(ImportError::DataDirError)?;
    Ok(data_dir
        .join("telepathy")
        .join("mission-control")
        .join("accounts.cfg"))
}

/// Read and parse the account config. Any failure here is fatal for the
/// whole import: no groups are processed.
pub fn load(path: &Path) -> Result<ConfigGroups> {
    tracing::info!("Loading accounts from {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| ImportError::LoadError {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&text, path)
}

/// Parse grouped key/value text. `path` is only used for error reporting.
pub fn parse(text: &str, path: &Path) -> Result<ConfigGroups> {
    let mut groups = ConfigGroups::default();
    let mut current: Option<usize> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| parse_error(path, index, "unterminated group header"))?
                .trim();
            if name.is_empty() {
                return Err(parse_error(path, index, "empty group name"));
            }
            current = Some(groups.get_or_insert(name));
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| parse_error(path, index, "expected key=value"))?;
        let group = current.ok_or_else(|| parse_error(path, index, "entry before any group"))?;
        groups
            .group_mut(group)
            .insert(key.trim(), value.trim());
    }

    Ok(groups)
}

fn parse_error(path: &Path, index: usize, reason: &str) -> ImportError {
    ImportError::ParseError {
        path: path.to_path_buf(),
        line: index + 1,
        reason: reason.to_string(),
    }
}
