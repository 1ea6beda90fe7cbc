//! Enabling and disabling sites by moving their configuration file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cli::MoveAction;
use crate::config::AppConfig;
use crate::error::MoveError;

/// Suffix every nginx configuration file carries.
pub const CONF_SUFFIX: &str = ".conf";

/// A completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Normalized file name.
    pub filename: String,
    /// Where the file was.
    pub from: PathBuf,
    /// Where the file is now.
    pub to: PathBuf,
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Success: {} moved {} -> {}",
            self.filename,
            self.from.display(),
            self.to.display()
        )
    }
}

/// Strips directory components and appends the `.conf` suffix when missing.
pub fn normalize_filename(raw: &str) -> Result<String, MoveError> {
    let base = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MoveError::InvalidFilename(raw.to_string()))?;

    if base.ends_with(CONF_SUFFIX) {
        Ok(base.to_string())
    } else {
        Ok(format!("{}{}", base, CONF_SUFFIX))
    }
}

/// Moves a configuration file between the active and backup directories.
///
/// The source is checked before anything is created, so a failed move leaves
/// both directories as they were. The rename itself is atomic when both
/// directories live on the same device.
pub fn move_config(
    config: &AppConfig,
    action: MoveAction,
    raw_filename: &str,
) -> Result<MoveOutcome, MoveError> {
    let filename = normalize_filename(raw_filename)?;
    let (src_dir, dst_dir) = config.directories(action == MoveAction::Backup);

    let src = src_dir.join(&filename);
    let dst = dst_dir.join(&filename);

    debug!(?action, src = %src.display(), dst = %dst.display(), "Resolved move paths");

    // Only a definite "not found" stops here; other stat errors surface from the rename.
    match std::fs::symlink_metadata(&src) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MoveError::SourceNotFound { path: src });
        }
        Err(e) => debug!(src = %src.display(), error = %e, "Cannot stat source, attempting rename"),
        Ok(_) => {}
    }

    std::fs::create_dir_all(dst_dir).map_err(|e| MoveError::CreateDirFailed {
        path: dst_dir.clone(),
        source: e,
    })?;

    if dst.exists() {
        warn!(dst = %dst.display(), "Destination exists and will be overwritten");
    }

    std::fs::rename(&src, &dst).map_err(|e| MoveError::RenameFailed {
        from: src.clone(),
        to: dst.clone(),
        source: e,
    })?;

    info!(filename = %filename, src = %src.display(), dst = %dst.display(), "Moved configuration file");

    Ok(MoveOutcome {
        filename,
        from: src,
        to: dst,
    })
}
