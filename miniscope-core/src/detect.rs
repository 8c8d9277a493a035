use std::path::Path;

use tracing::debug;

use crate::domain::Version;
use crate::error::{Result, ScopeError};
use crate::util::pattern::find_files_recursive;

/// Classify a session folder by the configuration files found anywhere below it.
///
/// JSON configuration files (modern software) take priority over `.dat`
/// files (legacy software) when both are present.
pub fn detect_version(root: &Path) -> Result<Version> {
    let json = find_files_recursive(root, "*.json")?;
    let dat = find_files_recursive(root, "*.dat")?;
    match (json.is_empty(), dat.is_empty()) {
        (false, false) => {
            debug!(
                root = %root.display(),
                json = json.len(),
                dat = dat.len(),
                "both JSON and legacy configuration files present; using modern"
            );
            Ok(Version::Modern)
        }
        (false, true) => Ok(Version::Modern),
        (true, false) => Ok(Version::Legacy),
        (true, true) => Err(ScopeError::VersionUndetermined(root.display().to_string())),
    }
}

/// Fail with `VersionMismatch` unless `root` holds a session of version `expected`.
pub fn require_version(root: &Path, expected: Version, operation: &'static str) -> Result<()> {
    let version = detect_version(root)?;
    if version != expected {
        return Err(ScopeError::VersionMismatch { operation, version });
    }
    Ok(())
}
