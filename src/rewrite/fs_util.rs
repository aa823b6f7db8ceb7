use crate::error::{AverError, Result};
use std::fs;
use std::path::Path;

/// Clear the read-only flag on `path` if it is set.
///
/// On unix only the owner write bit is added.
pub fn ensure_writable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| AverError::not_accessible(path, e))?;
    let mut permissions = metadata.permissions();
    if !permissions.readonly() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    {
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
    }

    fs::set_permissions(path, permissions).map_err(|e| AverError::not_accessible(path, e))
}
