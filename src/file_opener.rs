//! Hands the current item to the operating system's default application

use crate::error::{MswpError, Result};
use std::path::Path;

/// Opens `path` in the default viewer or player without waiting for it to exit
pub fn open_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(MswpError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    tracing::info!(path = %path.display(), "opening in default application");
    open::that_detached(path)?;
    Ok(())
}
