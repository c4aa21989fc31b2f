use super::Item;
use crate::error::{MswpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the quarantine subdirectory inside the reviewed folder
pub const QUARANTINE_DIR_NAME: &str = "_deleted";

/// What to do when a quarantined file with the same basename already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Refuse the move and report the collision
    #[default]
    Abort,
    /// Quarantine under the first free `name (n).ext`
    Rename,
}

/// How `purge` disposes of the quarantine folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PurgeMode {
    /// Remove the folder and its contents for good
    #[default]
    Delete,
    /// Hand the folder to the operating system trash
    SystemTrash,
}

/// Moves files in and out of the `_deleted` folder, one file at a time
#[derive(Debug, Clone)]
pub struct QuarantineStore {
    dir: PathBuf,
    collision: CollisionPolicy,
}

impl QuarantineStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            collision: CollisionPolicy::default(),
        }
    }

    /// Store rooted at `<folder>/_deleted`. Nothing is created until first use.
    pub fn for_folder(folder: &Path) -> Self {
        Self::new(folder.join(QUARANTINE_DIR_NAME))
    }

    pub fn with_collision_policy(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision
    }

    /// Moves `item` into quarantine and returns where it landed.
    ///
    /// On any failure the file is left where it was.
    pub fn quarantine(&self, item: &Item) -> Result<PathBuf> {
        let move_failed = |reason: String| MswpError::MoveFailed {
            path: item.path.clone(),
            reason,
        };

        let file_name = item
            .path
            .file_name()
            .ok_or_else(|| move_failed("path has no file name".to_string()))?;

        if !item.path.is_file() {
            return Err(move_failed("file not found".to_string()));
        }

        fs::create_dir_all(&self.dir).map_err(|e| move_failed(e.to_string()))?;

        let mut target = self.dir.join(file_name);
        if occupied(&target) {
            match self.collision {
                CollisionPolicy::Abort => {
                    return Err(MswpError::Collision {
                        name: file_name.to_string_lossy().into_owned(),
                        dir: self.dir.clone(),
                    });
                }
                CollisionPolicy::Rename => {
                    target = self.unique_target(Path::new(file_name));
                }
            }
        }

        fs::rename(&item.path, &target).map_err(|e| move_failed(e.to_string()))?;

        tracing::debug!(
            from = %item.path.display(),
            to = %target.display(),
            "moved file into quarantine"
        );
        Ok(target)
    }

    /// Moves a quarantined file back to `original_path`. Never overwrites.
    pub fn restore(&self, quarantine_path: &Path, original_path: &Path) -> Result<()> {
        let restore_failed = |reason: String| MswpError::RestoreFailed {
            path: original_path.to_path_buf(),
            reason,
        };

        if occupied(original_path) {
            return Err(restore_failed("original location is occupied".to_string()));
        }

        if !quarantine_path.is_file() {
            return Err(restore_failed(format!(
                "{} is missing from quarantine",
                quarantine_path.display()
            )));
        }

        fs::rename(quarantine_path, original_path).map_err(|e| restore_failed(e.to_string()))?;

        tracing::debug!(
            from = %quarantine_path.display(),
            to = %original_path.display(),
            "restored file from quarantine"
        );
        Ok(())
    }

    /// Everything currently on disk in the quarantine folder, earlier sessions included
    pub fn quarantined_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            files.push(entry?.path());
        }
        files.sort();
        Ok(files)
    }

    /// Disposes of the whole quarantine folder. A missing folder is not an error.
    pub fn purge(&self, mode: PurgeMode) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let purge_failed = |reason: String| MswpError::PurgeFailed {
            path: self.dir.clone(),
            reason,
        };

        match mode {
            PurgeMode::Delete => {
                fs::remove_dir_all(&self.dir).map_err(|e| purge_failed(e.to_string()))?;
            }
            PurgeMode::SystemTrash => {
                trash::delete(&self.dir).map_err(|e| purge_failed(e.to_string()))?;
            }
        }

        tracing::info!(dir = %self.dir.display(), ?mode, "purged quarantine");
        Ok(())
    }

    fn unique_target(&self, file_name: &Path) -> PathBuf {
        let stem = file_name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = file_name
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let mut n = 1usize;
        loop {
            let candidate = self.dir.join(format!("{} ({}){}", stem, n, extension));
            if !occupied(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
