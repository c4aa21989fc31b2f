use crate::error::{MswpError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies an extension against the fixed allow-list (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tiff" | "heic" | "svg" => {
                Some(MediaKind::Image)
            }
            "mp4" | "avi" | "mov" | "mkv" | "wmv" | "flv" | "webm" => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }
}

/// One media file under review. Never mutated: a moved file is a new path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub path: PathBuf,
    pub display_name: String,
    pub kind: MediaKind,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl Item {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let kind = MediaKind::from_path(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a supported media file: {}", path.display()),
            )
        })?;

        let metadata = fs::metadata(path)?;
        let modified: DateTime<Utc> = metadata.modified()?.into();

        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Item {
            path: path.to_path_buf(),
            display_name,
            kind,
            size: metadata.len(),
            modified,
        })
    }
}

/// Options for the initial directory scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Media kinds to include (None = images and videos)
    pub kinds: Option<Vec<MediaKind>>,
    /// Include dot-files
    pub show_hidden: bool,
}

impl ScanOptions {
    fn accepts(&self, kind: MediaKind) -> bool {
        match self.kinds {
            Some(ref kinds) => kinds.contains(&kind),
            None => true,
        }
    }
}

/// Lists the media files directly inside `dir_path`, sorted case-insensitively by name.
///
/// Subdirectories (the `_deleted` quarantine among them) are never entered, and
/// entries that cannot be inspected are skipped rather than failing the scan.
pub fn scan_media(dir_path: &Path, options: &ScanOptions) -> Result<Vec<Item>> {
    let scan_failed = |e: io::Error| MswpError::ScanFailed {
        path: dir_path.to_path_buf(),
        reason: e.to_string(),
    };

    let dir_path = dir_path.canonicalize().map_err(scan_failed)?;
    let entries = fs::read_dir(&dir_path).map_err(scan_failed)?;

    let mut items = Vec::new();

    for entry_result in entries {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if !options.show_hidden && file_name.starts_with('.') {
            continue;
        }

        let kind = match MediaKind::from_path(&path) {
            Some(kind) if options.accepts(kind) => kind,
            _ => continue,
        };

        match fs::metadata(&path) {
            Ok(m) if m.is_file() => {}
            _ => continue,
        }

        match Item::from_path(&path) {
            Ok(item) => {
                debug_assert_eq!(item.kind, kind);
                items.push(item);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping media file");
            }
        }
    }

    items.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    tracing::info!(
        folder = %dir_path.display(),
        found = items.len(),
        "scanned folder for media"
    );

    Ok(items)
}
