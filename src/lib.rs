//! mswp - review a folder of photos and videos one item at a time
//!
//! Each item is kept or moved to a `_deleted` quarantine folder. Every
//! decision can be undone, and the quarantine is only emptied when the
//! session closes and the user confirms.

pub mod async_preview;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod file_opener;
pub mod logging;
pub mod preview;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use domain::{
    scan_media, CloseRequest, CollisionPolicy, HistoryEntry, Item, MediaKind, PurgeMode,
    QuarantineStore, ReviewSession, ScanOptions, SessionState, SessionStats, Snapshot,
    QUARANTINE_DIR_NAME,
};
pub use error::{MswpError, Result};
pub use file_opener::open_file;
