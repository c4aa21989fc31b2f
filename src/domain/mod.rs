//! Headless review core: items, the work queue, the undo history, the
//! quarantine folder and the session state machine that ties them together.

mod history;
mod item;
mod quarantine;
mod queue;
mod session;

pub use history::{ActionHistory, HistoryEntry};
pub use item::{scan_media, Item, MediaKind, ScanOptions};
pub use quarantine::{CollisionPolicy, PurgeMode, QuarantineStore, QUARANTINE_DIR_NAME};
pub use queue::WorkQueue;
pub use session::{CloseRequest, ReviewSession, SessionState, SessionStats, Snapshot};
