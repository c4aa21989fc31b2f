use super::{
    scan_media, ActionHistory, CollisionPolicy, HistoryEntry, Item, PurgeMode, QuarantineStore,
    ScanOptions, WorkQueue,
};
use crate::error::{MswpError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// An item is waiting for a decision
    Active,
    /// Every item has been decided
    Exhausted,
    /// The scan found nothing to review
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub remaining: usize,
    pub kept: usize,
    pub deleted: usize,
}

/// What the front end needs to redraw after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current: Option<Item>,
    pub stats: SessionStats,
    pub state: SessionState,
}

/// Answer to a close request; the front end decides whether to ask about purging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRequest {
    pub has_quarantined_files: bool,
    pub quarantined: usize,
    pub quarantine_dir: PathBuf,
}

/// The review state machine: the only owner and mutator of the queue, the
/// history and the quarantine folder.
///
/// Every transition is atomic with respect to the filesystem: if a move fails,
/// queue, history and counters are exactly as they were before the call.
#[derive(Debug)]
pub struct ReviewSession {
    queue: WorkQueue,
    history: ActionHistory,
    store: QuarantineStore,
    initial_count: usize,
    kept: usize,
    deleted: usize,
}

impl ReviewSession {
    pub fn new(items: Vec<Item>, store: QuarantineStore) -> Self {
        let initial_count = items.len();
        Self {
            queue: WorkQueue::new(items),
            history: ActionHistory::new(),
            store,
            initial_count,
            kept: 0,
            deleted: 0,
        }
    }

    /// Scans `folder` and starts a session quarantining into `folder/_deleted`
    pub fn open(folder: &Path, options: &ScanOptions, collision: CollisionPolicy) -> Result<Self> {
        let folder = folder
            .canonicalize()
            .map_err(|e| MswpError::ScanFailed {
                path: folder.to_path_buf(),
                reason: e.to_string(),
            })?;

        let items = scan_media(&folder, options)?;
        let store = QuarantineStore::for_folder(&folder).with_collision_policy(collision);
        Ok(Self::new(items, store))
    }

    pub fn current(&self) -> Option<&Item> {
        self.queue.current()
    }

    pub fn state(&self) -> SessionState {
        if self.initial_count == 0 {
            SessionState::Empty
        } else if self.queue.is_exhausted() {
            SessionState::Exhausted
        } else {
            SessionState::Active
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            remaining: self.queue.remaining(),
            kept: self.kept,
            deleted: self.deleted,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current().cloned(),
            stats: self.stats(),
            state: self.state(),
        }
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// Position of the current item among everything scanned, for "n of N" displays
    pub fn position(&self) -> usize {
        self.kept + self.deleted + 1
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    pub fn quarantine(&self) -> &QuarantineStore {
        &self.store
    }

    /// Folder under review (the parent of the quarantine folder)
    pub fn folder(&self) -> &Path {
        self.store.path().parent().unwrap_or(self.store.path())
    }

    /// Leaves the current file in place and moves on
    pub fn keep(&mut self) -> Result<Snapshot> {
        let item = self.require_current("keep")?.clone();
        let queue_index = self.queue.cursor();

        tracing::info!(item = %item.display_name, "keep");

        self.history.push(HistoryEntry::Kept { item, queue_index });
        self.queue.advance();
        self.kept += 1;

        self.check_invariants();
        Ok(self.snapshot())
    }

    /// Moves the current file into quarantine and drops it from the queue
    pub fn delete(&mut self) -> Result<Snapshot> {
        self.quarantine_current("delete")
    }

    /// Quarantines a current item that could not be rendered.
    ///
    /// Recorded like a regular delete, so it can be undone.
    pub fn discard_broken(&mut self, reason: &str) -> Result<Snapshot> {
        if let Some(item) = self.current() {
            tracing::warn!(item = %item.display_name, reason, "quarantining unreadable item");
        }
        self.quarantine_current("discard broken item")
    }

    /// Reverts the most recent keep or delete.
    ///
    /// A failed restore puts the entry back on the history so the user can retry.
    pub fn undo(&mut self) -> Result<Snapshot> {
        let entry = self.history.pop().ok_or(MswpError::OutOfRange {
            operation: "undo",
            reason: "nothing to undo",
        })?;

        match entry {
            HistoryEntry::Kept { item, queue_index } => {
                self.queue.retreat();
                debug_assert_eq!(self.queue.cursor(), queue_index);
                self.kept -= 1;

                tracing::info!(item = %item.display_name, "undo keep");
            }
            HistoryEntry::Deleted {
                item,
                original_path,
                quarantine_path,
                queue_index,
            } => {
                if let Err(e) = self.store.restore(&quarantine_path, &original_path) {
                    tracing::warn!(item = %item.display_name, error = %e, "undo delete failed");
                    self.history.push(HistoryEntry::Deleted {
                        item,
                        original_path,
                        quarantine_path,
                        queue_index,
                    });
                    return Err(e);
                }

                tracing::info!(item = %item.display_name, "undo delete");

                let index = self.queue.insert_at(queue_index, item);
                self.queue.set_cursor(index);
                self.deleted -= 1;
            }
        }

        self.check_invariants();
        Ok(self.snapshot())
    }

    pub fn request_close(&self) -> Result<CloseRequest> {
        let files = self.store.quarantined_files()?;
        Ok(CloseRequest {
            has_quarantined_files: !files.is_empty(),
            quarantined: files.len(),
            quarantine_dir: self.store.path().to_path_buf(),
        })
    }

    /// Disposes of the quarantine folder. Only call after the user confirmed.
    ///
    /// Deleted files can no longer be restored afterwards, so the history is cleared.
    pub fn purge(&mut self, mode: PurgeMode) -> Result<()> {
        self.store.purge(mode)?;
        self.history.clear();
        Ok(())
    }

    fn require_current(&self, operation: &'static str) -> Result<&Item> {
        match self.state() {
            SessionState::Active => self.queue.current().ok_or(MswpError::OutOfRange {
                operation,
                reason: "no item left to review",
            }),
            SessionState::Exhausted => Err(MswpError::OutOfRange {
                operation,
                reason: "no item left to review",
            }),
            SessionState::Empty => Err(MswpError::OutOfRange {
                operation,
                reason: "the folder has no media to review",
            }),
        }
    }

    fn quarantine_current(&mut self, operation: &'static str) -> Result<Snapshot> {
        let item = self.require_current(operation)?.clone();
        let queue_index = self.queue.cursor();

        let quarantine_path = match self.store.quarantine(&item) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(item = %item.display_name, error = %e, "delete failed");
                return Err(e);
            }
        };

        self.queue.remove_current()?;
        tracing::info!(
            item = %item.display_name,
            quarantine = %quarantine_path.display(),
            "delete"
        );

        self.history.push(HistoryEntry::Deleted {
            original_path: item.path.clone(),
            item,
            quarantine_path,
            queue_index,
        });
        self.deleted += 1;

        self.check_invariants();
        Ok(self.snapshot())
    }

    fn check_invariants(&self) {
        debug_assert!(self.queue.cursor() <= self.queue.len());
        debug_assert_eq!(
            self.queue.remaining() + self.kept + self.deleted,
            self.initial_count
        );
    }
}
