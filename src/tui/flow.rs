// Decisions the event loop takes on its own: unreadable items and quitting

use super::{KeyAction, Notice};
use crate::async_preview::SyncPreviewManager;
use crate::domain::{CloseRequest, ReviewSession};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Moves items whose preview reports them unreadable into quarantine.
///
/// One path at a time can be held back from that: an item the user just
/// brought back with undo, or one whose move already failed. A held item stays
/// on screen until the user keeps or deletes it.
#[derive(Debug, Default)]
pub struct BrokenItemGuard {
    held: Option<PathBuf>,
}

impl BrokenItemGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, path: &Path) -> bool {
        self.held.as_deref() == Some(path)
    }

    /// Updates the held path after a successful keep, delete or undo
    pub fn after_action(&mut self, action: KeyAction, session: &ReviewSession) {
        self.held = match action {
            KeyAction::Undo => session.current().map(|item| item.path.clone()),
            _ => None,
        };
    }

    /// Quarantines the current item if its preview came back broken.
    ///
    /// Returns the notice to show, or `None` when nothing happened.
    pub fn check(
        &mut self,
        session: &mut ReviewSession,
        preview_manager: &mut SyncPreviewManager,
    ) -> Option<Notice> {
        let (path, name) = session
            .current()
            .map(|item| (item.path.clone(), item.display_name.clone()))?;

        if self.is_held(&path) {
            return None;
        }

        let reason = preview_manager.take_broken(&path)?;

        match session.discard_broken(&reason) {
            Ok(_) => Some(Notice::info(format!(
                "{} is unreadable, moved to _deleted",
                name
            ))),
            Err(e) => {
                self.held = Some(path);
                Some(Notice::error(e.to_string()))
            }
        }
    }
}

/// What quitting leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosePlan {
    /// Ask before purging the quarantine folder
    Confirm(CloseRequest),
    /// Nothing is quarantined; leave right away
    Exit,
    /// The quarantine folder could not be inspected; leave it untouched
    ExitUnchecked(String),
}

pub fn plan_close(request: Result<CloseRequest>) -> ClosePlan {
    match request {
        Ok(request) if request.has_quarantined_files => ClosePlan::Confirm(request),
        Ok(_) => ClosePlan::Exit,
        Err(e) => {
            tracing::warn!(error = %e, "could not inspect quarantine on close");
            ClosePlan::ExitUnchecked(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::async_preview::PreviewState;
    use crate::domain::{CollisionPolicy, ScanOptions, QUARANTINE_DIR_NAME};
    use crate::tui::NoticeLevel;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Polls until the current item's preview is no longer loading
    fn settle(manager: &mut SyncPreviewManager, session: &ReviewSession) {
        let Some(item) = session.current() else {
            return;
        };
        for _ in 0..500 {
            if !matches!(manager.request_preview(item, 40, 20), PreviewState::Loading) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("preview never finished");
    }

    /// a.mp4, b.jpg (garbage bytes), c.mp4
    fn folder_with_broken_item() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mp4"), b"video a").unwrap();
        fs::write(temp_dir.path().join("b.jpg"), b"not a jpeg").unwrap();
        fs::write(temp_dir.path().join("c.mp4"), b"video c").unwrap();
        temp_dir
    }

    fn open(dir: &Path) -> ReviewSession {
        ReviewSession::open(dir, &ScanOptions::default(), CollisionPolicy::Abort).unwrap()
    }

    fn current_name(session: &ReviewSession) -> String {
        session.current().unwrap().display_name.clone()
    }

    mod broken_item_tests {
        use super::*;

        #[test]
        fn test_healthy_item_is_left_alone() {
            let temp_dir = folder_with_broken_item();
            let mut session = open(temp_dir.path());
            let mut manager = SyncPreviewManager::new().unwrap();
            let mut guard = BrokenItemGuard::new();

            settle(&mut manager, &session);
            assert!(guard.check(&mut session, &mut manager).is_none());
            assert_eq!(current_name(&session), "a.mp4");
            assert_eq!(session.history_len(), 0);
        }

        #[test]
        fn test_broken_item_is_quarantined() {
            let temp_dir = folder_with_broken_item();
            let mut session = open(temp_dir.path());
            let mut manager = SyncPreviewManager::new().unwrap();
            let mut guard = BrokenItemGuard::new();

            session.keep().unwrap();
            settle(&mut manager, &session);

            let notice = guard.check(&mut session, &mut manager).unwrap();
            assert!(notice.text.contains("b.jpg"));
            assert_eq!(current_name(&session), "c.mp4");
            assert_eq!(session.stats().deleted, 1);
            assert!(temp_dir.path().join(QUARANTINE_DIR_NAME).join("b.jpg").exists());
        }

        #[test]
        fn test_undo_walks_past_discarded_item() {
            let temp_dir = folder_with_broken_item();
            let mut session = open(temp_dir.path());
            let mut manager = SyncPreviewManager::new().unwrap();
            let mut guard = BrokenItemGuard::new();

            session.keep().unwrap();
            guard.after_action(KeyAction::Keep, &session);
            settle(&mut manager, &session);
            assert!(guard.check(&mut session, &mut manager).is_some());
            assert_eq!(session.history_len(), 2);

            // Undo brings b.jpg back; it must not be discarded again
            session.undo().unwrap();
            guard.after_action(KeyAction::Undo, &session);
            manager.reset();
            settle(&mut manager, &session);

            assert!(guard.check(&mut session, &mut manager).is_none());
            assert_eq!(current_name(&session), "b.jpg");
            assert_eq!(session.history_len(), 1);
            assert!(temp_dir.path().join("b.jpg").exists());

            // And the keep below it is still reachable
            session.undo().unwrap();
            guard.after_action(KeyAction::Undo, &session);
            assert_eq!(current_name(&session), "a.mp4");
            assert_eq!(session.history_len(), 0);
        }

        #[test]
        fn test_failed_discard_is_not_retried() {
            let temp_dir = folder_with_broken_item();
            let quarantine = temp_dir.path().join(QUARANTINE_DIR_NAME);
            fs::create_dir(&quarantine).unwrap();
            fs::write(quarantine.join("b.jpg"), b"older b").unwrap();

            let mut session = open(temp_dir.path());
            let mut manager = SyncPreviewManager::new().unwrap();
            let mut guard = BrokenItemGuard::new();

            session.keep().unwrap();
            settle(&mut manager, &session);

            let notice = guard.check(&mut session, &mut manager).unwrap();
            assert_eq!(notice.level, NoticeLevel::Error);
            assert!(guard.is_held(&temp_dir.path().canonicalize().unwrap().join("b.jpg")));

            settle(&mut manager, &session);
            assert!(guard.check(&mut session, &mut manager).is_none());
            assert_eq!(current_name(&session), "b.jpg");
            assert_eq!(session.history_len(), 1);
        }

        #[test]
        fn test_decision_releases_held_item() {
            let temp_dir = folder_with_broken_item();
            let mut session = open(temp_dir.path());
            let mut guard = BrokenItemGuard::new();

            guard.after_action(KeyAction::Undo, &session);
            assert!(guard.is_held(&session.current().unwrap().path));

            session.keep().unwrap();
            guard.after_action(KeyAction::Keep, &session);
            let a = temp_dir.path().canonicalize().unwrap().join("a.mp4");
            assert!(!guard.is_held(&a));
        }
    }

    mod close_tests {
        use super::*;

        #[test]
        fn test_plan_close_without_quarantine() {
            let temp_dir = folder_with_broken_item();
            let session = open(temp_dir.path());
            assert_eq!(plan_close(session.request_close()), ClosePlan::Exit);
        }

        #[test]
        fn test_plan_close_asks_when_files_quarantined() {
            let temp_dir = folder_with_broken_item();
            let mut session = open(temp_dir.path());
            session.delete().unwrap();

            match plan_close(session.request_close()) {
                ClosePlan::Confirm(request) => assert_eq!(request.quarantined, 1),
                other => panic!("expected confirmation, got {:?}", other),
            }
        }

        #[test]
        fn test_plan_close_unreadable_quarantine_still_exits() {
            let temp_dir = folder_with_broken_item();
            // A plain file where the quarantine folder should be
            fs::write(temp_dir.path().join(QUARANTINE_DIR_NAME), b"oops").unwrap();
            let session = open(temp_dir.path());

            assert!(matches!(
                plan_close(session.request_close()),
                ClosePlan::ExitUnchecked(_)
            ));
        }
    }
}
