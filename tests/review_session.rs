use mswp::{
    CollisionPolicy, MswpError, PurgeMode, ReviewSession, ScanOptions, SessionState,
    QUARANTINE_DIR_NAME,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn folder_with(files: &[(&str, &[u8])]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, bytes) in files {
        fs::write(temp_dir.path().join(name), bytes).unwrap();
    }
    temp_dir
}

fn open(dir: &Path) -> ReviewSession {
    ReviewSession::open(dir, &ScanOptions::default(), CollisionPolicy::Abort).unwrap()
}

fn current_name(session: &ReviewSession) -> Option<String> {
    session.current().map(|item| item.display_name.clone())
}

#[test]
fn delete_keep_then_undo_twice_restores_everything() {
    let dir = folder_with(&[("a.jpg", b"A"), ("b.jpg", b"B"), ("c.jpg", b"C")]);
    let mut session = open(dir.path());
    let quarantine = dir.path().join(QUARANTINE_DIR_NAME);

    session.delete().unwrap();
    assert!(!dir.path().join("a.jpg").exists());
    assert!(quarantine.join("a.jpg").exists());
    assert_eq!(current_name(&session).as_deref(), Some("b.jpg"));

    session.keep().unwrap();
    assert_eq!(current_name(&session).as_deref(), Some("c.jpg"));

    session.undo().unwrap();
    assert_eq!(current_name(&session).as_deref(), Some("b.jpg"));

    let snapshot = session.undo().unwrap();
    assert_eq!(snapshot.current.unwrap().display_name, "a.jpg");
    assert_eq!(snapshot.stats.remaining, 3);
    assert_eq!(snapshot.stats.kept, 0);
    assert_eq!(snapshot.stats.deleted, 0);
    assert!(dir.path().join("a.jpg").exists());
    assert!(!quarantine.join("a.jpg").exists());
}

#[test]
fn deleting_the_only_video_exhausts_the_session() {
    let dir = folder_with(&[("x.mp4", b"\x00\x00\x00\x18ftypmp42")]);
    let mut session = open(dir.path());

    let snapshot = session.delete().unwrap();
    assert_eq!(snapshot.state, SessionState::Exhausted);
    assert!(snapshot.current.is_none());
    assert_eq!(snapshot.stats.deleted, 1);
    assert!(dir.path().join(QUARANTINE_DIR_NAME).join("x.mp4").exists());

    let err = session.keep().unwrap_err();
    assert!(err.is_out_of_range());
}

#[test]
fn counters_always_add_up_to_the_initial_count() {
    let dir = folder_with(&[
        ("1.jpg", b"1"),
        ("2.png", b"2"),
        ("3.gif", b"3"),
        ("4.mp4", b"4"),
        ("5.mov", b"5"),
    ]);
    let mut session = open(dir.path());
    let initial = session.initial_count();
    assert_eq!(initial, 5);

    let steps: &[fn(&mut ReviewSession) -> mswp::Result<mswp::Snapshot>] = &[
        ReviewSession::keep,
        ReviewSession::delete,
        ReviewSession::undo,
        ReviewSession::delete,
        ReviewSession::delete,
        ReviewSession::keep,
        ReviewSession::undo,
        ReviewSession::undo,
        ReviewSession::keep,
        ReviewSession::keep,
        ReviewSession::keep,
        ReviewSession::keep,
    ];

    for step in steps {
        // Out-of-range steps are allowed to fail; the counters must still balance
        let _ = step(&mut session);
        let stats = session.stats();
        assert_eq!(stats.remaining + stats.kept + stats.deleted, initial);
    }

    assert_eq!(session.state(), SessionState::Exhausted);
}

#[test]
fn quarantine_round_trip_preserves_bytes() {
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let dir = folder_with(&[("photo.jpg", &payload)]);
    let mut session = open(dir.path());

    session.delete().unwrap();
    session.undo().unwrap();

    assert_eq!(fs::read(dir.path().join("photo.jpg")).unwrap(), payload);
}

#[test]
fn undo_with_empty_history_is_out_of_range() {
    let dir = folder_with(&[("a.jpg", b"A")]);
    let mut session = open(dir.path());

    let err = session.undo().unwrap_err();
    assert!(matches!(err, MswpError::OutOfRange { .. }));
    assert_eq!(current_name(&session).as_deref(), Some("a.jpg"));
}

#[test]
fn close_and_purge_empties_the_quarantine() {
    let dir = folder_with(&[("a.jpg", b"A"), ("b.jpg", b"B")]);
    let mut session = open(dir.path());

    let request = session.request_close().unwrap();
    assert!(!request.has_quarantined_files);

    session.delete().unwrap();
    let request = session.request_close().unwrap();
    assert!(request.has_quarantined_files);
    assert_eq!(request.quarantined, 1);

    session.purge(PurgeMode::Delete).unwrap();
    assert!(!dir.path().join(QUARANTINE_DIR_NAME).exists());
    assert!(dir.path().join("b.jpg").exists());
    // Nothing left that could be restored
    assert!(session.undo().is_err());
}

#[test]
fn quarantine_folder_is_never_scanned() {
    let dir = folder_with(&[("a.jpg", b"A")]);
    let quarantine = dir.path().join(QUARANTINE_DIR_NAME);
    fs::create_dir(&quarantine).unwrap();
    fs::write(quarantine.join("old.jpg"), b"old").unwrap();

    let session = open(dir.path());
    assert_eq!(session.initial_count(), 1);

    // Leftovers from an earlier session still count towards the purge prompt
    let request = session.request_close().unwrap();
    assert_eq!(request.quarantined, 1);
}

#[test]
fn empty_folder_has_nothing_to_review() {
    let dir = folder_with(&[("notes.txt", b"text")]);
    let mut session = open(dir.path());

    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.delete().unwrap_err().is_out_of_range());
}
