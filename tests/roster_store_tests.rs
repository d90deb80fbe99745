#![allow(clippy::unwrap_used)]

use game_poll_bot::storage::{RosterError, RosterStore};
use game_poll_bot::voting::{Participant, Tally, Vote, VotingSession};
use game_poll_bot::utils::datetime::now_in;
use tempfile::{tempdir, TempDir};
use tokio_test::{assert_err, assert_ok};

fn write_roster(content: &str) -> (RosterStore, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users");
    std::fs::write(&path, content).unwrap();
    (RosterStore::new(path), dir)
}

#[test]
fn test_load_keeps_file_order() {
    let (store, _dir) = write_roster("zoe 1 0 0\nadam 0 1 0\nmia 0 0 1\n");

    let participants = assert_ok!(store.load());
    let handles: Vec<_> = participants.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["zoe", "adam", "mia"]);
}

#[test]
fn test_malformed_line_is_skipped() {
    let (store, _dir) = write_roster("alice 0 0 0\ncarl x y\nbob 0 0 0\n");

    let parsed = assert_ok!(store.load_detailed());
    assert_eq!(parsed.participants.len(), 2);
    assert!(parsed.participants.iter().all(|p| p.handle != "carl"));
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].line_no, 2);
}

#[test]
fn test_save_after_load_reproduces_well_formed_lines() {
    let input = "alice 3 1 2\ncarl x y\nbob 0 5 -1\n";
    let (store, _dir) = write_roster(input);

    let participants = assert_ok!(store.load());
    assert_ok!(store.save(&participants));

    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        "alice 3 1 2\nbob 0 5 -1\n"
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let store = RosterStore::new(dir.path().join("nope"));

    let err = assert_err!(store.load());
    assert!(matches!(err, RosterError::Read { .. }));
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let store = RosterStore::new(dir.path().join("missing").join("users"));

    let err = assert_err!(store.save(&[Participant::new("alice", Tally::default())]));
    assert!(matches!(err, RosterError::Write { .. }));
}

#[test]
fn test_history_survives_a_round_trip_through_the_session() {
    let (store, _dir) = write_roster("alice 2 0 0\nbob 0 0 0\n");
    let now = now_in(chrono_tz::Europe::Moscow);

    let mut session = VotingSession::new(store.load().unwrap(), now + chrono::Duration::hours(2));
    session.start(5, now);
    session.record_answer("@alice", Vote::Yes).unwrap();
    session.record_answer("bob", Vote::No).unwrap();
    assert_ok!(store.save(&session.roster_snapshot()));

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded[0].history, Tally::new(3, 0, -1));
    assert_eq!(reloaded[1].history, Tally::new(0, 1, -1));
}
