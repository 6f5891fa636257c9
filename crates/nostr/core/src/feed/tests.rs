use super::*;
use crate::nip01::{Event, KIND_REPOST, KIND_TEXT_NOTE};
use std::collections::HashSet;

fn hex_id(seed: u8) -> String {
    format!("{seed:02x}").repeat(32)
}

fn author(seed: u8) -> String {
    format!("a{seed:x}").repeat(32)
}

fn raw_note(id: &str, pubkey: &str, created_at: u64) -> Event {
    Event {
        id: id.to_string(),
        pubkey: pubkey.to_string(),
        created_at,
        kind: KIND_TEXT_NOTE,
        tags: vec![],
        content: "note".to_string(),
        sig: "sig".to_string(),
    }
}

fn boost_of(target: &str, booster: &str, created_at: u64) -> Event {
    Event {
        id: format!("boost-{target}-{created_at}"),
        pubkey: booster.to_string(),
        created_at,
        kind: KIND_REPOST,
        tags: vec![
            vec!["e".to_string(), target.to_string(), String::new()],
            vec!["p".to_string(), author(9)],
        ],
        content: String::new(),
        sig: "sig".to_string(),
    }
}

fn no_mutes() -> HashSet<String> {
    HashSet::new()
}

#[test]
fn test_boost_dedup_uses_boost_time() {
    let n = hex_id(1);
    let note = raw_note(&n, &author(1), 100);
    let snapshot = PageSnapshot {
        notes: vec![FeedNote::from(&note)],
        boosts: vec![boost_of(&n, &author(2), 200)],
        referenced_events: vec![note],
        ..Default::default()
    };

    let delta = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(delta.ordered_new_ids, vec![n.clone()]);

    let other = hex_id(2);
    let mut snapshot = snapshot;
    snapshot.notes.push(FeedNote::new(other.clone(), author(3), 150));

    let delta = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(delta.ordered_new_ids, vec![n, other]);
}

#[test]
fn test_closure_with_updated_marker() {
    let n = hex_id(1);
    let note = raw_note(&n, &author(1), 100);
    let snapshot = PageSnapshot {
        notes: vec![FeedNote::from(&note), FeedNote::new(hex_id(2), author(2), 50)],
        boosts: vec![boost_of(&n, &author(2), 200)],
        referenced_events: vec![note],
        ..Default::default()
    };

    let first = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(first.newest_id(), Some(n.as_str()));

    let marker = LocalMarker::new(n.clone(), 100).with_boost_at(200);
    let second = compute_delta(&snapshot, Some(&marker), &no_mutes());
    assert!(second.is_empty());
    assert!(second.representative_avatars.is_empty());
}

#[test]
fn test_closure_for_plain_notes() {
    let snapshot = PageSnapshot {
        notes: vec![
            FeedNote::new(hex_id(1), author(1), 300),
            FeedNote::new(hex_id(2), author(2), 200),
        ],
        ..Default::default()
    };

    let first = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(first.ordered_new_ids, vec![hex_id(1), hex_id(2)]);

    let marker = LocalMarker::new(hex_id(1), 300);
    assert!(compute_delta(&snapshot, Some(&marker), &no_mutes()).is_empty());
}

#[test]
fn test_local_boost_time_suppresses_older_items() {
    let snapshot = PageSnapshot {
        notes: vec![
            FeedNote::new(hex_id(1), author(1), 150),
            FeedNote::new(hex_id(2), author(2), 250),
        ],
        ..Default::default()
    };

    let marker = LocalMarker::new(hex_id(9), 100).with_boost_at(200);
    let delta = compute_delta(&snapshot, Some(&marker), &no_mutes());
    assert_eq!(delta.ordered_new_ids, vec![hex_id(2)]);
}

#[test]
fn test_items_at_threshold_are_kept() {
    let snapshot = PageSnapshot {
        notes: vec![
            FeedNote::new(hex_id(1), author(1), 100),
            FeedNote::new(hex_id(2), author(2), 100),
        ],
        ..Default::default()
    };

    let marker = LocalMarker::new(hex_id(1), 100);
    let delta = compute_delta(&snapshot, Some(&marker), &no_mutes());
    assert_eq!(delta.ordered_new_ids, vec![hex_id(2)]);
}

#[test]
fn test_unresolved_boosts_are_dropped() {
    let snapshot = PageSnapshot {
        notes: vec![FeedNote::new(hex_id(1), author(1), 100)],
        boosts: vec![
            boost_of(&hex_id(7), &author(2), 500),
            Event {
                tags: vec![vec!["e".to_string(), "garbage".to_string()]],
                ..boost_of(&hex_id(8), &author(2), 600)
            },
        ],
        ..Default::default()
    };

    let delta = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(delta.ordered_new_ids, vec![hex_id(1)]);
}

#[test]
fn test_boost_resolved_from_embedded_event() {
    let n = hex_id(4);
    let note = raw_note(&n, &author(4), 100);
    let mut boost = boost_of(&n, &author(5), 400);
    boost.content = serde_json::to_string(&note).unwrap();

    let snapshot = PageSnapshot {
        boosts: vec![boost],
        ..Default::default()
    };

    let delta = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(delta.ordered_new_ids, vec![n]);
    assert_eq!(delta.representative_avatars[0].author_id, author(4));
}

#[test]
fn test_muted_author_never_appears() {
    let snapshot = PageSnapshot {
        notes: vec![
            FeedNote::new(hex_id(1), author(1), 900),
            FeedNote::new(hex_id(2), author(2), 100),
        ],
        ..Default::default()
    };
    let muted: HashSet<String> = [author(1)].into_iter().collect();

    let delta = compute_delta(&snapshot, None, &muted);
    assert_eq!(delta.ordered_new_ids, vec![hex_id(2)]);
    assert!(
        delta
            .representative_avatars
            .iter()
            .all(|avatar| avatar.author_id != author(1))
    );
}

#[test]
fn test_muted_booster_keeps_unmuted_note_by_default() {
    let n = hex_id(1);
    let note = raw_note(&n, &author(1), 100);
    let snapshot = PageSnapshot {
        notes: vec![FeedNote::from(&note)],
        boosts: vec![boost_of(&n, &author(6), 300)],
        referenced_events: vec![note],
        ..Default::default()
    };
    let muted: HashSet<String> = [author(6)].into_iter().collect();

    let delta = compute_delta(&snapshot, None, &muted);
    assert_eq!(delta.ordered_new_ids, vec![n.clone()]);

    let marker = LocalMarker::new(hex_id(9), 200);
    let delta = compute_delta(&snapshot, Some(&marker), &muted);
    assert_eq!(delta.ordered_new_ids, vec![n]);
}

#[test]
fn test_drop_muted_boosters_opt_in() {
    let n = hex_id(1);
    let note = raw_note(&n, &author(1), 100);
    let snapshot = PageSnapshot {
        notes: vec![FeedNote::from(&note)],
        boosts: vec![boost_of(&n, &author(6), 300)],
        referenced_events: vec![note],
        ..Default::default()
    };
    let muted: HashSet<String> = [author(6)].into_iter().collect();
    let marker = LocalMarker::new(hex_id(9), 200);
    let config = SyncConfig {
        drop_muted_boosters: true,
        ..SyncConfig::default()
    };

    assert!(compute_delta_with(&config, &snapshot, Some(&marker), &muted).is_empty());
    assert_eq!(
        compute_delta_with(&config, &snapshot, None, &muted).ordered_new_ids,
        vec![n]
    );
}

#[test]
fn test_avatar_cap() {
    let notes = (0..10_u8)
        .map(|i| FeedNote::new(hex_id(i), author(i), 1_000 + u64::from(i)))
        .collect();
    let snapshot = PageSnapshot {
        notes,
        ..Default::default()
    };

    let delta = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(delta.ordered_new_ids.len(), 10);
    assert_eq!(delta.representative_avatars.len(), 3);

    let authors: Vec<String> = delta
        .representative_avatars
        .iter()
        .map(|avatar| avatar.author_id.clone())
        .collect();
    assert_eq!(authors, vec![author(9), author(8), author(7)]);
}

#[test]
fn test_avatars_are_distinct_and_carry_profile() {
    let mut snapshot = PageSnapshot {
        notes: vec![
            FeedNote::new(hex_id(1), author(1), 300),
            FeedNote::new(hex_id(2), author(1), 200),
            FeedNote::new(hex_id(3), author(2), 100),
        ],
        ..Default::default()
    };
    snapshot.profiles.insert(
        author(1),
        ProfileFragment {
            picture: Some("https://example.com/a.png".to_string()),
            display_name: Some("alice".to_string()),
        },
    );

    let delta = compute_delta(&snapshot, None, &no_mutes());
    assert_eq!(delta.representative_avatars.len(), 2);
    assert_eq!(
        delta.representative_avatars[0].picture.as_deref(),
        Some("https://example.com/a.png")
    );
    assert_eq!(delta.representative_avatars[1].author_id, author(2));
    assert_eq!(delta.representative_avatars[1].picture, None);
}

#[test]
fn test_config_from_json_uses_defaults() {
    let config: SyncConfig = serde_json::from_str(r#"{"max_avatars": 5}"#).unwrap();
    assert_eq!(config.max_avatars, 5);
    assert!(!config.drop_muted_boosters);
}

#[test]
fn test_should_reset() {
    assert!(FeedDelta::default().should_reset(None));

    let delta = FeedDelta {
        ordered_new_ids: vec![hex_id(1), hex_id(2)],
        representative_avatars: vec![],
    };
    assert!(!delta.should_reset(None));
    assert!(!delta.should_reset(Some(hex_id(2).as_str())));
    assert!(delta.should_reset(Some(hex_id(1).as_str())));
}
