//! End-to-end: decode a shared link, resolve the thread of a reply, and fold
//! a fetched page into a feed delta.

use std::collections::HashSet;

use nostr_feed_core::nip01::{KIND_REPOST, KIND_TEXT_NOTE};
use nostr_feed_core::nip10::{apply_relay_hints, reply_tags};
use nostr_feed_core::{
    Event, EventId, FeedNote, LocalMarker, MapLookup, Nip19, Nip19Event, PageSnapshot, PublicKey,
    compute_delta, nip19, resolve_thread,
};

const ROOT_ID: &str = "0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f";
const REPLY_ID: &str = "1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e1e";
const ALICE: &str = "a11ce00000000000000000000000000000000000000000000000000000000000";
const BOB: &str = "b0b0000000000000000000000000000000000000000000000000000000000000";
const CAROL: &str = "ca20100000000000000000000000000000000000000000000000000000000000";

fn event(id: &str, pubkey: &str, created_at: u64, kind: u16, tags: Vec<Vec<String>>) -> Event {
    Event {
        id: id.to_string(),
        pubkey: pubkey.to_string(),
        created_at,
        kind,
        tags,
        content: String::new(),
        sig: "sig".to_string(),
    }
}

#[test]
fn test_shared_link_to_reply_to_delta() -> anyhow::Result<()> {
    let pointer = Nip19Event::new(EventId::from_hex(ROOT_ID)?)
        .with_relay("wss://relay.example.com")
        .with_author(PublicKey::from_hex(ALICE)?);
    let link = Nip19::Event(pointer.clone()).to_bech32()?;
    assert!(link.starts_with("nevent1"));

    let Nip19::Event(decoded) = nip19::decode(&link)? else {
        anyhow::bail!("expected an event pointer");
    };
    assert_eq!(decoded, pointer);

    let root = event(ROOT_ID, ALICE, 100, KIND_TEXT_NOTE, vec![]);
    let root_thread = resolve_thread(&root, &MapLookup::new());
    let mut tags = reply_tags(&root, &root_thread);
    let hints = [(ROOT_ID.to_string(), decoded.relays()[0].clone())]
        .into_iter()
        .collect();
    apply_relay_hints(&mut tags, &hints);

    let reply = event(REPLY_ID, BOB, 200, KIND_TEXT_NOTE, tags);
    let mut lookup = MapLookup::new();
    lookup.insert(ROOT_ID, PublicKey::from_hex(ALICE)?, KIND_TEXT_NOTE);
    let thread = resolve_thread(&reply, &lookup);

    let root_ref = thread.root.clone().map(|root| root.lookup_key());
    assert_eq!(root_ref, Some(Some(ROOT_ID.to_string())));
    assert_eq!(thread.reply_to_author, Some(PublicKey::from_hex(ALICE)?));

    let boost = event(
        "b005700000000000000000000000000000000000000000000000000000000000",
        CAROL,
        300,
        KIND_REPOST,
        vec![vec!["e".to_string(), REPLY_ID.to_string()]],
    );
    let snapshot = PageSnapshot {
        notes: vec![FeedNote::from(&root), FeedNote::from(&reply)],
        boosts: vec![boost],
        referenced_events: vec![reply.clone()],
        ..Default::default()
    };

    let delta = compute_delta(&snapshot, None, &HashSet::new());
    assert_eq!(
        delta.ordered_new_ids,
        vec![REPLY_ID.to_string(), ROOT_ID.to_string()]
    );
    assert_eq!(delta.representative_avatars.len(), 2);

    let marker = LocalMarker::new(REPLY_ID, 200).with_boost_at(300);
    assert!(compute_delta(&snapshot, Some(&marker), &HashSet::new()).is_empty());

    Ok(())
}
