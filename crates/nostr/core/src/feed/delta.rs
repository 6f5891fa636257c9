use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::config::SyncConfig;
use super::model::{AvatarRef, FeedDelta, FeedNote, LocalMarker, PageSnapshot};
use crate::nip01::Event;
use crate::nip18;

/// A note paired with the time it surfaced in the feed.
struct Candidate<'a> {
    effective_at: u64,
    note: FeedNote,
    booster: Option<&'a str>,
}

/// Pair each boost with the note it points at, dropping boosts whose target
/// is neither in `referenced_events` nor embedded in the boost.
fn resolve_boosts(snapshot: &PageSnapshot) -> (Vec<Candidate<'_>>, usize) {
    let referenced: HashMap<String, &Event> = snapshot
        .referenced_events
        .iter()
        .map(|event| (event.id.to_ascii_lowercase(), event))
        .collect();

    let mut resolved = Vec::with_capacity(snapshot.boosts.len());
    let mut unresolved = 0;

    for boost in &snapshot.boosts {
        let Some(target) = nip18::boosted_event_id(boost) else {
            trace!(boost = %boost.id, "boost has no event reference");
            unresolved += 1;
            continue;
        };

        let note = referenced
            .get(&target.to_hex())
            .map(|event| FeedNote::from(*event))
            .or_else(|| nip18::embedded_event(boost).map(|event| FeedNote::from(&event)));

        match note {
            Some(note) => resolved.push(Candidate {
                effective_at: boost.created_at,
                note,
                booster: Some(boost.pubkey.as_str()),
            }),
            None => {
                trace!(boost = %boost.id, target = %target, "boost target not found");
                unresolved += 1;
            }
        }
    }

    (resolved, unresolved)
}

/// Compute the "what's new" delta with default settings.
pub fn compute_delta(
    snapshot: &PageSnapshot,
    newest_local: Option<&LocalMarker>,
    muted_authors: &HashSet<String>,
) -> FeedDelta {
    compute_delta_with(&SyncConfig::default(), snapshot, newest_local, muted_authors)
}

/// Compute the "what's new" delta.
///
/// Items are ordered by effective timestamp (boost time for boosted notes,
/// authoring time otherwise), newest first, one entry per underlying note.
/// Anything older than the local marker, the marker itself, and muted
/// authors are left out.
pub fn compute_delta_with(
    config: &SyncConfig,
    snapshot: &PageSnapshot,
    newest_local: Option<&LocalMarker>,
    muted_authors: &HashSet<String>,
) -> FeedDelta {
    let (boosted, unresolved) = resolve_boosts(snapshot);
    let threshold = newest_local.map_or(0, LocalMarker::latest_timestamp);
    let local_id = newest_local.map(|marker| marker.id.as_str());

    let mut candidates: Vec<Candidate<'_>> = snapshot
        .notes
        .iter()
        .map(|note| Candidate {
            effective_at: note.created_at,
            note: note.clone(),
            booster: None,
        })
        .chain(boosted)
        .filter(|candidate| candidate.effective_at >= threshold)
        .filter(|candidate| Some(candidate.note.id.as_str()) != local_id)
        .filter(|candidate| {
            let muted = muted_authors.contains(&candidate.note.author_id)
                || (config.drop_muted_boosters
                    && candidate
                        .booster
                        .is_some_and(|booster| muted_authors.contains(booster)));
            if muted {
                trace!(id = %candidate.note.id, "skipping muted item");
            }
            !muted
        })
        .collect();

    candidates.sort_by(|a, b| {
        Reverse(a.effective_at)
            .cmp(&Reverse(b.effective_at))
            .then_with(|| a.note.id.cmp(&b.note.id))
    });

    let mut seen = HashSet::new();
    let mut avatar_authors = HashSet::new();
    let mut delta = FeedDelta::default();

    for candidate in candidates {
        if !seen.insert(candidate.note.id.clone()) {
            continue;
        }

        let author = candidate.note.author_id.as_str();
        if delta.representative_avatars.len() < config.max_avatars
            && avatar_authors.insert(author.to_string())
        {
            delta
                .representative_avatars
                .push(AvatarRef::for_author(author, snapshot.profiles.get(author)));
        }

        delta.ordered_new_ids.push(candidate.note.id);
    }

    debug!(
        notes = snapshot.notes.len(),
        boosts = snapshot.boosts.len(),
        unresolved_boosts = unresolved,
        threshold,
        new_items = delta.ordered_new_ids.len(),
        "computed feed delta"
    );

    delta
}
