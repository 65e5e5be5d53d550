//! Append-order verification.
//!
//! A transcript is well ordered when:
//!
//! 1. **Contiguous sequence**: entry `i` carries `sequence == i`.
//! 2. **Unique messages**: no message id appears twice.
//!
//! Together these mean nothing was inserted, removed, duplicated or
//! reordered after the fact. Timestamps are not compared: overlapping
//! replies are stamped on different worker threads just before they take
//! the transcript lock, so wall-clock order can trail append order by a
//! few microseconds.

use std::collections::HashSet;

use crate::entry::TranscriptEntry;

/// Return `true` when `entries` satisfy both ordering rules.
///
/// Returns `false` at the first violation. An empty slice is valid.
pub fn verify_order(entries: &[TranscriptEntry]) -> bool {
    let mut seen = HashSet::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        if entry.sequence != idx as u64 {
            return false;
        }

        if !seen.insert(&entry.message.id) {
            return false;
        }
    }

    true
}
