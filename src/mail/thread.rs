use std::collections::HashSet;

use super::{Message, MessageStore};
use crate::identity::{Authorship, Identity};

/// One link of a reconstructed reply chain.
///
/// `depth` is the distance from the selected leaf (0 at the leaf), enough
/// for a consumer to render top-down or indented without re-walking.
#[derive(Debug, Clone)]
pub struct ThreadEntry {
    pub message: Message,
    pub depth: usize,
    pub author: Authorship,
}

/// Ancestor chain from a selected message up to its earliest resolvable
/// ancestor, in leaf-to-root order as walked.
#[derive(Debug, Clone)]
pub struct Thread {
    pub entries: Vec<ThreadEntry>,
    /// Set when the walk hit the cycle/depth guard instead of a root or a
    /// dangling reference.
    pub truncated: bool,
}

impl Thread {
    /// Entries reordered for top-down rendering.
    pub fn root_to_leaf(&self) -> impl Iterator<Item = &ThreadEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk upward from `selected_id` through `parent_id` links.
///
/// A parent missing from the store ends the chain silently; a partial chain
/// is always a valid, renderable result. Corrupted data (a parent link that
/// loops, or a chain longer than the store itself) stops the walk and marks
/// the thread truncated rather than looping. Authorship is classified at
/// reconstruction time so an identity change re-labels entries on the next
/// walk without a re-fetch.
///
/// Returns `None` only when `selected_id` itself is unknown.
pub fn reconstruct(
    store: &MessageStore,
    identity: &Identity,
    selected_id: &str,
) -> Option<Thread> {
    let mut current = store.get(selected_id)?;
    let max_depth = store.len() + 1;
    let mut visited: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();
    let mut truncated = false;
    let mut depth = 0;

    loop {
        visited.insert(current.id.as_str());
        entries.push(ThreadEntry {
            message: current.clone(),
            depth,
            author: identity.classify(current),
        });

        let Some(parent_id) = current.parent_id.as_deref() else {
            break; // reached a root
        };
        if visited.contains(parent_id) || depth + 1 > max_depth {
            truncated = true;
            break;
        }
        match store.get(parent_id) {
            Some(parent) => {
                current = parent;
                depth += 1;
            }
            // Dangling reference: the chain ends at the last resolvable
            // ancestor.
            None => break,
        }
    }

    Some(Thread { entries, truncated })
}
