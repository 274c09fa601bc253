use std::collections::HashMap;

use super::Message;

/// In-memory collection of all known messages, keyed by id.
///
/// The store makes no ordering promises; `iter()` is unordered and callers
/// that need an order (inbox view, thread walk) impose their own.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: HashMap<String, Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full known set, used after a bulk refresh.
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        self.messages = messages
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();
    }

    /// Merge a single message; a duplicate id overwrites the stored copy.
    pub fn insert(&mut self, message: Message) {
        self.messages.insert(message.id.clone(), message);
    }

    /// Absence is a normal, expected case (dangling references, parents not
    /// yet synced), never an error.
    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    /// Direct replies to the given id, ordered by timestamp then id.
    pub fn replies_to(&self, id: &str) -> Vec<&Message> {
        let mut replies: Vec<&Message> = self
            .messages
            .values()
            .filter(|m| m.parent_id.as_deref() == Some(id))
            .collect();
        replies.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });
        replies
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
