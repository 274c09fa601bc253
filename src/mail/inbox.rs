use super::{Message, MessageStore};
use crate::identity::Identity;

/// Messages eligible for the inbox: everything not authored by the local
/// identity, ordered by timestamp ascending with ties broken by id.
///
/// Self-authored messages are excluded by design; they only surface as
/// ancestors inside a reconstructed thread. Roots and replies both appear.
pub fn inbox_view<'a>(store: &'a MessageStore, identity: &Identity) -> Vec<&'a Message> {
    let mut view: Vec<&Message> = store
        .iter()
        .filter(|m| !identity.is_mine(m))
        .collect();
    view.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, sender: &str, timestamp: u64, parent_id: Option<&str>) -> Message {
        Message {
            id: id.to_string(),
            sender: sender.to_string(),
            sender_username: None,
            recipient: String::new(),
            content: format!("body of {id}"),
            timestamp,
            read: false,
            parent_id: parent_id.map(str::to_string),
        }
    }

    fn store_of(messages: Vec<Message>) -> MessageStore {
        let mut store = MessageStore::new();
        store.replace_all(messages);
        store
    }

    #[test]
    fn excludes_exactly_the_self_authored_subset() {
        let store = store_of(vec![
            msg("1", "A", 1, None),
            msg("2", "B", 2, Some("1")),
            msg("3", "A", 3, Some("2")),
            msg("4", "C", 4, None),
        ]);
        let mut identity = Identity::new();
        identity.set_address("A");

        let view = inbox_view(&store, &identity);
        assert!(view.iter().all(|m| !identity.is_mine(m)));

        // The inbox and the excluded set partition the store.
        let excluded = store.len() - view.len();
        assert_eq!(excluded, store.iter().filter(|m| identity.is_mine(m)).count());
        let ids: Vec<&str> = view.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[test]
    fn unset_identity_shows_everything() {
        let store = store_of(vec![msg("1", "A", 1, None), msg("2", "B", 2, None)]);
        assert_eq!(inbox_view(&store, &Identity::new()).len(), 2);
    }

    #[test]
    fn ordered_by_timestamp_then_id() {
        let store = store_of(vec![
            msg("b", "X", 5, None),
            msg("a", "X", 5, None),
            msg("c", "X", 1, None),
        ]);
        let ids: Vec<&str> = inbox_view(&store, &Identity::new())
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn scenario_from_three_peer_exchange() {
        let store = store_of(vec![
            msg("1", "A", 1, None),
            msg("2", "B", 2, Some("1")),
            msg("3", "A", 3, Some("2")),
        ]);
        let mut identity = Identity::new();
        identity.set_address("A");
        let ids: Vec<&str> = inbox_view(&store, &identity)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2"]);
    }
}
