use crate::mail::Message;

/// Authorship of a message relative to the local identity, decided once at
/// resolution time so consumers never re-compare address strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorship {
    Mine,
    Peer,
}

impl Authorship {
    pub fn is_mine(self) -> bool {
        matches!(self, Authorship::Mine)
    }
}

/// The local user's address, as reported by the daemon.
///
/// Starts unset; until an address is known every message classifies as
/// `Peer`. Setting a new address takes effect for all subsequent lookups,
/// nothing is cached on the messages themselves.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    address: Option<String>,
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored address unconditionally.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Exact, case-sensitive comparison against the message sender.
    pub fn classify(&self, message: &Message) -> Authorship {
        match &self.address {
            Some(addr) if *addr == message.sender => Authorship::Mine,
            _ => Authorship::Peer,
        }
    }

    pub fn is_mine(&self, message: &Message) -> bool {
        self.classify(message).is_mine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Message;

    fn message_from(sender: &str) -> Message {
        Message {
            id: "m1".to_string(),
            sender: sender.to_string(),
            sender_username: None,
            recipient: String::new(),
            content: "hello".to_string(),
            timestamp: 1,
            read: false,
            parent_id: None,
        }
    }

    #[test]
    fn unset_identity_classifies_everything_as_peer() {
        let identity = Identity::new();
        assert!(!identity.is_mine(&message_from("abc")));
        assert!(!identity.is_mine(&message_from("")));
    }

    #[test]
    fn matches_exact_sender_only() {
        let mut identity = Identity::new();
        identity.set_address("abc");
        assert!(identity.is_mine(&message_from("abc")));
        assert!(!identity.is_mine(&message_from("ABC")));
        assert!(!identity.is_mine(&message_from("abcd")));
    }

    #[test]
    fn setting_same_address_twice_is_idempotent() {
        let mut identity = Identity::new();
        identity.set_address("abc");
        let before = identity.is_mine(&message_from("abc"));
        identity.set_address("abc");
        assert_eq!(before, identity.is_mine(&message_from("abc")));
    }

    #[test]
    fn replacing_address_moves_authorship() {
        let mut identity = Identity::new();
        identity.set_address("abc");
        identity.set_address("xyz");
        assert!(!identity.is_mine(&message_from("abc")));
        assert_eq!(identity.classify(&message_from("xyz")), Authorship::Mine);
    }
}
