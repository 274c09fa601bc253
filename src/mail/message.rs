use serde::{Deserialize, Deserializer, Serialize};

/// A decrypted message record as served by the daemon.
///
/// Immutable once stored; id and timestamp are assigned remotely and never
/// synthesized locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    /// Human-readable sender label, present only on inbound messages.
    #[serde(default)]
    pub sender_username: Option<String>,
    #[serde(default)]
    pub recipient: String,
    pub content: String,
    /// Seconds since epoch.
    pub timestamp: u64,
    #[serde(default)]
    pub read: bool,
    /// Id of the message this one replies to; `None` for a root message.
    /// The daemon emits `""` for "no parent", normalized here.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<String>,
}

impl Message {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Display label: username when the daemon resolved one, otherwise the
    /// leading 16 characters of the address.
    pub fn display_sender(&self) -> &str {
        match self.sender_username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => {
                let end = self
                    .sender
                    .char_indices()
                    .nth(16)
                    .map_or(self.sender.len(), |(i, _)| i);
                &self.sender[..end]
            }
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_parent_id_is_root() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"a","sender":"s","content":"hi","timestamp":10,"parent_id":""}"#,
        )
        .unwrap();
        assert!(msg.is_root());
    }

    #[test]
    fn missing_and_null_parent_id_are_root() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"a","sender":"s","content":"hi","timestamp":10}"#,
        )
        .unwrap();
        assert!(msg.is_root());

        let msg: Message = serde_json::from_str(
            r#"{"id":"a","sender":"s","content":"hi","timestamp":10,"parent_id":null}"#,
        )
        .unwrap();
        assert!(msg.is_root());
    }

    #[test]
    fn parent_id_is_kept_when_present() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"b","sender":"s","content":"hi","timestamp":10,"parent_id":"a"}"#,
        )
        .unwrap();
        assert_eq!(msg.parent_id.as_deref(), Some("a"));
    }

    #[test]
    fn display_sender_prefers_username() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"a","sender":"0123456789abcdef0123","sender_username":"alice","content":"x","timestamp":1}"#,
        )
        .unwrap();
        assert_eq!(msg.display_sender(), "alice");
    }

    #[test]
    fn display_sender_truncates_bare_address() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"a","sender":"0123456789abcdef0123","content":"x","timestamp":1}"#,
        )
        .unwrap();
        assert_eq!(msg.display_sender(), "0123456789abcdef");
    }
}
