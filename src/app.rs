use tracing::{debug, info, warn};

use crate::error::Result;
use crate::identity::Identity;
use crate::mail::{inbox_view, reconstruct, Message, MessageStore, Thread};
use crate::remote::RemoteClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Fetching,
    Sending,
}

/// Orchestrates fetch/send cycles against the daemon and feeds results into
/// the message store.
///
/// Refresh policy is cancel-and-replace: every refresh takes a monotonically
/// increasing token and a response only lands if no newer refresh began
/// while it was in flight. A failed or stale fetch never touches the store.
pub struct App {
    pub state: SyncState,
    pub identity: Identity,
    pub store: MessageStore,
    remote: RemoteClient,
    refresh_seq: u64,
}

impl App {
    pub fn new(remote: RemoteClient) -> Self {
        Self {
            state: SyncState::Idle,
            identity: Identity::new(),
            store: MessageStore::new(),
            remote,
            refresh_seq: 0,
        }
    }

    /// Seed the local address from `GET /meta`.
    ///
    /// A failure leaves the identity unset; the client still works, it just
    /// renders every message as peer-authored until a later call succeeds.
    pub async fn seed_identity(&mut self) {
        match self.remote.fetch_meta().await {
            Ok(meta) if !meta.public_key.is_empty() => {
                debug!(address = %meta.public_key, "seeded identity from daemon");
                self.identity.set_address(meta.public_key);
            }
            Ok(_) => warn!("daemon reported an empty public key"),
            Err(e) => warn!(error = %e, "could not fetch identity from daemon"),
        }
    }

    /// Fetch all messages and bulk-replace the store.
    ///
    /// On failure the previous contents stay intact, there is no partial
    /// overwrite. Returns the number of known messages after the refresh.
    pub async fn refresh(&mut self) -> Result<usize> {
        let token = self.begin_refresh();
        let fetched = self.remote.fetch_messages().await;
        self.state = SyncState::Idle;
        match fetched {
            Ok(messages) => {
                let count = self.apply_refresh(token, messages);
                info!(count, "refreshed messages");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping previous messages");
                Err(e)
            }
        }
    }

    fn begin_refresh(&mut self) -> u64 {
        self.refresh_seq += 1;
        self.state = SyncState::Fetching;
        self.refresh_seq
    }

    fn apply_refresh(&mut self, token: u64, messages: Vec<Message>) -> usize {
        if token != self.refresh_seq {
            debug!(
                token,
                current = self.refresh_seq,
                "discarding stale refresh response"
            );
            return self.store.len();
        }
        self.store.replace_all(messages);
        self.store.len()
    }

    /// Submit a new message.
    ///
    /// No optimistic insert: id and timestamp are authoritative from the
    /// daemon, the local view catches up on the next refresh. Callers that
    /// keep a compose surface open must close it only after this resolves
    /// with `Ok`.
    pub async fn send(
        &mut self,
        recipient: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<()> {
        self.state = SyncState::Sending;
        let result = self.remote.send_message(recipient, body, parent_id).await;
        self.state = SyncState::Idle;
        result
    }

    /// Reply routes back to the parent's sender. Returns `Ok(false)` when
    /// the parent is not known locally, which is a lookup miss rather than
    /// an error.
    pub async fn send_reply(&mut self, parent_id: &str, body: &str) -> Result<bool> {
        let Some(parent) = self.store.get(parent_id) else {
            return Ok(false);
        };
        let recipient = parent.sender.clone();
        self.send(&recipient, body, Some(parent_id)).await?;
        Ok(true)
    }

    /// Install a new private key on the daemon, then re-seed the local
    /// address and refresh so the change is visible immediately.
    pub async fn set_key_and_refresh(&mut self, key: &str) -> Result<usize> {
        self.remote.set_key(key).await?;
        self.seed_identity().await;
        self.refresh().await
    }

    /// Swap the daemon base URL and refresh against the new host.
    pub async fn set_host_and_refresh(&mut self, host: &str) -> Result<usize> {
        self.remote.set_base_url(host);
        self.refresh().await
    }

    /// Unread messages straight from the daemon; not merged into the store.
    pub async fn fetch_unread(&self) -> Result<Vec<Message>> {
        self.remote.fetch_unread_messages().await
    }

    pub fn inbox(&self) -> Vec<&Message> {
        inbox_view(&self.store, &self.identity)
    }

    pub fn thread(&self, selected_id: &str) -> Option<Thread> {
        reconstruct(&self.store, &self.identity, selected_id)
    }
}
