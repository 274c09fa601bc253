use std::time::Duration;

use tracing::debug;

use super::{MetaData, SendRequest, SetKeyRequest};
use crate::error::{Error, Result};
use crate::mail::Message;

/// Default daemon address; replaceable at runtime via `set-host`.
pub const DEFAULT_HOST: &str = "http://localhost:8088";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the local mail daemon.
///
/// The base URL is mutable and read per call, never captured at build time,
/// so a host change applies to every subsequent request.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/set-host` is a purely local effect: swap which base URL subsequent
    /// calls use.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    pub async fn fetch_messages(&self) -> Result<Vec<Message>> {
        self.get_json("/messages").await
    }

    pub async fn fetch_unread_messages(&self) -> Result<Vec<Message>> {
        self.get_json("/messages/unread").await
    }

    pub async fn fetch_meta(&self) -> Result<MetaData> {
        self.get_json("/meta").await
    }

    pub async fn send_message(
        &self,
        recipient: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<()> {
        let request = SendRequest {
            recipient,
            body,
            parent_id,
        };
        self.post_json("/send", &request).await
    }

    pub async fn set_key(&self, key: &str) -> Result<()> {
        self.post_json("/set-key", &SetKeyRequest { key }).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn post_json<B: serde::Serialize>(&self, endpoint: &str, body: &B) -> Result<()> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubled_slash() {
        let client = RemoteClient::new("http://localhost:8088/").unwrap();
        assert_eq!(client.url("/messages"), "http://localhost:8088/messages");
    }

    #[test]
    fn set_base_url_applies_to_later_urls() {
        let mut client = RemoteClient::new(DEFAULT_HOST).unwrap();
        client.set_base_url("https://p2p.example.com");
        assert_eq!(client.url("/meta"), "https://p2p.example.com/meta");
    }

    #[test]
    fn send_request_omits_absent_parent() {
        let json = serde_json::to_string(&SendRequest {
            recipient: "pk",
            body: "hi",
            parent_id: None,
        })
        .unwrap();
        assert!(!json.contains("parent_id"));

        let json = serde_json::to_string(&SendRequest {
            recipient: "pk",
            body: "hi",
            parent_id: Some("abc"),
        })
        .unwrap();
        assert!(json.contains(r#""parent_id":"abc""#));
    }
}
