use serde::{Deserialize, Serialize};

pub use client::{RemoteClient, DEFAULT_HOST};

mod client;

/// `GET /meta` payload, used once at startup to seed the local identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(default)]
    pub public_key: String,
}

/// `POST /send` request body.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub recipient: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<&'a str>,
}

/// `POST /set-key` request body.
#[derive(Debug, Serialize)]
pub struct SetKeyRequest<'a> {
    pub key: &'a str,
}
