use thiserror::Error;

/// Errors surfaced by the client.
///
/// Lookup misses (unknown message ids, dangling parent references) are not
/// errors; those are represented with `Option` at the call sites.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure talking to the daemon.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daemon answered with a non-success status.
    #[error("daemon returned status {0}")]
    Status(reqwest::StatusCode),

    /// Config file could not be read or written.
    #[error("config error: {0}")]
    Config(#[from] std::io::Error),

    /// Config file exists but does not parse.
    #[error("malformed config: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    /// Config could not be serialized back to disk.
    #[error("config serialization: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
