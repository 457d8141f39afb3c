//! Wire-visible error kinds and internal error plumbing.
//!
//! [`ErrorKind`] is the closed set of strings the lobby protocol puts in a
//! response's `"error"` field (spec §7). Anything that never reaches a client
//! — bind failures, malformed config, a relay's socket dying — is an
//! [`anyhow::Error`], logged and never serialized.

use thiserror::Error;

/// One of the wire-visible lobby error kinds (spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid_name")]
    InvalidName,
    #[error("server_full")]
    ServerFull,
    #[error("bad_client")]
    BadClient,
    #[error("max_games")]
    MaxGames,
    #[error("not_found")]
    NotFound,
    #[error("full")]
    Full,
    #[error("unknown")]
    Unknown,
    #[error("no_ports")]
    NoPorts,
}

impl ErrorKind {
    /// The exact lowercase token placed in the JSON `error` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidName => "invalid_name",
            ErrorKind::ServerFull => "server_full",
            ErrorKind::BadClient => "bad_client",
            ErrorKind::MaxGames => "max_games",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Full => "full",
            ErrorKind::Unknown => "unknown",
            ErrorKind::NoPorts => "no_ports",
        }
    }
}
