//! Compiled-in capacity constants.
//!
//! Named here instead of as inline literals throughout the directory modules,
//! matching `original_source/server/main.c`'s `*_LIMIT` `#define`s.

/// Maximum concurrent pending/active games (`MAX_GAMES_LIMIT`).
pub const MAX_GAMES_LIMIT: usize = 32;

/// Maximum players in a single game (`MAX_PLAYERS_LIMIT`).
pub const MAX_PLAYERS_LIMIT: usize = 16;

/// Maximum concurrently known clients (`MAX_CLIENTS_LIMIT`).
pub const MAX_CLIENTS_LIMIT: usize = 64;

/// Length in characters of a client or game id (`GAME_ID_LEN`).
pub const ID_LEN: usize = 8;

/// Length in characters of a per-membership join token (`TOKEN_LEN`).
pub const TOKEN_LEN: usize = 16;

/// Maximum length of a client name (`NAME_MAX`).
pub const NAME_MAX: usize = 8;

/// Maximum length of a game name (`GAME_NAME_MAX`).
pub const GAME_NAME_MAX: usize = 32;

/// Inactivity window after which a client is forgotten by the janitor.
pub const CLIENT_INACTIVITY_SEC: u64 = 3600;

/// Alphabet used to generate client/game ids and join tokens.
pub const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Capacity of a relay's UDP duplicate queue.
pub const DUP_QUEUE_CAPACITY: usize = 256;

/// Relay scheduler tick period in milliseconds (spec §5: 10-20ms).
pub const RELAY_TICK_MS: u64 = 15;

/// Diagnostics emission interval in milliseconds (spec §4.6).
pub const DIAG_INTERVAL_MS: u64 = 10_000;

/// Janitor sweep period in seconds (spec §4.7).
pub const JANITOR_INTERVAL_SEC: u64 = 1;
