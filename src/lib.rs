#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools,
    clippy::too_many_arguments,
    clippy::too_many_lines,
    clippy::similar_names
)]

//! # Lobby Relay Server
//!
//! The server side of a lobby-and-relay service for an 8-bit networked
//! multiplayer game: clients discover each other through a small HTTP-style
//! lobby protocol, form fixed-size game cohorts, and are then stitched into
//! a ring of real-time packet relays that carries traffic until the game
//! ends.
//!
//! No persistence, no authentication, no horizontal scaling — a single
//! process with shared in-memory state behind one coordinator mutex.

/// Server configuration: file format, defaults, and validation.
pub mod config;

/// The lobby's mutual-exclusion domain around the three directories below.
pub mod coordinator;

/// Core domain types: clients, games, membership.
pub mod domain;

/// The three directories the coordinator owns: ports, clients, games.
pub mod directory;

/// Wire-visible error kinds.
pub mod error;

/// Minimal HTTP/1.0-style request line parsing and query decoding.
pub mod http;

/// Client/game id and join-token generation.
pub mod idgen;

/// The periodic sweep that expires stale pending games and clients.
pub mod janitor;

/// Request -> directory-operation -> response mapping for lobby endpoints.
pub mod lobby_handler;

/// Structured logging configuration.
pub mod logging;

/// Per-game packet relay: TCP/UDP ring forwarding, sequence tracking,
/// duplicate emission, timeouts.
pub mod relay;

/// The lobby's raw-HTTP accept loop.
pub mod server;
