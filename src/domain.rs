//! Core domain types: [`Client`], [`Game`], and their membership records
//! (spec §3 "Client"/"Game").

use std::time::Instant;

use crate::config::Transport;

/// Opaque 8-char client/game id, sampled from `[0-9A-Z]` (spec §3).
pub type Id = String;

/// A client's pending relay start notification (spec §3 "pending_start",
/// written by [`crate::coordinator::LobbyCoordinator::activate`], consumed
/// by `/wait`).
#[derive(Debug, Clone)]
pub struct PendingStart {
    pub host: String,
    pub port: u16,
    pub transport: Transport,
}

/// A known client (spec §3 "Client").
#[derive(Debug, Clone)]
pub struct Client {
    pub id: Id,
    pub name: String,
    pub last_seen: Instant,
    pub pending_start: Option<PendingStart>,
}

/// One membership entry inside a [`Game`] (spec §3 "Game" membership).
#[derive(Debug, Clone)]
pub struct Membership {
    pub client_id: Id,
    pub player_name: String,
    pub token: String,
}

/// A pending or active game (spec §3 "Game").
#[derive(Debug, Clone)]
pub struct Game {
    pub id: Id,
    pub name: String,
    pub max_players: u32,
    pub transport: Transport,
    pub created_at: Instant,
    pub members: Vec<Membership>,
    pub port: Option<u16>,
    pub active: bool,
    pub ended: bool,
}

impl Game {
    pub fn player_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() as u32 >= self.max_players
    }

    pub fn has_member(&self, client_id: &str) -> bool {
        self.members.iter().any(|m| m.client_id == client_id)
    }
}
