//! The lobby coordinator: one mutex around [`PortPool`], [`ClientDirectory`],
//! and [`GameDirectory`], hosting every lobby state transition (spec §4.4).
//!
//! Grounded on the teacher's `src/coordination/room_coordinator.rs`
//! (`RoomOperationCoordinatorTrait`/`InMemoryRoomOperationCoordinator`): a
//! single coordinator type exposing compound cross-directory operations so
//! callers can't violate the invariants by touching directories piecemeal.
//! The teacher's distributed lock (`DistributedLock::acquire`, for
//! multi-instance deployments) collapses to a single in-process
//! `tokio::sync::Mutex`, since spec §1/§5 rule out horizontal scaling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::{Config, Transport};
use crate::directory::game_directory::JoinOutcome;
use crate::directory::{ClientDirectory, GameDirectory, PortPool};
use crate::domain::PendingStart;
use crate::error::ErrorKind;
use crate::idgen::is_valid_client_name;
use crate::relay;

struct LobbyState {
    ports: PortPool,
    clients: ClientDirectory,
    games: GameDirectory,
}

/// A read-only snapshot of one game for `/list` and `/wait`.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub id: String,
    pub name: String,
    pub players: usize,
    pub max: u32,
    pub active: bool,
    pub transport: Transport,
}

/// The result of `/wait` (spec §6).
pub enum WaitOutcome {
    Start {
        host: String,
        port: u16,
        transport: Transport,
        token: String,
    },
    Waiting {
        players: usize,
        max: u32,
    },
}

pub struct LobbyCoordinator {
    config: Arc<Config>,
    state: Mutex<LobbyState>,
}

impl LobbyCoordinator {
    pub fn new(config: Arc<Config>) -> Arc<Self> {
        let state = LobbyState {
            ports: PortPool::new(config.game_port_min, config.game_port_max),
            clients: ClientDirectory::new(),
            games: GameDirectory::new(config.max_games as usize),
        };
        Arc::new(Self {
            config,
            state: Mutex::new(state),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `/hello`: validate `name`, create a client (spec §4.5).
    pub async fn hello(&self, name: &str) -> Result<(String, String), ErrorKind> {
        if !is_valid_client_name(name) {
            return Err(ErrorKind::InvalidName);
        }
        let mut state = self.state.lock().await;
        let client = state.clients.create(name).ok_or(ErrorKind::ServerFull)?;
        Ok((client.id.clone(), client.name.clone()))
    }

    /// Resolve `client_id` and refresh `last_seen`, matching every
    /// non-`/hello` endpoint's contract (spec §4.5).
    async fn touch(&self, client_id: &str) -> Result<(), ErrorKind> {
        let mut state = self.state.lock().await;
        if state.clients.find(client_id).is_none() {
            return Err(ErrorKind::BadClient);
        }
        state.clients.touch(client_id);
        Ok(())
    }

    /// `/list`: a consistent snapshot of every non-ended game.
    pub async fn list(&self, client_id: &str) -> Result<Vec<GameSummary>, ErrorKind> {
        self.touch(client_id).await?;
        let state = self.state.lock().await;
        Ok(state
            .games
            .list()
            .map(|g| GameSummary {
                id: g.id.clone(),
                name: g.name.clone(),
                players: g.player_count(),
                max: g.max_players,
                active: g.active,
                transport: g.transport,
            })
            .collect())
    }

    /// `/create`: create a pending game owned by `client_id`.
    ///
    /// Per `original_source`'s `/create` handler, an out-of-range or
    /// unparseable `max_players` silently falls back to
    /// `config.max_players_default` rather than erroring, an empty game name
    /// becomes `"Game"`, and an overlong name is truncated — `/create` never
    /// returns `invalid_name` (that error is reserved for `/hello`, per spec
    /// §8's boundary test naming it there specifically).
    ///
    /// A `max_players` of 1 activates immediately on creation, since the
    /// creator's own join already reaches capacity.
    pub async fn create(
        self: &Arc<Self>,
        client_id: &str,
        name: &str,
        max_players: Option<u32>,
        transport: Transport,
    ) -> Result<GameSummary, ErrorKind> {
        self.touch(client_id).await?;

        let max_players = match max_players {
            Some(n) if n > 0 && n as usize <= crate::config::limits::MAX_PLAYERS_LIMIT => n,
            _ => self.config.max_players_default,
        };
        let name: String = if name.is_empty() {
            "Game".to_string()
        } else {
            name.chars().take(crate::config::limits::GAME_NAME_MAX).collect()
        };

        let mut state = self.state.lock().await;
        let creator_name = state
            .clients
            .find(client_id)
            .map(|c| c.name.clone())
            .ok_or(ErrorKind::BadClient)?;
        let game = state
            .games
            .create(client_id, &creator_name, &name, max_players, transport)
            .ok_or(ErrorKind::MaxGames)?;
        let game_id = game.id.clone();
        let summary = GameSummary {
            id: game.id.clone(),
            name: game.name.clone(),
            players: game.player_count(),
            max: game.max_players,
            active: game.active,
            transport: game.transport,
        };

        if summary.players as u32 == summary.max {
            self.activate_locked(&mut state, &game_id).await;
        }

        Ok(summary)
    }

    /// `/join`: append a membership entry, activating the game under the same
    /// critical section if it just reached capacity (spec §4.4).
    pub async fn join(self: &Arc<Self>, client_id: &str, game_id: &str) -> Result<(), ErrorKind> {
        self.touch(client_id).await?;
        let mut state = self.state.lock().await;
        let player_name = state
            .clients
            .find(client_id)
            .map(|c| c.name.clone())
            .ok_or(ErrorKind::BadClient)?;

        {
            let game = state.games.find(game_id).ok_or(ErrorKind::NotFound)?;
            if game.active || game.ended {
                return Err(ErrorKind::NotFound);
            }
            if !game.has_member(client_id) && game.is_full() {
                return Err(ErrorKind::Full);
            }
        }

        let outcome = state
            .games
            .join(game_id, client_id, &player_name)
            .ok_or(ErrorKind::NotFound)?;

        if matches!(outcome, JoinOutcome::ReadyToActivate) {
            self.activate_locked(&mut state, game_id).await;
        }

        Ok(())
    }

    /// `/leave`: remove the client's membership. A no-op if the client was
    /// never a member or the game doesn't exist (spec §8 law).
    pub async fn leave(&self, client_id: &str, game_id: &str) -> Result<(), ErrorKind> {
        self.touch(client_id).await?;
        let mut state = self.state.lock().await;
        state.games.leave(game_id, client_id);
        Ok(())
    }

    /// `/wait`: report a pending-start notification if set, else membership
    /// progress (spec §6).
    ///
    /// Mirrors `original_source`'s evaluation order exactly: a non-empty
    /// `game_id` that doesn't resolve fails immediately with `not_found`,
    /// before `pending_start` is even checked. An empty `game_id` never
    /// fails — it just can't contribute live counts, so it falls back to
    /// `players: 0, max: 0` once `pending_start` is also absent.
    pub async fn wait(&self, client_id: &str, game_id: &str) -> Result<WaitOutcome, ErrorKind> {
        self.touch(client_id).await?;
        let mut state = self.state.lock().await;

        if !game_id.is_empty() && state.games.find(game_id).is_none() {
            return Err(ErrorKind::NotFound);
        }

        if let Some(client) = state.clients.find_mut(client_id) {
            if let Some(start) = client.pending_start.take() {
                // Per spec §9: tokens are generated per membership but the
                // start notification always carries an empty token — the
                // relay never validates it.
                return Ok(WaitOutcome::Start {
                    host: start.host,
                    port: start.port,
                    transport: start.transport,
                    token: String::new(),
                });
            }
        }

        match state.games.find(game_id) {
            Some(game) => Ok(WaitOutcome::Waiting {
                players: game.player_count(),
                max: game.max_players,
            }),
            None => Ok(WaitOutcome::Waiting { players: 0, max: 0 }),
        }
    }

    /// `/ping`: refresh `last_seen` only.
    pub async fn ping(&self, client_id: &str) -> Result<(), ErrorKind> {
        self.touch(client_id).await
    }

    /// The compound activation sequence (spec §4.4 `activate`), run while
    /// `state` is already locked by the caller.
    async fn activate_locked(self: &Arc<Self>, state: &mut LobbyState, game_id: &str) {
        let Some(port) = state.ports.acquire() else {
            tracing::warn!(game_id, "no available game ports, dropping game");
            state.games.drop_game(game_id);
            return;
        };

        let (member_ids, transport, max_players) = {
            let game = state.games.find_mut(game_id).expect("game exists");
            game.active = true;
            game.port = Some(port);
            (
                game.members.iter().map(|m| m.client_id.clone()).collect::<Vec<_>>(),
                game.transport,
                game.max_players,
            )
        };

        for client_id in &member_ids {
            if let Some(client) = state.clients.find_mut(client_id) {
                client.pending_start = Some(PendingStart {
                    host: self.config.host_name.clone(),
                    port,
                    transport,
                });
            }
            state.games.remove_client_everywhere_except(client_id, game_id);
        }

        tracing::info!(
            game_id,
            port,
            players = member_ids.len(),
            transport = transport.as_str(),
            "game activated"
        );

        relay::spawn(
            self.clone(),
            game_id.to_string(),
            port,
            max_players,
            transport,
        );
    }

    /// Called by a [`crate::relay`] task exactly once, when it terminates.
    /// The only path by which a port returns to the pool (spec §4.4
    /// `end_game`).
    pub async fn end_game(&self, game_id: &str, port: u16) {
        let mut state = self.state.lock().await;
        if let Some(game) = state.games.find_mut(game_id) {
            game.active = false;
            game.ended = true;
        }
        state.ports.release(port);
        tracing::info!(game_id, port, "game ended, port released");
    }

    /// The janitor sweep (spec §4.7): expire stale pending games and
    /// forgotten clients under one lock acquisition.
    pub async fn expire(&self, inactivity_window: Duration, join_timeout: Duration) {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.games.expire(now, join_timeout);
        state.clients.expire(now, inactivity_window);
    }
}
