//! Per-game relay task (spec §4.6): owns one listening socket and a fixed
//! peer slot array, forwarding payloads around a ring once every slot is
//! connected.
//!
//! Spawned inside [`crate::coordinator::LobbyCoordinator::activate_locked`],
//! may not re-enter the coordinator's mutex for anything other than its
//! terminal [`crate::coordinator::LobbyCoordinator::end_game`] call (spec
//! §4.4 step 5, §9 "Per-game task lifecycle").

pub mod diagnostics;
pub mod dup_queue;
pub mod sequence;
mod tcp;
mod udp;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Transport;
use crate::coordinator::LobbyCoordinator;

/// Spawn the relay task for a just-activated game. Bind/listen failures are
/// handled inside the per-transport loop, which calls `end_game` itself.
pub fn spawn(
    coordinator: Arc<LobbyCoordinator>,
    game_id: String,
    port: u16,
    max_players: u32,
    transport: Transport,
) {
    let config = coordinator.config();
    let drop_timeout = Duration::from_secs(config.drop_timeout_sec);
    let idle_timeout = Duration::from_secs(config.idle_timeout_sec);
    let dup_enabled = config.udp_dup_enabled;
    let dup_delay = Duration::from_millis(config.udp_dup_delay_ms);

    tokio::spawn(async move {
        match transport {
            Transport::Tcp => {
                tcp::run(coordinator, game_id, port, max_players, drop_timeout, idle_timeout).await;
            }
            Transport::Udp => {
                udp::run(
                    coordinator,
                    game_id,
                    port,
                    max_players,
                    drop_timeout,
                    idle_timeout,
                    dup_enabled,
                    dup_delay,
                )
                .await;
            }
        }
    });
}
