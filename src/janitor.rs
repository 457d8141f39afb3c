//! The periodic sweep that expires stale pending games and forgotten
//! clients (spec §4.7).

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

use crate::config::limits::{CLIENT_INACTIVITY_SEC, JANITOR_INTERVAL_SEC};
use crate::coordinator::LobbyCoordinator;

/// Run once per second for the life of the process (spec §4.7 "Runs once
/// per second").
pub async fn run(coordinator: Arc<LobbyCoordinator>) {
    let inactivity_window = Duration::from_secs(CLIENT_INACTIVITY_SEC);
    let join_timeout = Duration::from_secs(coordinator.config().join_timeout_sec);
    let mut tick = interval(Duration::from_secs(JANITOR_INTERVAL_SEC));

    loop {
        tick.tick().await;
        coordinator.expire(inactivity_window, join_timeout).await;
    }
}
