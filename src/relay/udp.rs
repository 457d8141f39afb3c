//! UDP-ring relay loop.
//!
//! The original C source is TCP-only; UDP mode is a spec-only addition
//! (spec §4.6, §6 "Game relay wire protocol"). The datagram recv/send shape
//! is grounded on `other_examples/c8d28d9f_jakobhuuse-Netcode-in-Rust__server-src-network.rs.rs`'s
//! `tokio::net::UdpSocket` + `tokio::select!` receiver loop; the duplicate
//! queue and ring forwarding are this spec's own (§4.6, §9).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::time::interval;

use crate::config::limits::RELAY_TICK_MS;
use crate::coordinator::LobbyCoordinator;
use crate::relay::diagnostics::Diagnostics;
use crate::relay::dup_queue::DupQueue;
use crate::relay::sequence::SequenceTracker;

const REGISTER_PREFIX: &[u8] = b"REGISTER";
const RECV_BUF_LEN: usize = 2048;

struct Slot {
    addr: Option<SocketAddr>,
    seq: SequenceTracker,
}

pub async fn run(
    coordinator: Arc<LobbyCoordinator>,
    game_id: String,
    port: u16,
    max_players: u32,
    drop_timeout: Duration,
    idle_timeout: Duration,
    dup_enabled: bool,
    dup_delay: Duration,
) {
    let max_players = max_players as usize;

    let socket = match UdpSocket::bind(("0.0.0.0", port)).await {
        Ok(s) => s,
        Err(err) => {
            tracing::warn!(game_id, port, %err, "relay udp bind failed");
            coordinator.end_game(&game_id, port).await;
            return;
        }
    };

    let mut slots: Vec<Slot> = (0..max_players)
        .map(|_| Slot { addr: None, seq: SequenceTracker::new() })
        .collect();
    let mut ready = false;
    let mut drop_deadline = Some(Instant::now() + drop_timeout);
    let mut last_activity = Instant::now();
    let mut diag = Diagnostics::default();
    let mut dup_queue = DupQueue::new();
    let mut tick = interval(Duration::from_millis(RELAY_TICK_MS));
    let mut last_diag = Instant::now();
    let mut buf = [0u8; RECV_BUF_LEN];

    loop {
        tokio::select! {
            recvd = socket.recv_from(&mut buf) => {
                let Ok((n, src)) = recvd else { continue };
                last_activity = Instant::now();
                let payload = &buf[..n];

                if let Some(i) = slots.iter().position(|s| s.addr == Some(src)) {
                    handle_payload(&socket, &mut slots, i, payload, &mut diag, &mut dup_queue, dup_enabled, dup_delay).await;
                    continue;
                }

                if is_register(payload) {
                    diag.register += 1;
                    if let Some(slot) = slots.iter_mut().find(|s| s.addr.is_none()) {
                        slot.addr = Some(src);
                        ready = slots.iter().all(|s| s.addr.is_some());
                        if ready {
                            drop_deadline = None;
                        }
                    }
                } else {
                    diag.unknown += 1;
                }
            }
            _ = tick.tick() => {
                let now = Instant::now();

                if let Some(deadline) = drop_deadline {
                    if now >= deadline {
                        tracing::info!(game_id, "relay ended: drop timeout");
                        break;
                    }
                }
                if now.saturating_duration_since(last_activity) > idle_timeout {
                    tracing::info!(game_id, "relay ended: idle timeout");
                    break;
                }

                for entry in dup_queue.drain_due(now) {
                    if socket.send_to(&entry.payload, entry.dest).await.is_ok() {
                        diag.dup_tx += 1;
                    } else {
                        diag.drop += 1;
                    }
                }

                if now.saturating_duration_since(last_diag) >= Duration::from_millis(crate::config::limits::DIAG_INTERVAL_MS) {
                    diag.log(&game_id);
                    last_diag = now;
                }
            }
        }
    }

    diag.log(&game_id);
    coordinator.end_game(&game_id, port).await;
}

fn is_register(payload: &[u8]) -> bool {
    payload.starts_with(REGISTER_PREFIX)
        || (payload.len() >= 2 + REGISTER_PREFIX.len() && payload[2..].starts_with(REGISTER_PREFIX))
}

/// Track sequence stats, forward to `(i+1) mod N`, and enqueue a delayed
/// duplicate when enabled (spec §4.6 "Forwarding rule", "UDP duplicate
/// emission"). Forwarding only happens once every slot is connected.
async fn handle_payload(
    socket: &UdpSocket,
    slots: &mut [Slot],
    i: usize,
    payload: &[u8],
    diag: &mut Diagnostics,
    dup_queue: &mut DupQueue,
    dup_enabled: bool,
    dup_delay: Duration,
) {
    diag.rx += 1;
    slots[i].seq.observe(payload);
    diag.seq = merge_seq_stats(slots);

    if !slots.iter().all(|s| s.addr.is_some()) {
        return;
    }

    let next = (i + 1) % slots.len();
    let Some(dest) = slots[next].addr else { return };

    if socket.send_to(payload, dest).await.is_ok() {
        diag.tx += 1;
        if dup_enabled {
            dup_queue.push(dest, payload.to_vec(), Instant::now() + dup_delay);
        }
    } else {
        diag.drop += 1;
    }
}

fn merge_seq_stats(slots: &[Slot]) -> crate::relay::sequence::SequenceStats {
    let mut merged = crate::relay::sequence::SequenceStats::default();
    for slot in slots {
        merged.seq_init += slot.seq.stats.seq_init;
        merged.in_order += slot.seq.stats.in_order;
        merged.ahead += slot.seq.stats.ahead;
        merged.behind += slot.seq.stats.behind;
        merged.duplicate += slot.seq.stats.duplicate;
        merged.short += slot.seq.stats.short;
        merged.total_gap += slot.seq.stats.total_gap;
        merged.max_gap = merged.max_gap.max(slot.seq.stats.max_gap);
    }
    merged
}
