//! TCP-ring relay loop.
//!
//! Grounded on `original_source/server/main.c`'s `game_thread`: bind/listen,
//! accept into the lowest free slot after a `REGISTER` handshake, then
//! forward each peer's bytes to `(i+1) mod max_players` once every slot is
//! connected. The C source's `select()` + fixed-array-of-fds loop becomes a
//! `tokio::select!` between `accept()` and a tick, with `try_read` draining
//! each connected peer per tick — see `SPEC_FULL.md` §4.6a.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{interval, timeout};

use crate::config::limits::RELAY_TICK_MS;
use crate::coordinator::LobbyCoordinator;
use crate::relay::diagnostics::Diagnostics;

const REGISTER_PREFIX: &[u8] = b"REGISTER";
const REGISTER_BUF_LEN: usize = 32;
const FORWARD_BUF_LEN: usize = 2048;

struct Slot {
    stream: Option<TcpStream>,
}

pub async fn run(
    coordinator: Arc<LobbyCoordinator>,
    game_id: String,
    port: u16,
    max_players: u32,
    drop_timeout: Duration,
    idle_timeout: Duration,
) {
    let max_players = max_players as usize;

    let listener = match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(l) => l,
        Err(err) => {
            tracing::warn!(game_id, port, %err, "relay tcp bind failed");
            coordinator.end_game(&game_id, port).await;
            return;
        }
    };

    let mut slots: Vec<Slot> = (0..max_players).map(|_| Slot { stream: None }).collect();
    let mut ready = false;
    let mut drop_deadline = Some(Instant::now() + drop_timeout);
    let mut last_activity = Instant::now();
    let mut diag = Diagnostics::default();
    let mut tick = interval(Duration::from_millis(RELAY_TICK_MS));
    let mut last_diag = Instant::now();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                if let Ok((mut stream, _addr)) = accepted {
                    last_activity = Instant::now();
                    let mut buf = [0u8; REGISTER_BUF_LEN];
                    let read = timeout(Duration::from_millis(RELAY_TICK_MS * 4), stream.read(&mut buf)).await;
                    match read {
                        Ok(Ok(n)) if n >= REGISTER_PREFIX.len() && buf[..n].starts_with(REGISTER_PREFIX) => {
                            diag.register += 1;
                            if let Some(slot) = slots.iter_mut().find(|s| s.stream.is_none()) {
                                slot.stream = Some(stream);
                                ready = slots.iter().all(|s| s.stream.is_some());
                                if ready {
                                    drop_deadline = None;
                                }
                            }
                            // no free slot: drop the connection by letting it go out of scope
                        }
                        _ => {} // not REGISTER, read error, or timed out; either way drop
                    }
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

                if ready {
                    poll_and_forward(&mut slots, &mut diag, &mut last_activity, &mut drop_deadline, drop_timeout);
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

/// Drain every connected slot once, forwarding complete reads to the next
/// ring member. A closed peer re-arms the drop-deadline (spec §4.6
/// "re-armed to now + drop_timeout_sec on any peer disconnect after
/// readiness") only when no deadline is currently set (spec §9 normalization).
fn poll_and_forward(
    slots: &mut [Slot],
    diag: &mut Diagnostics,
    last_activity: &mut Instant,
    drop_deadline: &mut Option<Instant>,
    drop_timeout: Duration,
) {
    let n = slots.len();
    let mut payloads: Vec<Option<Vec<u8>>> = vec![None; n];

    for (i, slot) in slots.iter_mut().enumerate() {
        let Some(stream) = slot.stream.as_ref() else { continue };
        let mut buf = [0u8; FORWARD_BUF_LEN];
        match stream.try_read(&mut buf) {
            Ok(0) => {
                slot.stream = None;
                if drop_deadline.is_none() {
                    *drop_deadline = Some(Instant::now() + drop_timeout);
                }
            }
            Ok(n_read) => {
                diag.rx += 1;
                *last_activity = Instant::now();
                payloads[i] = Some(buf[..n_read].to_vec());
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {}
            Err(_) => {
                slot.stream = None;
                if drop_deadline.is_none() {
                    *drop_deadline = Some(Instant::now() + drop_timeout);
                }
            }
        }
    }

    for (i, payload) in payloads.into_iter().enumerate() {
        let Some(payload) = payload else { continue };
        let next = (i + 1) % n;
        if let Some(stream) = slots[next].stream.as_ref() {
            match stream.try_write(&payload) {
                Ok(_) => diag.tx += 1,
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(_) => {
                    slots[next].stream = None;
                    if drop_deadline.is_none() {
                        *drop_deadline = Some(Instant::now() + drop_timeout);
                    }
                }
            }
        }
    }
}
