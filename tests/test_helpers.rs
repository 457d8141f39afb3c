use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lobby_relay_server::config::Config;
use lobby_relay_server::coordinator::LobbyCoordinator;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

static NEXT_LOBBY_PORT: AtomicU16 = AtomicU16::new(17100);
static NEXT_GAME_PORT: AtomicU16 = AtomicU16::new(18100);

/// Reserve a lobby port and a disjoint game port range for one test, so
/// concurrently running tests never collide.
pub fn reserve_ports(game_range: u16) -> (u16, u16, u16) {
    let lobby = NEXT_LOBBY_PORT.fetch_add(1, Ordering::Relaxed);
    let game_min = NEXT_GAME_PORT.fetch_add(game_range + 1, Ordering::Relaxed);
    (lobby, game_min, game_min + game_range)
}

/// Start a lobby server with `cfg` on a background task and wait for its
/// listener to come up.
pub async fn start_lobby(cfg: Config) -> Arc<LobbyCoordinator> {
    let lobby_port = cfg.lobby_port;
    let coordinator = LobbyCoordinator::new(Arc::new(cfg));
    tokio::spawn(lobby_relay_server::janitor::run(coordinator.clone()));
    let server_coordinator = coordinator.clone();
    tokio::spawn(async move {
        let _ = lobby_relay_server::server::run(server_coordinator, lobby_port).await;
    });
    wait_for_port(lobby_port).await;
    coordinator
}

async fn wait_for_port(port: u16) {
    for _ in 0..100 {
        if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("lobby never started listening on port {port}");
}

/// Issue one `GET <path>?<query>` against the lobby and return the parsed
/// JSON body.
pub async fn lobby_get(port: u16, path: &str, query: &str) -> serde_json::Value {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    let target = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };
    stream
        .write_all(format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n").as_bytes())
        .await
        .unwrap();

    let mut response = Vec::new();
    loop {
        let mut buf = [0u8; 4096];
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => response.extend_from_slice(&buf[..n]),
        }
    }

    let text = String::from_utf8_lossy(&response);
    let body = text.split("\r\n\r\n").nth(1).unwrap_or("");
    serde_json::from_str(body).unwrap_or_else(|e| panic!("bad JSON body {body:?}: {e}"))
}
