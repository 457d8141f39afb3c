//! The lobby's raw-HTTP accept loop (spec §4.5a, §6).
//!
//! Grounded on `original_source/server/main.c`'s `client_thread`: one
//! request per connection, request-line + headers read then discarded,
//! non-GET methods closed without a response, everything else dispatched
//! through [`crate::lobby_handler::handle`] and rendered via
//! [`crate::http::render_response`].

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::coordinator::LobbyCoordinator;
use crate::http;

/// Bind the lobby's listening port and accept connections until the process
/// is killed (spec §6 "CLI": exit code 0 never).
pub async fn run(coordinator: Arc<LobbyCoordinator>, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "lobby listening");

    loop {
        let (stream, addr) = listener.accept().await?;
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(&coordinator, stream).await {
                tracing::debug!(%addr, %err, "lobby connection closed with error");
            }
        });
    }
}

async fn handle_connection(coordinator: &Arc<LobbyCoordinator>, stream: TcpStream) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await? == 0 {
        return Ok(());
    }

    // Drain and discard headers up to the blank line; this server has no use
    // for them beyond the request line.
    loop {
        let mut header_line = String::new();
        if reader.read_line(&mut header_line).await? == 0 {
            return Ok(());
        }
        if header_line == "\r\n" || header_line == "\n" {
            break;
        }
    }

    let Some(req) = http::parse_request_line(&request_line) else {
        return Ok(());
    };
    if req.method != "GET" {
        return Ok(());
    }

    let body = crate::lobby_handler::handle(coordinator, &req).await;
    let response = http::render_response(&body.to_string());

    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}
