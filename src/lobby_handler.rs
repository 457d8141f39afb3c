//! Request → directory-operation → response mapping for the lobby's closed
//! endpoint set (spec §4.5, §6).
//!
//! Grounded on `original_source/server/main.c`'s per-endpoint handlers (the
//! `/hello`, `/list`, `/create`, `/join`, `/leave`, `/wait`, `/ping` blocks
//! of its request dispatcher), reshaped around [`LobbyCoordinator`] instead
//! of direct global-array access.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::coordinator::{GameSummary, LobbyCoordinator, WaitOutcome};
use crate::config::Transport;
use crate::error::ErrorKind;
use crate::http::Request;

/// Dispatch one parsed request to its handler and render a JSON body.
/// Unknown paths return `{"ok":false,"error":"unknown"}` (spec §6).
pub async fn handle(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    match req.path.as_str() {
        "/hello" => hello(coordinator, req).await,
        "/list" => list(coordinator, req).await,
        "/create" => create(coordinator, req).await,
        "/join" => join(coordinator, req).await,
        "/leave" => leave(coordinator, req).await,
        "/wait" => wait(coordinator, req).await,
        "/ping" => ping(coordinator, req).await,
        _ => err(ErrorKind::Unknown),
    }
}

fn err(kind: ErrorKind) -> Value {
    json!({ "ok": false, "error": kind.as_str() })
}

fn param<'a>(req: &'a Request, key: &str) -> &'a str {
    req.query.get(key).map(String::as_str).unwrap_or("")
}

async fn hello(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let name = param(req, "name");
    match coordinator.hello(name).await {
        Ok((client_id, name)) => json!({ "ok": true, "client_id": client_id, "name": name }),
        Err(kind) => err(kind),
    }
}

async fn list(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let client_id = param(req, "client_id");
    match coordinator.list(client_id).await {
        Ok(games) => json!({ "ok": true, "games": games.iter().map(game_summary_json).collect::<Vec<_>>() }),
        Err(kind) => err(kind),
    }
}

fn game_summary_json(g: &GameSummary) -> Value {
    json!({
        "id": g.id,
        "name": g.name,
        "players": g.players,
        "max": g.max,
        "active": g.active,
        "transport": g.transport.as_str(),
    })
}

/// `/create`'s query parsing follows `original_source`'s silent-fallback
/// behavior exactly: an unparseable or absent `max_players` is passed
/// through as `None` so the coordinator substitutes `max_players_default`,
/// and an unrecognized `transport` defaults to `tcp` (a spec-only addition —
/// the original source is TCP-only and has no such parameter at all).
async fn create(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let client_id = param(req, "client_id");
    let name = param(req, "name");
    let max_players = req.query.get("max_players").and_then(|v| v.parse::<u32>().ok());
    let transport = req
        .query
        .get("transport")
        .and_then(|v| Transport::parse(v))
        .unwrap_or(Transport::Tcp);

    match coordinator.create(client_id, name, max_players, transport).await {
        Ok(summary) => json!({
            "ok": true,
            "game_id": summary.id,
            "status": "waiting",
            "transport": summary.transport.as_str(),
        }),
        Err(kind) => err(kind),
    }
}

async fn join(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let client_id = param(req, "client_id");
    let game_id = param(req, "game_id");
    match coordinator.join(client_id, game_id).await {
        Ok(()) => json!({ "ok": true, "status": "waiting" }),
        Err(kind) => err(kind),
    }
}

async fn leave(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let client_id = param(req, "client_id");
    let game_id = param(req, "game_id");
    match coordinator.leave(client_id, game_id).await {
        Ok(()) => json!({ "ok": true }),
        Err(kind) => err(kind),
    }
}

async fn wait(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let client_id = param(req, "client_id");
    let game_id = param(req, "game_id");
    match coordinator.wait(client_id, game_id).await {
        Ok(WaitOutcome::Start { host, port, transport, token }) => json!({
            "ok": true,
            "cmd": "start",
            "host": host,
            "port": port,
            "transport": transport.as_str(),
            "token": token,
        }),
        Ok(WaitOutcome::Waiting { players, max }) => json!({
            "ok": true,
            "status": "waiting",
            "players": players,
            "max": max,
        }),
        Err(kind) => err(kind),
    }
}

async fn ping(coordinator: &Arc<LobbyCoordinator>, req: &Request) -> Value {
    let client_id = param(req, "client_id");
    match coordinator.ping(client_id).await {
        Ok(()) => json!({ "ok": true }),
        Err(kind) => err(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashMap;

    fn coordinator() -> Arc<LobbyCoordinator> {
        LobbyCoordinator::new(Arc::new(Config::default()))
    }

    fn req(path: &str, pairs: &[(&str, &str)]) -> Request {
        let mut query = HashMap::new();
        for (k, v) in pairs {
            query.insert(k.to_string(), v.to_string());
        }
        Request { method: "GET".to_string(), path: path.to_string(), query }
    }

    #[tokio::test]
    async fn hello_then_list_never_bad_client() {
        let c = coordinator();
        let resp = handle(&c, &req("/hello", &[("name", "Alice")])).await;
        let client_id = resp["client_id"].as_str().unwrap().to_string();
        let list_resp = handle(&c, &req("/list", &[("client_id", &client_id)])).await;
        assert_eq!(list_resp["ok"], true);
    }

    #[tokio::test]
    async fn unknown_path_returns_unknown_error() {
        let c = coordinator();
        let resp = handle(&c, &req("/nope", &[])).await;
        assert_eq!(resp["ok"], false);
        assert_eq!(resp["error"], "unknown");
    }

    #[tokio::test]
    async fn create_with_missing_max_players_falls_back_to_default() {
        let c = coordinator();
        let hello_resp = handle(&c, &req("/hello", &[("name", "Alice")])).await;
        let client_id = hello_resp["client_id"].as_str().unwrap().to_string();
        let resp = handle(&c, &req("/create", &[("client_id", &client_id), ("name", "G")])).await;
        assert_eq!(resp["ok"], true);
        assert_eq!(resp["transport"], "tcp");
    }

    #[tokio::test]
    async fn leave_on_unjoined_game_is_ok_and_a_no_op() {
        let c = coordinator();
        let hello_resp = handle(&c, &req("/hello", &[("name", "Alice")])).await;
        let client_id = hello_resp["client_id"].as_str().unwrap().to_string();
        let resp = handle(&c, &req("/leave", &[("client_id", &client_id), ("game_id", "NOSUCH1")])).await;
        assert_eq!(resp["ok"], true);
    }
}
