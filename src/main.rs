#![cfg_attr(not(test), deny(clippy::panic))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lobby_relay_server::coordinator::LobbyCoordinator;
use lobby_relay_server::{config, janitor, logging, server};

/// Lobby-and-relay server for an 8-bit networked multiplayer game.
#[derive(Parser, Debug)]
#[command(name = "lobby-relay-server")]
#[command(about = "Lobby directory, port allocator, and per-game packet relay")]
#[command(version)]
struct Cli {
    /// Path to the config file.
    config_path: PathBuf,

    /// Validate the config file and exit without starting the server.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cfg = match config::load(&cli.config_path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = config::validate(&cfg) {
        eprintln!("invalid config: {err}");
        std::process::exit(1);
    }

    if cli.print_config {
        match serde_json::to_string_pretty(&cfg) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize config: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.validate_config {
        println!("Configuration validation passed");
        return;
    }

    logging::init();

    let lobby_port = cfg.lobby_port;
    let coordinator = LobbyCoordinator::new(Arc::new(cfg));

    tokio::spawn(janitor::run(coordinator.clone()));

    if let Err(err) = server::run(coordinator, lobby_port).await {
        tracing::error!(%err, "lobby server exited");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod cli_tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn requires_a_config_path() {
        assert!(Cli::try_parse_from(["lobby-relay-server"]).is_err());
    }

    #[test]
    fn accepts_a_bare_config_path() {
        let cli = Cli::try_parse_from(["lobby-relay-server", "server.conf"]).unwrap();
        assert_eq!(cli.config_path.to_str(), Some("server.conf"));
        assert!(!cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn validate_config_and_print_config_conflict() {
        let result = Cli::try_parse_from([
            "lobby-relay-server",
            "server.conf",
            "--validate-config",
            "--print-config",
        ]);
        assert!(result.is_err());
    }
}
