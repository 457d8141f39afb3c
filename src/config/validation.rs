//! Configuration validation (spec §3, `original_source` `validate_config`).

use thiserror::Error;

use super::limits::{MAX_GAMES_LIMIT, MAX_PLAYERS_LIMIT};
use super::types::Config;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("host_name must be non-empty and at most 255 characters")]
    HostName,
    #[error("lobby_port must be in 1..=65535")]
    LobbyPort,
    #[error("game_port_min/game_port_max must be in 1..=65535 with min <= max")]
    GamePortRange,
    #[error("max_games must be in 1..={MAX_GAMES_LIMIT}")]
    MaxGames,
    #[error("max_players_default must be in 1..={MAX_PLAYERS_LIMIT}")]
    MaxPlayersDefault,
    #[error("join_timeout_sec must be > 0")]
    JoinTimeout,
    #[error("drop_timeout_sec must be > 0")]
    DropTimeout,
    #[error("idle_timeout_sec must be > 0")]
    IdleTimeout,
    #[error("udp_dup_delay_ms must be in 0..=1000")]
    UdpDupDelay,
}

/// Validate a loaded [`Config`] against spec §3's field bounds.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.host_name.is_empty() || cfg.host_name.len() > 255 {
        return Err(ConfigError::HostName);
    }
    if cfg.lobby_port == 0 {
        return Err(ConfigError::LobbyPort);
    }
    if cfg.game_port_min == 0 || cfg.game_port_max == 0 || cfg.game_port_min > cfg.game_port_max {
        return Err(ConfigError::GamePortRange);
    }
    if cfg.max_games == 0 || cfg.max_games as usize > MAX_GAMES_LIMIT {
        return Err(ConfigError::MaxGames);
    }
    if cfg.max_players_default == 0 || cfg.max_players_default as usize > MAX_PLAYERS_LIMIT {
        return Err(ConfigError::MaxPlayersDefault);
    }
    if cfg.join_timeout_sec == 0 {
        return Err(ConfigError::JoinTimeout);
    }
    if cfg.drop_timeout_sec == 0 {
        return Err(ConfigError::DropTimeout);
    }
    if cfg.idle_timeout_sec == 0 {
        return Err(ConfigError::IdleTimeout);
    }
    if cfg.udp_dup_delay_ms > 1000 {
        return Err(ConfigError::UdpDupDelay);
    }
    Ok(())
}
