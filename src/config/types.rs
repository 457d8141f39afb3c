//! Root configuration type: the flat field set from spec §3/§6.

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Transport used by a game's relay.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Tcp,
    Udp,
}

impl Transport {
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Udp => "udp",
        }
    }

    pub fn parse(s: &str) -> Option<Transport> {
        match s {
            "tcp" => Some(Transport::Tcp),
            "udp" => Some(Transport::Udp),
            _ => None,
        }
    }
}

/// Read-only server configuration, loaded once at startup (spec §3 "Config").
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_host_name")]
    pub host_name: String,
    #[serde(default = "default_lobby_port")]
    pub lobby_port: u16,
    #[serde(default = "default_game_port_min")]
    pub game_port_min: u16,
    #[serde(default = "default_game_port_max")]
    pub game_port_max: u16,
    #[serde(default = "default_max_games")]
    pub max_games: u32,
    #[serde(default = "default_max_players_default")]
    pub max_players_default: u32,
    #[serde(default = "default_join_timeout_sec")]
    pub join_timeout_sec: u64,
    #[serde(default = "default_drop_timeout_sec")]
    pub drop_timeout_sec: u64,
    #[serde(default = "default_idle_timeout_sec")]
    pub idle_timeout_sec: u64,
    #[serde(default = "default_udp_dup_enabled")]
    pub udp_dup_enabled: bool,
    #[serde(default = "default_udp_dup_delay_ms")]
    pub udp_dup_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_name: default_host_name(),
            lobby_port: default_lobby_port(),
            game_port_min: default_game_port_min(),
            game_port_max: default_game_port_max(),
            max_games: default_max_games(),
            max_players_default: default_max_players_default(),
            join_timeout_sec: default_join_timeout_sec(),
            drop_timeout_sec: default_drop_timeout_sec(),
            idle_timeout_sec: default_idle_timeout_sec(),
            udp_dup_enabled: default_udp_dup_enabled(),
            udp_dup_delay_ms: default_udp_dup_delay_ms(),
        }
    }
}
