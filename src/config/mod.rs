//! Server configuration: the `key = value` config file format from spec §6.
//!
//! # Module structure
//!
//! - [`types`]: the root [`Config`] struct
//! - [`defaults`]: default value functions, used both by `Config::default()`
//!   and by the loader when a key is absent from the file
//! - [`limits`]: compiled-in capacity constants from `original_source`
//! - [`loader`]: the config file reader (an external-collaborator contract per
//!   spec §1 — a flat `key = value`, `#`-comment line format, not TOML/JSON)
//! - [`validation`]: range/shape checks run once at startup

pub mod defaults;
pub mod limits;
pub mod loader;
pub mod types;
pub mod validation;

pub use loader::load;
pub use types::{Config, Transport};
pub use validation::{validate, ConfigError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_self_consistent() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.host_name, deserialized.host_name);
        assert_eq!(config.lobby_port, deserialized.lobby_port);
        assert_eq!(config.game_port_min, deserialized.game_port_min);
    }
}
