//! The lobby config file reader.
//!
//! Format (spec §6, grounded on `original_source/server/main.c` `load_config`):
//! UTF-8 text, one `key = value` per line, `#` starts a line comment, blank
//! lines ignored, unknown keys ignored, a key appearing more than once keeps
//! the last occurrence. A key absent from the file keeps its compiled-in
//! default (see [`super::defaults`]) rather than failing the load — matching
//! the original C loader, which pre-fills every field with
//! `DEFAULT_*`/zero before scanning the file.

use std::fs;
use std::path::Path;

use super::types::Config;

/// Load a [`Config`] from a `key = value` file at `path`.
///
/// Returns an error only for I/O failures (file missing/unreadable) or
/// invalid UTF-8; a malformed individual line is skipped with a warning, not
/// a hard failure, matching the original's `strchr`-based tolerant parser.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
    Ok(parse(&text))
}

/// Parse config file contents into a [`Config`], falling back to defaults for
/// any key that is absent or fails to parse.
pub fn parse(text: &str) -> Config {
    let mut cfg = Config::default();

    for raw_line in text.lines() {
        let line = match raw_line.split_once('#') {
            Some((before, _)) => before,
            None => raw_line,
        };
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        apply_key(&mut cfg, key, value);
    }

    cfg
}

fn apply_key(cfg: &mut Config, key: &str, value: &str) {
    match key {
        "host_name" => cfg.host_name = value.to_string(),
        "lobby_port" => assign_u16(&mut cfg.lobby_port, value, key),
        "game_port_min" => assign_u16(&mut cfg.game_port_min, value, key),
        "game_port_max" => assign_u16(&mut cfg.game_port_max, value, key),
        "max_games" => assign_u32(&mut cfg.max_games, value, key),
        "max_players_default" => assign_u32(&mut cfg.max_players_default, value, key),
        "join_timeout_sec" => assign_u64(&mut cfg.join_timeout_sec, value, key),
        "drop_timeout_sec" => assign_u64(&mut cfg.drop_timeout_sec, value, key),
        "idle_timeout_sec" => assign_u64(&mut cfg.idle_timeout_sec, value, key),
        "udp_dup_enabled" => cfg.udp_dup_enabled = value == "1" || value.eq_ignore_ascii_case("true"),
        "udp_dup_delay_ms" => assign_u64(&mut cfg.udp_dup_delay_ms, value, key),
        _ => tracing::warn!(key, "unrecognized config key, ignoring"),
    }
}

fn assign_u16(field: &mut u16, value: &str, key: &str) {
    match value.parse() {
        Ok(v) => *field = v,
        Err(_) => tracing::warn!(key, value, "failed to parse config value, keeping default"),
    }
}

fn assign_u32(field: &mut u32, value: &str, key: &str) {
    match value.parse() {
        Ok(v) => *field = v,
        Err(_) => tracing::warn!(key, value, "failed to parse config value, keeping default"),
    }
}

fn assign_u64(field: &mut u64, value: &str, key: &str) {
    match value.parse() {
        Ok(v) => *field = v,
        Err(_) => tracing::warn!(key, value, "failed to parse config value, keeping default"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_ignores_comments() {
        let text = "\
            # lobby config\n\
            host_name = play.example.com\n\
            lobby_port = 7000\n\
            game_port_min = 9000  # inline comment\n\
            game_port_max = 9001\n\
            max_games = 4\n\
            udp_dup_enabled = 1\n\
            udp_dup_delay_ms = 20\n";
        let cfg = parse(text);
        assert_eq!(cfg.host_name, "play.example.com");
        assert_eq!(cfg.lobby_port, 7000);
        assert_eq!(cfg.game_port_min, 9000);
        assert_eq!(cfg.game_port_max, 9001);
        assert_eq!(cfg.max_games, 4);
        assert!(cfg.udp_dup_enabled);
        assert_eq!(cfg.udp_dup_delay_ms, 20);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let cfg = parse("host_name = h\n");
        let defaults = Config::default();
        assert_eq!(cfg.lobby_port, defaults.lobby_port);
        assert_eq!(cfg.max_games, defaults.max_games);
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let cfg = parse("this is not a kv line\nhost_name = ok\n");
        assert_eq!(cfg.host_name, "ok");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lobby.conf");
        std::fs::write(&path, "host_name = h\nlobby_port = 7001\n").unwrap();
        let cfg = load(&path).unwrap();
        assert_eq!(cfg.host_name, "h");
        assert_eq!(cfg.lobby_port, 7001);
    }

    #[test]
    fn load_missing_file_errors() {
        let result = load(Path::new("/no/such/lobby.conf"));
        assert!(result.is_err());
    }
}
