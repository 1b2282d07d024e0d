//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use game_core::GameConfig;
use runtime::RuntimeConfig;

/// Settings for one client run.
///
/// Every field has a default; environment variables only override.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Game seed. A clock-derived seed is used when unset.
    pub seed: Option<u64>,
    /// Directory holding optional `config.toml` and `items.ron` overrides.
    pub data_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Overrides the message log length from the game configuration.
    pub message_capacity: Option<usize>,
    pub event_buffer: usize,
    pub command_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            session_id: None,
            log_dir: None,
            message_capacity: None,
            event_buffer: 100,
            command_buffer: 32,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - Game seed (default: derived from the clock)
    /// - `DUNGEON_DATA_DIR` - Content directory (default: platform data dir)
    /// - `DUNGEON_SESSION_ID` - Session name used for the log directory
    /// - `DUNGEON_LOG_DIR` - Log root (default: `<data dir>/logs`)
    /// - `DUNGEON_MESSAGE_CAPACITY` - Visible log lines (default: from `config.toml`)
    /// - `DUNGEON_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `DUNGEON_COMMAND_BUFFER` - Runtime command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.seed = read_var(&lookup, "DUNGEON_SEED");
        config.data_dir = lookup("DUNGEON_DATA_DIR").map(PathBuf::from);
        config.session_id = lookup("DUNGEON_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.log_dir = lookup("DUNGEON_LOG_DIR").map(PathBuf::from);
        config.message_capacity =
            read_var::<usize, _>(&lookup, "DUNGEON_MESSAGE_CAPACITY").map(|capacity| capacity.max(1));
        if let Some(capacity) = read_var::<usize, _>(&lookup, "DUNGEON_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_var::<usize, _>(&lookup, "DUNGEON_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }

        config
    }

    /// Content directory, falling back to the platform data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(platform_data_dir)
    }

    /// Log root, falling back to `logs/` under the platform data directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| platform_data_dir().join("logs"))
    }

    pub fn runtime_config(&self, game_config: GameConfig, game_seed: u64) -> RuntimeConfig {
        RuntimeConfig {
            game_config,
            game_seed,
            event_buffer_size: self.event_buffer,
            command_buffer_size: self.command_buffer,
        }
    }
}

/// Platform data directory for the game, e.g. `~/.local/share/dungeon` on Linux.
pub fn platform_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./dungeon_data"))
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = from_pairs(&[]);
        assert_eq!(config.seed, None);
        assert_eq!(config.event_buffer, 100);
        assert_eq!(config.command_buffer, 32);
        assert!(config.message_capacity.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = from_pairs(&[
            ("DUNGEON_SEED", "42"),
            ("DUNGEON_DATA_DIR", "/srv/dungeon"),
            ("DUNGEON_SESSION_ID", "run-1"),
            ("DUNGEON_MESSAGE_CAPACITY", "10"),
            ("DUNGEON_COMMAND_BUFFER", "0"),
        ]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.data_dir(), PathBuf::from("/srv/dungeon"));
        assert_eq!(config.session_id.as_deref(), Some("run-1"));
        assert_eq!(config.message_capacity, Some(10));
        assert_eq!(config.command_buffer, 1);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = from_pairs(&[("DUNGEON_SEED", "abc"), ("DUNGEON_EVENT_BUFFER", "-3")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.event_buffer, 100);
    }

    #[test]
    fn runtime_config_carries_buffers() {
        let config = from_pairs(&[("DUNGEON_EVENT_BUFFER", "7")]);
        let runtime = config.runtime_config(GameConfig::default(), 9);
        assert_eq!(runtime.event_buffer_size, 7);
        assert_eq!(runtime.game_seed, 9);
    }
}
