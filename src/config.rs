use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Player, DEFAULT_GRID_SIZE};

/// Largest grid the configuration accepts.
pub const MAX_GRID_SIZE: usize = 32;

/// Who moves first in a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    #[default]
    Random,
    Human,
    Computer,
}

impl FirstPlayer {
    /// Pick the starting player, flipping a coin for `Random`.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> Player {
        match self {
            FirstPlayer::Human => Player::Human,
            FirstPlayer::Computer => Player::Computer,
            FirstPlayer::Random => {
                if rng.random_bool(0.5) {
                    Player::Human
                } else {
                    Player::Computer
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub first_player: FirstPlayer,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: DEFAULT_GRID_SIZE,
            first_player: FirstPlayer::Random,
        }
    }
}

/// Tick rate and the delays the driver counts down in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Computer "thinking" time before its claim lands.
    pub opponent_delay_secs: f64,
    /// How long the result stays up after the last cell is taken.
    pub end_delay_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            tick_rate: 30,
            opponent_delay_secs: 0.5,
            end_delay_secs: 2.0,
        }
    }
}

impl TimingConfig {
    pub fn opponent_delay_ticks(&self) -> u32 {
        Self::to_ticks(self.opponent_delay_secs, self.tick_rate)
    }

    pub fn end_delay_ticks(&self) -> u32 {
        Self::to_ticks(self.end_delay_secs, self.tick_rate)
    }

    fn to_ticks(secs: f64, rate: u32) -> u32 {
        (secs * f64::from(rate)).ceil() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    /// Base seed; games draw OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 100,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub timing: TimingConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.grid_size == 0 || self.game.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::Validation(format!(
                "game.grid_size must be in [1, {MAX_GRID_SIZE}]"
            )));
        }
        if self.timing.tick_rate == 0 {
            return Err(ConfigError::Validation(
                "timing.tick_rate must be > 0".into(),
            ));
        }
        if !self.timing.opponent_delay_secs.is_finite() || self.timing.opponent_delay_secs < 0.0 {
            return Err(ConfigError::Validation(
                "timing.opponent_delay_secs must be >= 0".into(),
            ));
        }
        if !self.timing.end_delay_secs.is_finite() || self.timing.end_delay_secs < 0.0 {
            return Err(ConfigError::Validation(
                "timing.end_delay_secs must be >= 0".into(),
            ));
        }
        if self.simulation.games == 0 {
            return Err(ConfigError::Validation(
                "simulation.games must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.grid_size, 6);
    }

    #[test]
    fn test_default_delays_in_ticks() {
        let timing = TimingConfig::default();
        assert_eq!(timing.opponent_delay_ticks(), 15);
        assert_eq!(timing.end_delay_ticks(), 60);
    }

    #[test]
    fn test_partial_delay_rounds_up() {
        let timing = TimingConfig {
            tick_rate: 30,
            opponent_delay_secs: 0.01,
            end_delay_secs: 0.0,
        };
        assert_eq!(timing.opponent_delay_ticks(), 1);
        assert_eq!(timing.end_delay_ticks(), 0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
grid_size = 3
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.grid_size, 3);
        assert_eq!(config.game.first_player, FirstPlayer::Random);
        assert_eq!(config.timing.tick_rate, 30);
        assert_eq!(config.simulation.games, 100);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_first_player_parses_lowercase() {
        let config: AppConfig = toml::from_str("[game]\nfirst_player = \"computer\"\n").unwrap();
        assert_eq!(config.game.first_player, FirstPlayer::Computer);
    }

    #[test]
    fn test_first_player_resolve() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(FirstPlayer::Human.resolve(&mut rng), Player::Human);
        assert_eq!(FirstPlayer::Computer.resolve(&mut rng), Player::Computer);

        let picks: Vec<_> = (0..64).map(|_| FirstPlayer::Random.resolve(&mut rng)).collect();
        assert!(picks.contains(&Player::Human));
        assert!(picks.contains(&Player::Computer));
    }

    #[test]
    fn test_validation_rejects_zero_grid() {
        let mut config = AppConfig::default();
        config.game.grid_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_huge_grid() {
        let mut config = AppConfig::default();
        config.game.grid_size = MAX_GRID_SIZE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_tick_rate() {
        let mut config = AppConfig::default();
        config.timing.tick_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_delay() {
        let mut config = AppConfig::default();
        config.timing.opponent_delay_secs = -0.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.timing.end_delay_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.simulation.games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[simulation]
games = 500
seed = 42
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.simulation.games, 500);
        assert_eq!(config.simulation.seed, Some(42));
        // Others are defaults
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\ngrid_size = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
