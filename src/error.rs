use std::path::PathBuf;

use crate::game::EdgeId;

/// Errors raised by board queries and edge claims.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfRange { row: usize, col: usize, size: usize },

    #[error("edge {0} does not exist on this board")]
    UnknownEdge(EdgeId),

    #[error("edge {0} is already claimed")]
    AlreadyClaimed(EdgeId),
}

/// Errors raised when applying a claim to a running game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("game is over, start a new game")]
    GameOver,
}

/// Errors raised by move-selection policies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("no unclaimed edges remain on the board")]
    NoMovesAvailable,
}

/// Errors raised while driving a game between players.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("game should be over but has no outcome")]
    MissingOutcome,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = BoardError::OutOfRange {
            row: 3,
            col: 0,
            size: 3,
        };
        assert_eq!(err.to_string(), "cell (3, 0) is outside the 3x3 grid");
    }

    #[test]
    fn test_already_claimed_display() {
        let err = BoardError::AlreadyClaimed(EdgeId::new(7));
        assert_eq!(err.to_string(), "edge #7 is already claimed");
    }

    #[test]
    fn test_game_error_wraps_board_error() {
        let err: GameError = BoardError::UnknownEdge(EdgeId::new(99)).into();
        assert_eq!(err.to_string(), "edge #99 does not exist on this board");
    }

    #[test]
    fn test_session_error_from_policy() {
        let err: SessionError = PolicyError::NoMovesAvailable.into();
        assert_eq!(err.to_string(), "no unclaimed edges remain on the board");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.grid_size must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.grid_size must be >= 1"
        );
    }
}
