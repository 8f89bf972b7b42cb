//! Error types for configuration and match interaction

use crate::config::Seat;
use crate::piece::Piece;

/// A configuration that cannot be played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Catalog has no pieces.
    EmptyCatalog,
    /// A piece with an empty name.
    EmptyPiece,
    /// A catalog piece has no entry in the win relation.
    MissingRule(Piece),
    /// The win relation names a piece that is not in the catalog.
    UnknownPiece(Piece),
    /// A piece appears in its own win-set.
    Reflexive(Piece),
    /// Two distinct pieces beat each other.
    MutualWin(Piece, Piece),
    /// Neither of two distinct pieces beats the other.
    Undecided(Piece, Piece),
    /// Round limit must be at least 1.
    ZeroRoundLimit,
    /// Configuration text could not be parsed.
    Parse(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyCatalog => write!(f, "piece catalog is empty"),
            ConfigError::EmptyPiece => write!(f, "piece names must not be empty"),
            ConfigError::MissingRule(piece) =>
                write!(f, "piece '{}' has no entry in the win relation", piece),
            ConfigError::UnknownPiece(piece) =>
                write!(f, "win relation names '{}', which is not in the catalog", piece),
            ConfigError::Reflexive(piece) => write!(f, "piece '{}' beats itself", piece),
            ConfigError::MutualWin(a, b) =>
                write!(f, "'{}' and '{}' beat each other", a, b),
            ConfigError::Undecided(a, b) =>
                write!(f, "neither '{}' nor '{}' beats the other", a, b),
            ConfigError::ZeroRoundLimit => write!(f, "round limit must be at least 1"),
            ConfigError::Parse(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A rejected call into the match engine. The engine state is untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// Piece is not in the catalog.
    InvalidMove(Piece),
    /// Seat already committed this round.
    DuplicateCommit(Seat),
    /// The round limit was reached; reset to play again.
    MatchAlreadyFinished,
    /// Construction was refused.
    InvalidConfiguration(ConfigError),
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::InvalidMove(piece) => write!(f, "'{}' is not a valid move", piece),
            MatchError::DuplicateCommit(seat) =>
                write!(f, "{} has already committed this round", seat),
            MatchError::MatchAlreadyFinished => write!(f, "match is already finished"),
            MatchError::InvalidConfiguration(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::InvalidConfiguration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for MatchError {
    fn from(e: ConfigError) -> Self {
        MatchError::InvalidConfiguration(e)
    }
}
