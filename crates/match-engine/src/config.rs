//! Seats, player types and match configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::piece::{Catalog, WinRelation};

/// Default number of rounds per match.
pub const DEFAULT_ROUND_LIMIT: u32 = 3;

/// One of the two match positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Seat1,
    Seat2,
}

impl Seat {
    /// Progression order.
    pub const ALL: [Seat; 2] = [Seat::Seat1, Seat::Seat2];

    pub fn index(self) -> usize {
        match self {
            Seat::Seat1 => 0,
            Seat::Seat2 => 1,
        }
    }

    /// Seat from a 1-based player number, as the browser adapter sends it.
    pub fn from_number(number: u8) -> Option<Seat> {
        match number {
            1 => Some(Seat::Seat1),
            2 => Some(Seat::Seat2),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Who picks the pieces for a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    #[serde(alias = "H")]
    Human,
    #[serde(alias = "C")]
    Computer,
}

/// Everything a match is created from. Reused unchanged across resets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Player type per seat, Seat1 first.
    pub players: [PlayerType; 2],
    pub catalog: Catalog,
    pub rules: WinRelation,
    pub round_limit: u32,
    /// When both seats are Computer, play every remaining round in one
    /// progression step instead of one round per step.
    pub auto_advance: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::classic([PlayerType::Human, PlayerType::Computer])
    }
}

impl MatchConfig {
    /// Rock, paper, scissors with the standard cycle.
    pub fn classic(players: [PlayerType; 2]) -> Self {
        let catalog = Catalog::new()
            .with("rock", "http://www.dododex.com/media/item/Stone.png")
            .with("paper", "http://eliteownage.com/paper.jpg")
            .with("scissors", "http://findicons.com/files/icons/196/office_tools/128/scissors.png");
        let rules = WinRelation::new()
            .with("rock", ["scissors"])
            .with("paper", ["rock"])
            .with("scissors", ["paper"]);

        Self {
            players,
            catalog,
            rules,
            round_limit: DEFAULT_ROUND_LIMIT,
            auto_advance: false,
        }
    }

    /// Five-piece variant where every piece beats two others.
    pub fn lizard_spock(players: [PlayerType; 2]) -> Self {
        let catalog = Catalog::new()
            .with("rock", "rock.png")
            .with("paper", "paper.png")
            .with("scissors", "scissors.png")
            .with("lizard", "lizard.png")
            .with("spock", "spock.png");
        let rules = WinRelation::new()
            .with("rock", ["scissors", "lizard"])
            .with("paper", ["rock", "spock"])
            .with("scissors", ["paper", "lizard"])
            .with("lizard", ["paper", "spock"])
            .with("spock", ["rock", "scissors"]);

        Self {
            players,
            catalog,
            rules,
            round_limit: DEFAULT_ROUND_LIMIT,
            auto_advance: false,
        }
    }

    pub fn with_round_limit(mut self, round_limit: u32) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Parse and validate a JSON configuration. Omitted fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Only string keys and plain values: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn player(&self, seat: Seat) -> PlayerType {
        self.players[seat.index()]
    }

    pub fn is_full_auto(&self) -> bool {
        self.players.iter().all(|p| *p == PlayerType::Computer)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.catalog.pieces().any(|p| p.as_str().is_empty()) {
            return Err(ConfigError::EmptyPiece);
        }
        if self.round_limit == 0 {
            return Err(ConfigError::ZeroRoundLimit);
        }
        self.rules.validate(&self.catalog)
    }
}
