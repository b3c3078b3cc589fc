//! Engine configuration: difficulty, play style and time budget

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::board::Stone;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}` (expected beginner, easy, medium, hard or expert)")]
    UnknownDifficulty(String),
    #[error("unknown play style `{0}` (expected balanced, aggressive, defensive or positional)")]
    UnknownStyle(String),
    #[error("unknown player `{0}` (expected x, o or none)")]
    UnknownPlayer(String),
}

/// Search strength
///
/// Each level fixes the search depth in plies and how many candidate moves
/// are considered at every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Beginner,
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Search depth in plies
    pub fn max_depth(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    /// Candidate moves kept per node
    pub fn max_candidates(self) -> usize {
        match self {
            Difficulty::Beginner => 8,
            Difficulty::Easy => 12,
            Difficulty::Medium => 16,
            Difficulty::Hard => 20,
            Difficulty::Expert => 25,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// Bias applied on top of the static evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayStyle {
    #[default]
    Balanced,
    /// Extra weight on the engine's own patterns
    Aggressive,
    /// Extra weight on suppressing the opponent's patterns
    Defensive,
    /// Extra weight on stones near the centre
    Positional,
}

impl PlayStyle {
    pub const ALL: [PlayStyle; 4] = [
        PlayStyle::Balanced,
        PlayStyle::Aggressive,
        PlayStyle::Defensive,
        PlayStyle::Positional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayStyle::Balanced => "balanced",
            PlayStyle::Aggressive => "aggressive",
            PlayStyle::Defensive => "defensive",
            PlayStyle::Positional => "positional",
        }
    }
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayStyle::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownStyle(s.to_string()))
    }
}

/// Parse a player name (`x`, `o`). `none` maps to `Stone::Empty`.
pub fn parse_player(s: &str) -> Result<Stone, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "x" => Ok(Stone::X),
        "o" => Ok(Stone::O),
        "none" | "-" => Ok(Stone::Empty),
        _ => Err(ConfigError::UnknownPlayer(s.to_string())),
    }
}

/// Settings for [`crate::AIEngine::with_config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub ai_player: Stone,
    pub difficulty: Difficulty,
    pub style: PlayStyle,
    /// Wall-clock budget per move; `None` searches to full depth
    pub time_limit: Option<Duration>,
    /// Seed for the fallback move picker; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ai_player: Stone::O,
            difficulty: Difficulty::default(),
            style: PlayStyle::default(),
            time_limit: None,
            seed: None,
        }
    }
}
