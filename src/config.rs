/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{Color, Score};

/// Lowest difficulty level, searching one ply.
pub const MIN_LEVEL: u8 = 1;

/// Highest difficulty level, searching four plies.
pub const MAX_LEVEL: u8 = 4;

/// Seconds on each side's clock at the start of a game.
pub const DEFAULT_TIME_CONTROL: u32 = 600;

/// Who plays the Black pieces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    Pvp,

    /// The engine plays Black.
    Bot,
}

impl Mode {
    /// The color the engine plays in this mode, if any.
    #[inline(always)]
    pub const fn bot_color(&self) -> Option<Color> {
        match self {
            Self::Pvp => None,
            Self::Bot => Some(Color::Black),
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pvp => "pvp",
            Self::Bot => "bot",
        }
    }
}

/// Playing personality of the engine.
///
/// Only [`Style::Aggressive`] changes how positions are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Standard,
    Aggressive,
    Defensive,
    Gambit,
}

impl Style {
    /// Scales `score` by this style's multiplier.
    ///
    /// # Example
    /// ```
    /// # use newt::{Score, Style};
    /// assert_eq!(Style::Aggressive.apply(Score(1_000)), Score(1_100));
    /// assert_eq!(Style::Defensive.apply(Score(1_000)), Score(1_000));
    /// ```
    #[inline(always)]
    pub fn apply(&self, score: Score) -> Score {
        match self {
            Self::Aggressive => score * 11 / 10,
            Self::Standard | Self::Defensive | Self::Gambit => score,
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Aggressive => "aggressive",
            Self::Defensive => "defensive",
            Self::Gambit => "gambit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Settings chosen when a game is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    /// Whether the engine plays Black.
    pub mode: Mode,

    /// Difficulty level in `[1, 4]`, used as the search depth.
    pub level: u8,

    /// Personality of the engine.
    pub style: Style,

    /// Seconds on each side's clock at the start of the game.
    pub time_control: u32,

    /// Check opening book moves against the legal moves before playing them.
    pub verify_book: bool,
}

impl GameConfig {
    /// Ensures the level is within `[1, 4]`.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            bail!(
                "Level must be between {MIN_LEVEL} and {MAX_LEVEL}. Got {}",
                self.level
            );
        }
        Ok(())
    }
}

impl Default for GameConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            level: MIN_LEVEL,
            style: Style::default(),
            time_control: DEFAULT_TIME_CONTROL,
            verify_book: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::Bot).unwrap(), "\"bot\"");
        assert_eq!(
            serde_json::from_str::<Style>("\"gambit\"").unwrap(),
            Style::Gambit
        );
        assert!(serde_json::from_str::<Style>("\"reckless\"").is_err());
    }

    #[test]
    fn test_aggressive_scales_both_signs() {
        assert_eq!(Style::Aggressive.apply(Score(-1_000)), Score(-1_100));
        assert_eq!(Style::Aggressive.apply(Score(25)), Score(27));
        assert_eq!(Style::Gambit.apply(Score(25)), Score(25));
    }

    #[test]
    fn test_level_bounds() {
        let mut config = GameConfig::default();
        assert!(config.validate().is_ok());
        config.level = 0;
        assert!(config.validate().is_err());
        config.level = 5;
        assert!(config.validate().is_err());
    }
}
