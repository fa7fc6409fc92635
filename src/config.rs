//! Game setup: player count, seating palette and player names.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::ludo::Color;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Construction parameters of a [`crate::ludo::Game`].
///
/// Colors are dealt from `palette` in order, truncated to `players`.
/// Names default to `Player 1`, `Player 2`, ...
///
/// ```toml
/// players = 3
/// palette = ["green", "red", "blue"]
/// names = ["Ada", "Brian", "Cleo"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Number of seated players (2..=4).
    #[serde(default = "default_players")]
    players: usize,

    /// Seating order of colors.
    #[serde(default = "default_palette")]
    palette: Vec<Color>,

    /// Optional player names, one per seat.
    #[serde(default)]
    names: Vec<String>,
}

fn default_players() -> usize {
    MAX_PLAYERS
}

fn default_palette() -> Vec<Color> {
    Color::PALETTE.to_vec()
}

impl GameConfig {
    /// Standard palette and default names for `players` seats.
    pub fn new(players: usize) -> Self {
        Self {
            players,
            palette: default_palette(),
            names: Vec::new(),
        }
    }

    /// Changes the seat count, keeping palette and the names of the
    /// remaining seats.
    ///
    /// Growing past the named seats leaves a name list that
    /// [`GameConfig::validate`] rejects.
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self.names.truncate(players);
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading game config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Read(e.to_string())))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        info!(players = config.players, "Game config loaded");
        Ok(config)
    }

    /// Checks the player count, the palette and the name list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::new(ConfigErrorKind::PlayerCount(self.players)));
        }
        if self.palette.len() < self.players {
            return Err(ConfigError::new(ConfigErrorKind::PaletteTooShort {
                players: self.players,
                colors: self.palette.len(),
            }));
        }
        for (i, color) in self.palette.iter().enumerate() {
            if self.palette[..i].contains(color) {
                return Err(ConfigError::new(ConfigErrorKind::DuplicateColor(*color)));
            }
        }
        if !self.names.is_empty() && self.names.len() != self.players {
            return Err(ConfigError::new(ConfigErrorKind::NameCount {
                players: self.players,
                names: self.names.len(),
            }));
        }
        Ok(())
    }

    /// Name and color of every seat, in turn order.
    pub fn seats(&self) -> Result<Vec<(String, Color)>, ConfigError> {
        self.validate()?;
        Ok(self
            .palette
            .iter()
            .take(self.players)
            .enumerate()
            .map(|(i, color)| {
                let name = self
                    .names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Player {}", i + 1));
                (name, *color)
            })
            .collect())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_players())
    }
}

/// What is wrong with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    #[display("player count {} is outside {}..={}", _0, MIN_PLAYERS, MAX_PLAYERS)]
    PlayerCount(usize),
    #[display("{} players need {} palette colors, got {}", players, players, colors)]
    PaletteTooShort { players: usize, colors: usize },
    #[display("color {} appears twice in the palette", _0)]
    DuplicateColor(Color),
    #[display("{} players but {} names", players, names)]
    NameCount { players: usize, names: usize },
    #[display("failed to read config file: {}", _0)]
    Read(String),
    #[display("failed to parse config: {}", _0)]
    Parse(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub line: u32,
    pub file: &'static str,
}

impl ConfigError {
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
