//! Read-only views of a game for presentation layers.

use serde::Serialize;

use crate::ludo::{Color, Game, Phase, Position, TokenCounts, TOKENS_PER_PLAYER};

/// Token totals across all players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatistics {
    pub total_at_home: u32,
    pub total_in_play: u32,
    pub total_finished: u32,
    /// First player in turn order with the most finished tokens.
    pub leading_player: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub color: Color,
    #[serde(flatten)]
    pub counts: TokenCounts,
    pub positions: [Position; TOKENS_PER_PLAYER],
}

/// Everything a board view needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub current_player: String,
    pub current_color: Color,
    pub phase: Phase,
    pub game_over: bool,
    pub winner: Option<String>,
    pub players: Vec<PlayerSnapshot>,
}

impl Game {
    pub fn statistics(&self) -> GameStatistics {
        let mut stats = GameStatistics {
            total_at_home: 0,
            total_in_play: 0,
            total_finished: 0,
            leading_player: None,
        };
        let mut best = None;
        for player in self.players() {
            let counts = player.counts();
            stats.total_at_home += counts.at_home as u32;
            stats.total_in_play += counts.in_play as u32;
            stats.total_finished += counts.finished as u32;
            if best.is_none_or(|finished| counts.finished > finished) {
                best = Some(counts.finished);
                stats.leading_player = Some(player.name().to_string());
            }
        }
        stats
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let current = self.current_player();
        GameSnapshot {
            current_player: current.name().to_string(),
            current_color: current.color(),
            phase: self.phase(),
            game_over: self.is_game_over(),
            winner: self.winner().map(|p| p.name().to_string()),
            players: self
                .players()
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name().to_string(),
                    color: p.color(),
                    counts: p.counts(),
                    positions: p.token_positions(),
                })
                .collect(),
        }
    }
}
