use std::fmt::{self, Display};

use serde::Serialize;

use crate::ludo::{Die, Position, Square};
use crate::misc::TokenSet;

/// A single token travelling from one position to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Movement {
    pub player: usize,
    pub token: usize,
    pub from: Position,
    pub to: Position,
}

impl Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token {}: {} -> {}", self.token + 1, self.from, self.to)
    }
}

/// An opposing token sent back home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Capture {
    pub player: usize,
    pub token: usize,
    pub square: Square,
}

/// What a successful move did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub movement: Movement,
    pub captures: Vec<Capture>,
}

impl MoveOutcome {
    pub fn captured(&self) -> bool {
        !self.captures.is_empty()
    }
}

/// Where the turn protocol stands for the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingRoll,
    AwaitingMove(Die),
    Finished,
}

/// Result of feeding a roll into the turn protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollOutcome {
    /// At least one token can move; commit one of `movable`.
    AwaitingMove { die: Die, movable: TokenSet },
    /// Nothing could move, the turn passed on.
    Skipped { die: Die, player: usize, next_player: usize },
}

impl RollOutcome {
    pub fn die(&self) -> Die {
        match self {
            RollOutcome::AwaitingMove { die, .. } | RollOutcome::Skipped { die, .. } => *die,
        }
    }
}

/// How a committed turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEnd {
    /// The mover finished all four tokens.
    Won,
    /// A six was rolled, the same player rolls again.
    ExtraRoll,
    Passed { next_player: usize },
}

/// A move together with the win check and the turn hand-over it triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub die: Die,
    pub outcome: MoveOutcome,
    pub end: TurnEnd,
}

impl TurnOutcome {
    pub fn won(&self) -> bool {
        self.end == TurnEnd::Won
    }
}
