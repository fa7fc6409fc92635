//! Error types for moves, turns and dice.

use derive_more::{Display, Error, From};

use super::position::Square;

/// Why a token cannot travel the rolled distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// Tokens leave home only on a 6.
    #[display("Need 6 to exit home")]
    NeedSixToLeaveHome,
    /// The roll would carry the token past the finish slot.
    #[display("Cannot overshoot finish")]
    OvershootsFinish,
}

/// Error returned by the move primitives. No variant mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum MoveError {
    /// The move would not change the token's position.
    #[display("Illegal move: {}", _0)]
    #[from]
    IllegalMove(IllegalMove),
    /// Token index outside 0..4.
    #[display("No token with index {}", _0)]
    InvalidToken(#[error(not(source))] usize),
    /// Player index outside the seated players.
    #[display("No player with index {}", _0)]
    InvalidPlayer(#[error(not(source))] usize),
    /// The destination holds a token of the mover's own color.
    #[display("Square {} is blocked by an own token", _0)]
    Blocked(#[error(not(source))] Square),
}

/// Error returned by the turn protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum TurnError {
    #[display("Game is already over")]
    GameOver,
    #[display("A roll is pending a move")]
    NotAwaitingRoll,
    #[display("Roll the dice first")]
    NotAwaitingMove,
    #[display("{}", _0)]
    #[from]
    Move(MoveError),
}

/// A die value outside 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DiceError {
    #[display("Die value {} is outside 1..=6", _0)]
    OutOfRange(#[error(not(source))] u8),
}
