use serde::Serialize;

use crate::ludo::{Color, Die, IllegalMove, Position, Square};
use crate::ludo::position::{FINISH_DEPTH, STRETCH_LENGTH, TRACK_LENGTH};

/// Ludo board geometry and the pure movement rules.
///
/// A board never changes after construction; games share it read-only.
/// Start and entrance tables are indexed by [`Color::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    start_squares: [Square; 4],
    home_entrances: [Square; 4],
    safe_squares: [Square; 8],
}

impl Board {
    const START_SQUARES: [Square; 4] = [
        Square::from_const(1),
        Square::from_const(14),
        Square::from_const(27),
        Square::from_const(40),
    ];

    const HOME_ENTRANCES: [Square; 4] = [
        Square::from_const(51),
        Square::from_const(12),
        Square::from_const(25),
        Square::from_const(38),
    ];

    const SAFE_SQUARES: [Square; 8] = [
        Square::from_const(1),
        Square::from_const(9),
        Square::from_const(14),
        Square::from_const(22),
        Square::from_const(27),
        Square::from_const(35),
        Square::from_const(40),
        Square::from_const(48),
    ];

    /// Creates the standard board.
    pub fn new() -> Self {
        Board {
            start_squares: Self::START_SQUARES,
            home_entrances: Self::HOME_ENTRANCES,
            safe_squares: Self::SAFE_SQUARES,
        }
    }

    pub fn track_length(&self) -> u8 {
        TRACK_LENGTH
    }

    pub fn stretch_length(&self) -> u8 {
        STRETCH_LENGTH
    }

    pub fn start_square(&self, color: Color) -> Square {
        self.start_squares[color.index()]
    }

    /// Square where a token of `color` leaves the ring. A move that reaches
    /// it lands on stretch depth 0 instead.
    pub fn home_entrance(&self, color: Color) -> Square {
        self.home_entrances[color.index()]
    }

    pub fn safe_squares(&self) -> &[Square] {
        &self.safe_squares
    }

    pub fn is_safe(&self, square: Square) -> bool {
        self.safe_squares.contains(&square)
    }

    /// Forward steps from `from` to `to` along the ring.
    pub fn ring_distance(&self, from: Square, to: Square) -> u8 {
        from.distance_to(to)
    }

    /// Destination of a token at `current` moving `steps` squares, or the
    /// reason the move is impossible.
    pub fn check_move(
        &self,
        current: Position,
        steps: Die,
        color: Color,
    ) -> Result<Position, IllegalMove> {
        let steps = steps.value();
        match current {
            Position::AtHome if steps == 6 => Ok(Position::OnTrack(self.start_square(color))),
            Position::AtHome => Err(IllegalMove::NeedSixToLeaveHome),
            Position::InStretch(_) | Position::Finished => {
                let depth = current.stretch_depth().unwrap_or(FINISH_DEPTH) + steps;
                Position::in_stretch(depth).ok_or(IllegalMove::OvershootsFinish)
            }
            Position::OnTrack(square) => {
                let to_entrance = square.distance_to(self.home_entrance(color));
                if to_entrance >= 1 && to_entrance <= steps {
                    Position::in_stretch(steps - to_entrance).ok_or(IllegalMove::OvershootsFinish)
                } else {
                    Ok(Position::OnTrack(square.advance(steps)))
                }
            }
        }
    }

    /// Destination of a token at `current` moving `steps` squares.
    ///
    /// An illegal move returns `current` unchanged; callers detect
    /// illegality by comparing the result with the input.
    pub fn next_position(&self, current: Position, steps: Die, color: Color) -> Position {
        self.check_move(current, steps, color).unwrap_or(current)
    }

    /// Whether an `attacker` landing on `at` sends a `defender` token there
    /// back home. Captures only happen on unsafe track squares.
    pub fn can_capture(&self, at: Position, attacker: Color, defender: Color) -> bool {
        match at {
            Position::OnTrack(square) => !self.is_safe(square) && attacker != defender,
            _ => false,
        }
    }

    /// Steps a token still has to travel to reach the finish slot.
    ///
    /// A token at home counts the step onto its start square as well.
    pub fn distance_to_finish(&self, position: Position, color: Color) -> u8 {
        match position {
            Position::AtHome => {
                let start = Position::OnTrack(self.start_square(color));
                1 + self.distance_to_finish(start, color)
            }
            Position::OnTrack(square) => {
                square.distance_to(self.home_entrance(color)) + FINISH_DEPTH
            }
            Position::InStretch(depth) => FINISH_DEPTH - depth,
            Position::Finished => 0,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
