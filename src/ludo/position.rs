use std::fmt::{self, Display};

use serde::Serialize;

/// Number of squares on the shared ring.
pub const TRACK_LENGTH: u8 = 52;

/// Number of slots in a color's private home stretch (depths 0..=5).
pub const STRETCH_LENGTH: u8 = 6;

/// Stretch depth of the finish slot.
pub const FINISH_DEPTH: u8 = STRETCH_LENGTH - 1;

/// A square on the shared track, numbered 1..=52 for every color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Square(u8);

impl Square {
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= TRACK_LENGTH {
            Some(Square(number))
        } else {
            None
        }
    }

    /// Only for compile-time board tables.
    pub(crate) const fn from_const(number: u8) -> Self {
        match Self::new(number) {
            Some(square) => square,
            None => panic!("track square out of range"),
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Walks `steps` squares forward, wrapping from 52 to 1.
    pub fn advance(self, steps: u8) -> Square {
        let zero_based = (self.0 as u16 - 1 + steps as u16) % TRACK_LENGTH as u16;
        Square(zero_based as u8 + 1)
    }

    /// Number of forward steps from `self` to `to` along the ring, in 0..52.
    pub fn distance_to(self, to: Square) -> u8 {
        (to.0 + TRACK_LENGTH - self.0) % TRACK_LENGTH
    }

    /// All track squares in order.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=TRACK_LENGTH).map(Square)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a single token is.
///
/// `InStretch` only ever holds depths 0..=4. Depth 5 is the finish slot and
/// is always represented as [`Position::Finished`]; use
/// [`Position::in_stretch`] to build stretch positions so the two spellings
/// never diverge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum Position {
    #[default]
    AtHome,
    OnTrack(Square),
    InStretch(u8),
    Finished,
}

impl Position {
    pub fn on_track(number: u8) -> Option<Position> {
        Square::new(number).map(Position::OnTrack)
    }

    /// Builds a stretch position, normalizing the finish slot to `Finished`.
    pub fn in_stretch(depth: u8) -> Option<Position> {
        match depth {
            FINISH_DEPTH => Some(Position::Finished),
            d if d < FINISH_DEPTH => Some(Position::InStretch(d)),
            _ => None,
        }
    }

    pub fn square(&self) -> Option<Square> {
        match self {
            Position::OnTrack(square) => Some(*square),
            _ => None,
        }
    }

    /// Depth inside the home stretch, counting `Finished` as depth 5.
    pub fn stretch_depth(&self) -> Option<u8> {
        match self {
            Position::InStretch(depth) => Some(*depth),
            Position::Finished => Some(FINISH_DEPTH),
            _ => None,
        }
    }

    pub fn is_at_home(&self) -> bool {
        matches!(self, Position::AtHome)
    }

    pub fn is_on_track(&self) -> bool {
        matches!(self, Position::OnTrack(_))
    }

    /// True for every stretch slot, the finish slot included.
    pub fn is_in_stretch(&self) -> bool {
        self.stretch_depth().is_some()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Position::Finished)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::AtHome => write!(f, "Home"),
            Position::OnTrack(square) => write!(f, "Square {}", square),
            Position::InStretch(depth) => write!(f, "Home Stretch {}", depth),
            Position::Finished => write!(f, "Finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0).is_none());
        assert!(Square::new(53).is_none());
        assert_eq!(Square::new(1).map(Square::get), Some(1));
        assert_eq!(Square::new(52).map(Square::get), Some(52));
        assert_eq!(Square::all().count(), TRACK_LENGTH as usize);
    }

    #[test]
    fn test_square_advance_wraps() {
        let last = Square::new(52).unwrap();
        assert_eq!(last.advance(1).get(), 1);
        assert_eq!(last.advance(6).get(), 6);
        assert_eq!(Square::new(47).unwrap().advance(6).get(), 1);
        assert_eq!(Square::new(10).unwrap().advance(0).get(), 10);
    }

    #[test]
    fn test_square_distance() {
        let a = Square::new(50).unwrap();
        let b = Square::new(12).unwrap();
        assert_eq!(a.distance_to(b), 14);
        assert_eq!(b.distance_to(a), 38);
        assert_eq!(a.distance_to(a), 0);
    }

    #[test]
    fn test_stretch_normalizes_finish() {
        assert_eq!(Position::in_stretch(5), Some(Position::Finished));
        assert_eq!(Position::in_stretch(0), Some(Position::InStretch(0)));
        assert_eq!(Position::in_stretch(6), None);
        assert_eq!(Position::Finished.stretch_depth(), Some(5));
    }

    #[test]
    fn test_classification_is_exclusive() {
        let positions = [
            Position::AtHome,
            Position::on_track(9).unwrap(),
            Position::InStretch(2),
            Position::Finished,
        ];
        for position in positions {
            let shapes = [position.is_at_home(), position.is_on_track(), position.is_in_stretch()];
            assert_eq!(shapes.iter().filter(|&&b| b).count(), 1, "{:?}", position);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::AtHome.to_string(), "Home");
        assert_eq!(Position::on_track(22).unwrap().to_string(), "Square 22");
        assert_eq!(Position::InStretch(3).to_string(), "Home Stretch 3");
        assert_eq!(Position::Finished.to_string(), "Finished");
    }
}
