use serde::Serialize;

use crate::ludo::Position;

/// One of a player's four pieces. Everything about it derives from its position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Token {
    position: Position,
}

impl Token {
    pub fn new() -> Self {
        Token { position: Position::AtHome }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn at_home(&self) -> bool {
        self.position.is_at_home()
    }

    pub fn on_track(&self) -> bool {
        self.position.is_on_track()
    }

    pub fn in_stretch(&self) -> bool {
        self.position.is_in_stretch()
    }

    pub fn finished(&self) -> bool {
        self.position.is_finished()
    }
}
