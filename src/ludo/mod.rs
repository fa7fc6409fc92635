mod board;
pub use board::Board;

mod color;
pub use color::Color;

pub mod position;
pub use position::{Position, Square};

mod token;
pub use token::Token;

mod player;
pub use player::{Player, TokenCounts, TOKENS_PER_PLAYER};

mod dice;
pub use dice::{DiceSource, Die, RandomDice, ScriptedDice};

mod error;
pub use error::{DiceError, IllegalMove, MoveError, TurnError};

mod movement;
pub use movement::{Capture, MoveOutcome, Movement, Phase, RollOutcome, TurnEnd, TurnOutcome};

mod game;
pub use game::Game;

mod stats;
pub use stats::{GameSnapshot, GameStatistics, PlayerSnapshot};
