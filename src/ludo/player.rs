use std::fmt::{self, Display};

use serde::Serialize;

use crate::ludo::{Color, Die, MoveError, Position, Token};
use crate::ludo::position::FINISH_DEPTH;
use crate::misc::TokenSet;

pub const TOKENS_PER_PLAYER: usize = 4;

/// Per-player token tallies. Always a classification of the current tokens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenCounts {
    pub at_home: u8,
    pub in_play: u8,
    pub finished: u8,
}

impl TokenCounts {
    /// Counts tokens by shape. Stretch tokens that are not finished are in play.
    pub fn classify(tokens: &[Token]) -> Self {
        let mut counts = TokenCounts::default();
        for token in tokens {
            match token.position() {
                Position::AtHome => counts.at_home += 1,
                Position::Finished => counts.finished += 1,
                Position::OnTrack(_) | Position::InStretch(_) => counts.in_play += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u8 {
        self.at_home + self.in_play + self.finished
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    color: Color,
    tokens: [Token; TOKENS_PER_PLAYER],
    counts: TokenCounts,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        let tokens = [Token::new(); TOKENS_PER_PLAYER];
        Player {
            name: name.into(),
            color,
            counts: TokenCounts::classify(&tokens),
            tokens,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn tokens(&self) -> &[Token; TOKENS_PER_PLAYER] {
        &self.tokens
    }

    /// Direct token access for the game. Callers recompute the counters.
    pub(crate) fn tokens_mut(&mut self) -> &mut [Token; TOKENS_PER_PLAYER] {
        &mut self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn counts(&self) -> TokenCounts {
        self.counts
    }

    pub fn tokens_at_home(&self) -> u8 {
        self.counts.at_home
    }

    pub fn tokens_in_play(&self) -> u8 {
        self.counts.in_play
    }

    pub fn tokens_finished(&self) -> u8 {
        self.counts.finished
    }

    pub fn token_positions(&self) -> [Position; TOKENS_PER_PLAYER] {
        self.tokens.map(|token| token.position())
    }

    pub fn has_token_at(&self, position: Position) -> bool {
        self.tokens.iter().any(|token| token.position() == position)
    }

    fn indices_where(&self, predicate: impl Fn(&Token) -> bool) -> TokenSet {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| predicate(token))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn home_tokens(&self) -> TokenSet {
        self.indices_where(Token::at_home)
    }

    pub fn track_tokens(&self) -> TokenSet {
        self.indices_where(Token::on_track)
    }

    /// Tokens in the home stretch, finished ones included.
    pub fn stretch_tokens(&self) -> TokenSet {
        self.indices_where(Token::in_stretch)
    }

    pub fn finished_tokens(&self) -> TokenSet {
        self.indices_where(Token::finished)
    }

    /// Rewrites the counters from the current token positions.
    pub fn recompute_counts(&mut self) {
        self.counts = TokenCounts::classify(&self.tokens);
    }

    /// Coarse movability check that ignores the other tokens on the board.
    ///
    /// Blocking by own tokens and the entrance turn are resolved by
    /// [`crate::ludo::Game::movable_tokens`].
    pub fn can_move(&self, index: usize, steps: Die) -> bool {
        let Some(token) = self.tokens.get(index) else {
            return false;
        };
        match token.position() {
            Position::AtHome => steps.is_six(),
            Position::InStretch(depth) => depth + steps.value() <= FINISH_DEPTH,
            Position::Finished => false,
            Position::OnTrack(_) => true,
        }
    }

    /// Puts a token on an arbitrary position, e.g. to set up a game in
    /// progress. Counters are recomputed.
    pub fn place_token(&mut self, index: usize, position: Position) -> Result<(), MoveError> {
        self.set_token_position(index, position)?;
        self.recompute_counts();
        Ok(())
    }

    /// Moves a token without touching the counters. The caller recomputes.
    pub(crate) fn set_token_position(
        &mut self,
        index: usize,
        position: Position,
    ) -> Result<(), MoveError> {
        let token = self.tokens.get_mut(index).ok_or(MoveError::InvalidToken(index))?;
        token.set_position(position);
        Ok(())
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}
