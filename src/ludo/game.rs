//! Turn order, move application, captures and win detection.
//!
//! Two layers share the same state:
//!
//! - the move primitives [`Game::movable_tokens`], [`Game::move_token`],
//!   [`Game::check_win`] and [`Game::advance_turn`], which a caller combines
//!   by hand (move, then check for a win, then advance unless a six was
//!   rolled);
//! - the turn protocol [`Game::roll`] / [`Game::apply_roll`] followed by
//!   [`Game::commit`], which performs that whole sequence in one call and
//!   cannot forget the win check.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{ConfigError, GameConfig};
use crate::ludo::{
    Board, Capture, DiceSource, Die, MoveError, MoveOutcome, Movement, Phase, Player, Position,
    RollOutcome, TurnEnd, TurnError, TurnOutcome,
};
use crate::misc::TokenSet;

/// One Ludo match: the board, the seated players and whose turn it is.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    current: usize,
    phase: Phase,
    winner: Option<usize>,
}

impl Game {
    /// Standard game for `players` seats (2..=4) with default names and colors.
    pub fn new(players: usize) -> Result<Self, ConfigError> {
        Self::from_config(&GameConfig::new(players))
    }

    #[instrument(skip(config), fields(players = config.players()))]
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let players = config
            .seats()?
            .into_iter()
            .map(|(name, color)| Player::new(name, color))
            .collect();
        debug!("New game");
        Ok(Game {
            board: Board::new(),
            players,
            current: 0,
            phase: Phase::AwaitingRoll,
            winner: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Mutable access for setting up positions, e.g. via [`Player::place_token`].
    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    /// Roll waiting for [`Game::commit`], if any.
    pub fn pending_roll(&self) -> Option<Die> {
        match self.phase {
            Phase::AwaitingMove(die) => Some(die),
            _ => None,
        }
    }

    /// Destination of a token that the turn protocol would accept.
    ///
    /// Unlike [`Game::move_token`] this also rejects landing on a track
    /// square already held by the mover's own color.
    pub fn legal_destination(
        &self,
        player: usize,
        token: usize,
        steps: Die,
    ) -> Result<Position, MoveError> {
        let mover = self.players.get(player).ok_or(MoveError::InvalidPlayer(player))?;
        let current = mover.token(token).ok_or(MoveError::InvalidToken(token))?.position();
        let destination = self.board.check_move(current, steps, mover.color())?;
        if let Position::OnTrack(square) = destination
            && mover.has_token_at(destination)
        {
            return Err(MoveError::Blocked(square));
        }
        Ok(destination)
    }

    /// Tokens of `player` that can legally move `steps` squares.
    ///
    /// Empty when nothing can move (the turn has to be skipped) or when
    /// `player` is not seated.
    pub fn movable_tokens(&self, player: usize, steps: Die) -> TokenSet {
        let Some(mover) = self.players.get(player) else {
            return TokenSet::new();
        };
        (0..mover.tokens().len())
            .filter(|&token| self.legal_destination(player, token, steps).is_ok())
            .collect()
    }

    /// Moves a token and sends capturable opposing tokens at the
    /// destination back home.
    ///
    /// Fails without touching any state when the token cannot travel
    /// `steps` squares or an index is out of range. Own-color blocking is
    /// not checked here; see [`Game::legal_destination`]. The move never
    /// declares a winner on its own, call [`Game::check_win`] afterwards.
    #[instrument(skip(self, steps), fields(steps = steps.value()))]
    pub fn move_token(
        &mut self,
        player: usize,
        token: usize,
        steps: Die,
    ) -> Result<MoveOutcome, MoveError> {
        let mover = self.players.get(player).ok_or(MoveError::InvalidPlayer(player))?;
        let from = mover.token(token).ok_or(MoveError::InvalidToken(token))?.position();
        let to = self.board.check_move(from, steps, mover.color())?;

        let captures = self.resolve_captures(player, to);

        let mover = &mut self.players[player];
        mover.set_token_position(token, to)?;
        mover.recompute_counts();

        let movement = Movement { player, token, from, to };
        debug!(%movement, "Token moved");
        Ok(MoveOutcome { movement, captures })
    }

    /// Sends every capturable token of the other players on `at` home.
    ///
    /// Several colors can share an unsafe square (only the mover's own
    /// color blocks), and a single landing captures all of them.
    fn resolve_captures(&mut self, attacker: usize, at: Position) -> Vec<Capture> {
        let Position::OnTrack(square) = at else {
            return Vec::new();
        };
        let attacker_color = self.players[attacker].color();
        let mut captures = Vec::new();

        for (index, defender) in self.players.iter_mut().enumerate() {
            if index == attacker || !self.board.can_capture(at, attacker_color, defender.color()) {
                continue;
            }
            let before = captures.len();
            for (token, piece) in defender.tokens_mut().iter_mut().enumerate() {
                if piece.position() == at {
                    piece.set_position(Position::AtHome);
                    captures.push(Capture { player: index, token, square });
                }
            }
            if captures.len() == before {
                continue;
            }
            defender.recompute_counts();
            info!(attacker = %attacker_color, defender = %defender.color(), %square, "Capture");
        }
        captures
    }

    /// Declares `player` the winner if all four tokens are finished.
    ///
    /// Has to be called after every successful [`Game::move_token`];
    /// [`Game::commit`] does it automatically.
    #[instrument(skip(self))]
    pub fn check_win(&mut self, player: usize) -> bool {
        let Some(candidate) = self.players.get(player) else {
            return false;
        };
        if candidate.tokens_finished() as usize != candidate.tokens().len() {
            return false;
        }
        if self.winner.is_none() {
            info!(winner = %candidate, "Game won");
            self.winner = Some(player);
        }
        self.phase = Phase::Finished;
        true
    }

    /// Passes the turn to the next seat. Does nothing once the game is over.
    pub fn advance_turn(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.current = (self.current + 1) % self.players.len();
    }

    /// Rolls `dice` for the current player and feeds the result to
    /// [`Game::apply_roll`].
    pub fn roll(&mut self, dice: &mut impl DiceSource) -> Result<RollOutcome, TurnError> {
        self.ensure_awaiting_roll()?;
        let die = dice.roll();
        self.apply_roll(die)
    }

    /// Starts the current player's move with an externally rolled die.
    ///
    /// If no token can move, the turn passes immediately (also on a six).
    #[instrument(skip(self, die), fields(player = self.current, die = die.value()))]
    pub fn apply_roll(&mut self, die: Die) -> Result<RollOutcome, TurnError> {
        self.ensure_awaiting_roll()?;
        let movable = self.movable_tokens(self.current, die);
        if movable.is_empty() {
            let player = self.current;
            self.advance_turn();
            debug!(next_player = self.current, "No legal move, turn skipped");
            return Ok(RollOutcome::Skipped { die, player, next_player: self.current });
        }
        self.phase = Phase::AwaitingMove(die);
        Ok(RollOutcome::AwaitingMove { die, movable })
    }

    /// Moves `token` of the current player with the pending roll, checks
    /// for a win and hands the turn over.
    ///
    /// A six keeps the turn with the same player, without limit.
    #[instrument(skip(self), fields(player = self.current))]
    pub fn commit(&mut self, token: usize) -> Result<TurnOutcome, TurnError> {
        let die = match self.phase {
            Phase::AwaitingMove(die) => die,
            Phase::AwaitingRoll => return Err(TurnError::NotAwaitingMove),
            Phase::Finished => return Err(TurnError::GameOver),
        };
        let player = self.current;
        self.legal_destination(player, token, die)?;
        let outcome = self.move_token(player, token, die)?;

        let end = if self.check_win(player) {
            TurnEnd::Won
        } else if die.is_six() {
            self.phase = Phase::AwaitingRoll;
            TurnEnd::ExtraRoll
        } else {
            self.phase = Phase::AwaitingRoll;
            self.advance_turn();
            TurnEnd::Passed { next_player: self.current }
        };
        Ok(TurnOutcome { die, outcome, end })
    }

    fn ensure_awaiting_roll(&self) -> Result<(), TurnError> {
        match self.phase {
            Phase::AwaitingRoll if self.is_game_over() => Err(TurnError::GameOver),
            Phase::AwaitingRoll => Ok(()),
            Phase::AwaitingMove(_) => Err(TurnError::NotAwaitingRoll),
            Phase::Finished => Err(TurnError::GameOver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ludo::{Color, IllegalMove, ScriptedDice, Square, TokenCounts};

    fn die(value: u8) -> Die {
        Die::new(value).unwrap()
    }

    fn track(number: u8) -> Position {
        Position::on_track(number).unwrap()
    }

    #[test]
    fn test_new_game_seating() {
        let game = Game::new(3).unwrap();
        let colors: Vec<Color> = game.players().iter().map(Player::color).collect();
        assert_eq!(colors, vec![Color::Red, Color::Blue, Color::Yellow]);
        assert_eq!(game.current_player().name(), "Player 1");
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert!(!game.is_game_over());
        assert!(Game::new(1).is_err());
        assert!(Game::new(5).is_err());
    }

    #[test]
    fn test_movable_tokens_respects_own_blocking() {
        let mut game = Game::new(2).unwrap();
        let red = game.player_mut(0).unwrap();
        red.place_token(0, track(1)).unwrap();
        red.place_token(1, track(4)).unwrap();

        // Leaving home onto square 1 is blocked by token 0, token 0 onto 4 by token 1.
        let movable = game.movable_tokens(0, die(3));
        assert_eq!(movable.iter().collect::<Vec<_>>(), vec![1]);
        let movable = game.movable_tokens(0, die(6));
        assert_eq!(movable.iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(
            game.legal_destination(0, 2, die(6)),
            Err(MoveError::Blocked(Square::new(1).unwrap()))
        );
        assert!(game.movable_tokens(9, die(6)).is_empty());
    }

    #[test]
    fn test_stretch_destinations_never_blocked() {
        let mut game = Game::new(2).unwrap();
        let red = game.player_mut(0).unwrap();
        red.place_token(0, Position::InStretch(2)).unwrap();
        red.place_token(1, Position::InStretch(0)).unwrap();
        red.place_token(2, Position::Finished).unwrap();
        red.place_token(3, Position::InStretch(3)).unwrap();
        let movable = game.movable_tokens(0, die(2));
        assert_eq!(movable.iter().collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn test_move_token_errors_do_not_mutate() {
        let mut game = Game::new(2).unwrap();
        let before = game.clone();
        assert_eq!(
            game.move_token(0, 0, die(4)),
            Err(MoveError::IllegalMove(IllegalMove::NeedSixToLeaveHome))
        );
        assert_eq!(game.move_token(0, 4, die(6)), Err(MoveError::InvalidToken(4)));
        assert_eq!(game.move_token(2, 0, die(6)), Err(MoveError::InvalidPlayer(2)));
        assert_eq!(game.players(), before.players());
        assert_eq!(game.current_player_index(), before.current_player_index());
    }

    #[test]
    fn test_capture_sends_token_home() {
        let mut game = Game::new(2).unwrap();
        game.player_mut(0).unwrap().place_token(0, track(20)).unwrap();
        game.player_mut(1).unwrap().place_token(2, track(23)).unwrap();

        let outcome = game.move_token(0, 0, die(3)).unwrap();
        let square = Square::new(23).unwrap();
        assert_eq!(outcome.captures, vec![Capture { player: 1, token: 2, square }]);
        assert_eq!(game.players()[1].token(2).unwrap().position(), Position::AtHome);
        assert_eq!(game.players()[1].counts(), TokenCounts { at_home: 4, in_play: 0, finished: 0 });
        assert_eq!(game.players()[0].token(0).unwrap().position(), track(23));
    }

    #[test]
    fn test_capture_only_touches_tokens_on_the_square() {
        let mut game = Game::new(2).unwrap();
        game.player_mut(0).unwrap().place_token(0, track(28)).unwrap();
        let blue = game.player_mut(1).unwrap();
        blue.place_token(1, track(31)).unwrap();
        blue.place_token(3, track(31)).unwrap();
        blue.place_token(0, track(32)).unwrap();

        let outcome = game.move_token(0, 0, die(3)).unwrap();
        let captured: Vec<usize> = outcome.captures.iter().map(|c| c.token).collect();
        assert_eq!(captured, vec![1, 3]);
        assert!(outcome.captures.iter().all(|c| c.player == 1));
        let blue = &game.players()[1];
        assert_eq!(blue.token(0).unwrap().position(), track(32));
        assert_eq!(blue.token(1).unwrap().position(), Position::AtHome);
        assert_eq!(blue.token(3).unwrap().position(), Position::AtHome);
        assert_eq!(blue.counts(), TokenCounts { at_home: 3, in_play: 1, finished: 0 });
    }

    #[test]
    fn test_turn_protocol_rejects_out_of_order_calls() {
        let mut game = Game::new(2).unwrap();
        assert_eq!(game.commit(0), Err(TurnError::NotAwaitingMove));
        let mut dice = ScriptedDice::from_values(&[6]).unwrap().unwrap();
        assert!(matches!(game.roll(&mut dice), Ok(RollOutcome::AwaitingMove { .. })));
        assert_eq!(game.pending_roll(), Some(die(6)));
        assert_eq!(game.apply_roll(die(2)), Err(TurnError::NotAwaitingRoll));
        assert_eq!(
            game.commit(7),
            Err(TurnError::Move(MoveError::InvalidToken(7)))
        );
    }

    #[test]
    fn test_check_win_and_absorbing_state() {
        let mut game = Game::new(2).unwrap();
        assert!(!game.check_win(1));
        let blue = game.player_mut(1).unwrap();
        for token in 0..4 {
            blue.place_token(token, Position::Finished).unwrap();
        }
        assert!(game.check_win(1));
        assert!(game.is_game_over());
        assert_eq!(game.winner().map(Player::color), Some(Color::Blue));
        let current = game.current_player_index();
        game.advance_turn();
        assert_eq!(game.current_player_index(), current);
        assert_eq!(game.apply_roll(die(6)), Err(TurnError::GameOver));
        assert_eq!(game.commit(0), Err(TurnError::GameOver));
        assert!(!game.check_win(9));
    }
}
