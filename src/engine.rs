//! Automated players: pick one of the movable tokens for a roll.

use rand::{Rng, seq::IndexedRandom};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::ludo::{Die, Game, Player, Position};

/// Progress of a token that has not left home yet.
const HOME_DISTANCE: u8 = 56;

/// Score of a position in which the evaluated player has already won.
const WIN_SCORE: f32 = 10_000.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniform choice among the movable tokens.
    Random,
    /// Fixed priorities: leave home on a six, then push stretch tokens,
    /// then the token closest to the finish.
    #[default]
    Heuristic,
    /// One-ply search over every candidate move.
    Lookahead,
}

impl Strategy {
    /// Token the current player should move with `die`.
    ///
    /// `None` iff no token can move.
    pub fn choose<R: Rng + ?Sized>(&self, game: &Game, die: Die, rng: &mut R) -> Option<usize> {
        let player = game.current_player_index();
        let movable: Vec<usize> = game.movable_tokens(player, die).iter().collect();
        match self {
            Strategy::Random => movable.choose(rng).copied(),
            Strategy::Heuristic => {
                let mover = game.current_player();
                best_of(
                    movable
                        .into_iter()
                        .map(|token| (token, heuristic_score(game, mover, token, die))),
                )
            }
            Strategy::Lookahead => find_best_move(game, player, &movable, die),
        }
    }
}

/// Priority of moving `token` of `player` with `die`.
pub fn heuristic_score(game: &Game, player: &Player, token: usize, die: Die) -> f32 {
    let Some(token) = player.token(token) else {
        return f32::NEG_INFINITY;
    };
    match token.position() {
        Position::AtHome if die.is_six() => 10.0,
        Position::InStretch(_) => 8.0,
        position @ Position::OnTrack(_) => {
            let distance = game.board().distance_to_finish(position, player.color());
            (60.0 - distance as f32) / 10.0
        }
        Position::AtHome | Position::Finished => 0.0,
    }
}

/// Applies every candidate on a clone of `game` and keeps the one that
/// evaluates best for `player`.
pub fn find_best_move(game: &Game, player: usize, candidates: &[usize], die: Die) -> Option<usize> {
    let evals = candidates
        .to_vec()
        .into_par_iter()
        .map(|token| {
            let mut next = game.clone();
            let eval = match next.move_token(player, token, die) {
                Ok(_) => {
                    next.check_win(player);
                    evaluate(&next, player)
                }
                Err(_) => f32::NEG_INFINITY,
            };
            (token, eval)
        })
        .collect::<Vec<_>>();

    best_of(evals)
}

/// Own progress minus the progress of the strongest opponent.
pub fn evaluate(game: &Game, player: usize) -> f32 {
    if game.winner_index() == Some(player) {
        return WIN_SCORE;
    }
    let mut own = 0.0;
    let mut best_opponent = 0.0f32;
    for (index, seat) in game.players().iter().enumerate() {
        let score = progress(game, seat);
        if index == player {
            own = score;
        } else {
            best_opponent = best_opponent.max(score);
        }
    }
    own - best_opponent
}

fn progress(game: &Game, player: &Player) -> f32 {
    player
        .tokens()
        .iter()
        .map(|token| {
            let distance = game.board().distance_to_finish(token.position(), player.color());
            (HOME_DISTANCE - distance) as f32
        })
        .sum()
}

/// First candidate with the highest score.
fn best_of(scored: impl IntoIterator<Item = (usize, f32)>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (token, score) in scored {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((token, score));
        }
    }
    best.map(|(token, _)| token)
}
