//! Headless self-play: whole games driven by [`Strategy`] players.

use std::fmt::{self, Display};

use derive_more::{Display as DeriveDisplay, Error, From};
use hashbrown::HashMap;
use rand::{SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::config::{ConfigError, GameConfig};
use crate::engine::Strategy;
use crate::ludo::{Color, GameStatistics, Game, Player, RandomDice, RollOutcome, TurnError};

/// Roll cap for a single game. Four random players finish in a few hundred.
pub const DEFAULT_MAX_TURNS: u32 = 10_000;

#[derive(Debug, Clone, DeriveDisplay, Error, From)]
pub enum SimulationError {
    #[display("{}", _0)]
    Config(ConfigError),
    #[display("turn protocol rejected a call: {}", _0)]
    Turn(TurnError),
    #[display("{} strategy found no move for seat {} although one was legal", strategy, seat)]
    #[from(ignore)]
    NoChoice { strategy: Strategy, seat: usize },
}

/// How one simulated game went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedGame {
    pub seed: u64,
    pub winner: Option<Color>,
    /// Rolls made, including skipped turns and extra rolls.
    pub turns: u32,
    pub skipped: u32,
    pub sixes: u32,
    pub captures: u32,
    pub statistics: GameStatistics,
}

/// Strategy of `seat`, cycling through `strategies`.
pub fn strategy_for(strategies: &[Strategy], seat: usize) -> Strategy {
    if strategies.is_empty() {
        return Strategy::default();
    }
    strategies[seat % strategies.len()]
}

/// Plays one game to the end, or until `max_turns` rolls have been made.
///
/// The dice and the strategies' own randomness are both derived from
/// `seed`, so the same arguments always replay the same game.
#[instrument(skip(config, strategies))]
pub fn simulate_game(
    config: &GameConfig,
    strategies: &[Strategy],
    seed: u64,
    max_turns: u32,
) -> Result<SimulatedGame, SimulationError> {
    let mut game = Game::from_config(config)?;
    let mut dice = RandomDice::seeded(seed);
    let mut rng = StdRng::seed_from_u64(derive_seed(seed, u32::MAX));

    let mut turns = 0;
    let mut skipped = 0;
    let mut sixes = 0;
    let mut captures = 0;

    while !game.is_game_over() && turns < max_turns {
        let seat = game.current_player_index();
        let roll = game.roll(&mut dice)?;
        turns += 1;
        if roll.die().is_six() {
            sixes += 1;
        }
        match roll {
            RollOutcome::Skipped { .. } => skipped += 1,
            RollOutcome::AwaitingMove { die, .. } => {
                let strategy = strategy_for(strategies, seat);
                let token = strategy
                    .choose(&game, die, &mut rng)
                    .ok_or(SimulationError::NoChoice { strategy, seat })?;
                let turn = game.commit(token)?;
                captures += turn.outcome.captures.len() as u32;
            }
        }
    }

    let winner = game.winner().map(Player::color);
    debug!(?winner, turns, captures, "Game simulated");
    Ok(SimulatedGame {
        seed,
        winner,
        turns,
        skipped,
        sixes,
        captures,
        statistics: game.statistics(),
    })
}

/// Seed of game `index` in a run started from `base`.
pub fn derive_seed(base: u64, index: u32) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Aggregate of a batch of simulated games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub games: u32,
    pub seed: u64,
    pub strategies: Vec<Strategy>,
    pub wins: HashMap<Color, u32>,
    /// Games that hit the roll cap without a winner.
    pub unfinished: u32,
    pub average_turns: f64,
    pub total_captures: u64,
    pub total_sixes: u64,
}

impl SimulationReport {
    pub fn wins_of(&self, color: Color) -> u32 {
        self.wins.get(&color).copied().unwrap_or(0)
    }

    pub fn win_rate(&self, color: Color) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins_of(color) as f64 / self.games as f64 * 100.0
    }
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============================================")?;
        writeln!(f, "Games: {}, Seed: {}, Unfinished: {}", self.games, self.seed, self.unfinished)?;
        for color in Color::iter().filter(|c| self.wins.contains_key(c)) {
            writeln!(
                f,
                "{} {} Wins: {}, Win Rate: {:.2}%",
                color.symbol(),
                color,
                self.wins_of(color),
                self.win_rate(color)
            )?;
        }
        writeln!(
            f,
            "Average Rolls: {:.1}, Captures: {}, Sixes: {}",
            self.average_turns, self.total_captures, self.total_sixes
        )?;
        write!(f, "============================================")
    }
}

/// Plays `games` independent games on the rayon pool.
///
/// Game `i` uses [`derive_seed`]`(seed, i)`, so the report does not depend
/// on how the games are scheduled.
#[instrument(skip(config, strategies), fields(players = config.players()))]
pub fn run_simulations(
    config: &GameConfig,
    strategies: &[Strategy],
    games: u32,
    seed: u64,
    max_turns: u32,
) -> Result<SimulationReport, SimulationError> {
    let seats = config.seats()?;
    let results = (0..games)
        .into_par_iter()
        .map(|index| simulate_game(config, strategies, derive_seed(seed, index), max_turns))
        .collect::<Result<Vec<_>, _>>()?;

    let mut wins: HashMap<Color, u32> = seats.iter().map(|(_, color)| (*color, 0)).collect();
    let mut unfinished = 0;
    let mut total_turns = 0u64;
    let mut total_captures = 0u64;
    let mut total_sixes = 0u64;
    for result in &results {
        match result.winner {
            Some(color) => *wins.entry(color).or_insert(0) += 1,
            None => unfinished += 1,
        }
        total_turns += result.turns as u64;
        total_captures += result.captures as u64;
        total_sixes += result.sixes as u64;
    }

    let average_turns = if games == 0 { 0.0 } else { total_turns as f64 / games as f64 };
    info!(games, unfinished, average_turns, "Simulation finished");
    Ok(SimulationReport {
        games,
        seed,
        strategies: (0..seats.len()).map(|seat| strategy_for(strategies, seat)).collect(),
        wins,
        unfinished,
        average_turns,
        total_captures,
        total_sixes,
    })
}
