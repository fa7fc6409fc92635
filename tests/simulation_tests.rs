//! Self-play runs: reproducibility, tallies and configuration handling.

use ludo::config::{ConfigErrorKind, GameConfig};
use ludo::engine::Strategy;
use ludo::ludo::Color;
use ludo::simulation::{
    DEFAULT_MAX_TURNS, SimulationError, derive_seed, run_simulations, simulate_game, strategy_for,
};

#[test]
fn test_same_seed_replays_the_same_game() {
    let config = GameConfig::new(4);
    let strategies = [Strategy::Random, Strategy::Heuristic];
    let first = simulate_game(&config, &strategies, 42, DEFAULT_MAX_TURNS).unwrap();
    let second = simulate_game(&config, &strategies, 42, DEFAULT_MAX_TURNS).unwrap();
    assert_eq!(first, second);
    assert!(first.winner.is_some());
    assert!(first.statistics.total_finished >= 4);
}

#[test]
fn test_turn_cap_leaves_game_unfinished() {
    let config = GameConfig::new(2);
    let game = simulate_game(&config, &[Strategy::Heuristic], 3, 5).unwrap();
    assert_eq!(game.turns, 5);
    assert_eq!(game.winner, None);
}

#[test]
fn test_report_is_reproducible_and_consistent() {
    let config = GameConfig::new(3);
    let strategies = [Strategy::Heuristic, Strategy::Random, Strategy::Lookahead];
    let report = run_simulations(&config, &strategies, 24, 7, DEFAULT_MAX_TURNS).unwrap();
    let again = run_simulations(&config, &strategies, 24, 7, DEFAULT_MAX_TURNS).unwrap();
    assert_eq!(report, again);

    let total: u32 = report.wins.values().sum();
    assert_eq!(total + report.unfinished, 24);
    assert_eq!(report.wins.len(), 3);
    assert_eq!(report.wins_of(Color::Green), 0);
    assert_eq!(report.strategies, strategies.to_vec());
    assert!(report.average_turns > 0.0);
}

#[test]
fn test_report_json() {
    let config = GameConfig::new(2);
    let report = run_simulations(&config, &[Strategy::Random], 4, 1, DEFAULT_MAX_TURNS).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["games"], 4);
    assert_eq!(value["strategies"], serde_json::json!(["random", "random"]));
    assert!(value["wins"].get("red").is_some());
    assert!(value["wins"].get("blue").is_some());
}

#[test]
fn test_zero_games() {
    let report = run_simulations(&GameConfig::new(2), &[], 0, 0, DEFAULT_MAX_TURNS).unwrap();
    assert_eq!(report.games, 0);
    assert_eq!(report.average_turns, 0.0);
    assert_eq!(report.win_rate(Color::Red), 0.0);
    assert_eq!(report.strategies, vec![Strategy::Heuristic, Strategy::Heuristic]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = run_simulations(&GameConfig::new(6), &[], 1, 0, DEFAULT_MAX_TURNS).unwrap_err();
    let SimulationError::Config(config_err) = &err else {
        panic!("expected a config error, got {err}");
    };
    assert_eq!(config_err.kind, ConfigErrorKind::PlayerCount(6));
}

#[test]
fn test_custom_palette_tallies_by_color() {
    let config = GameConfig::new(2).with_palette(vec![Color::Green, Color::Yellow]);
    let report =
        run_simulations(&config, &[Strategy::Heuristic], 6, 11, DEFAULT_MAX_TURNS).unwrap();
    let tallied = report.wins_of(Color::Green) + report.wins_of(Color::Yellow);
    assert_eq!(tallied + report.unfinished, 6);
    assert_eq!(report.wins_of(Color::Red), 0);
}

#[test]
fn test_strategy_assignment_and_seeds() {
    let strategies = [Strategy::Random, Strategy::Lookahead];
    assert_eq!(strategy_for(&strategies, 0), Strategy::Random);
    assert_eq!(strategy_for(&strategies, 3), Strategy::Lookahead);
    assert_eq!(strategy_for(&[], 2), Strategy::Heuristic);

    assert_ne!(derive_seed(5, 0), derive_seed(5, 1));
    assert_ne!(derive_seed(5, 0), derive_seed(6, 0));
    assert_eq!(derive_seed(5, 3), derive_seed(5, 3));
}
