//! Integration tests for genetic-2048
//!
//! These exercise the board engine and the runner together through the
//! public API: spawn odds, move/no-op behaviour, terminal detection, and
//! seed-determinism of whole games.

use genetic_2048::agent::{Agent, Population};
use genetic_2048::board::{Board, Direction, Game, merge_line};
use genetic_2048::constants::SIZE;
use genetic_2048::display::NullDisplay;
use genetic_2048::runner::{choose_best_move, evaluate_fitness, evaluate_fitness_report};

// =============================================================================
// Helper functions
// =============================================================================

/// Fill a grid with random tiles from a seeded source.
fn random_board(rng: &mut fastrand::Rng, tiles: usize) -> Board {
    let mut b = Board::EMPTY;
    for _ in 0..tiles {
        b.spawn_tile(rng);
    }
    b
}

/// Cells where `after` holds a tile that `before` did not.
fn new_cells(before: &Board, after: &Board) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for r in 0..SIZE {
        for c in 0..SIZE {
            if before.get(r, c) != after.get(r, c) {
                out.push((r, c));
            }
        }
    }
    out
}

fn checkerboard() -> Board {
    Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
}

// =============================================================================
// Merge rule
// =============================================================================

#[test]
fn test_merge_line_examples() {
    assert_eq!(merge_line([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
    assert_eq!(merge_line([2, 2, 0, 0]), ([4, 0, 0, 0], 4));
    assert_eq!(merge_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
    assert_eq!(merge_line([2, 0, 2, 4]), ([4, 4, 0, 0], 4));
}

// =============================================================================
// Spawning
// =============================================================================

#[test]
fn test_spawn_odds_over_many_trials() {
    let mut rng = fastrand::Rng::with_seed(2048);
    let trials = 10_000;
    let mut twos = 0;
    for _ in 0..trials {
        let mut b = Board::EMPTY;
        let (r, c) = b.spawn_tile(&mut rng).expect("empty grid has room");
        match b.get(r, c) {
            2 => twos += 1,
            4 => {}
            other => panic!("unexpected spawn value {other}"),
        }
    }
    let share = twos as f64 / trials as f64;
    assert!((0.85..=0.95).contains(&share), "share of 2s was {share}");
}

#[test]
fn test_successful_move_adds_exactly_one_tile() {
    let mut rng = fastrand::Rng::with_seed(99);
    for seed in 0..200 {
        let board = random_board(&mut rng, 1 + (seed % 14) as usize);
        for dir in Direction::ALL {
            let (slid, gained) = board.slide(dir);
            let mut game = Game::from_parts(board, 0, fastrand::Rng::with_seed(seed));
            let moved = game.play(dir);
            assert_eq!(moved, slid != board);
            if moved {
                let added = new_cells(&slid, game.board());
                assert_eq!(added.len(), 1, "{dir} on {board:?}");
                let (r, c) = added[0];
                assert_eq!(slid.get(r, c), 0);
                assert!(matches!(game.board().get(r, c), 2 | 4));
                assert_eq!(game.score(), gained);
            } else {
                assert_eq!(*game.board(), board);
                assert_eq!(game.score(), 0);
            }
        }
    }
}

// =============================================================================
// Terminal detection
// =============================================================================

#[test]
fn test_terminal_iff_no_direction_legal() {
    let mut rng = fastrand::Rng::with_seed(5);
    for _ in 0..300 {
        let tiles = rng.usize(10..=16);
        let board = random_board(&mut rng, tiles);
        let game = Game::from_parts(board, 0, fastrand::Rng::with_seed(0));
        let any_legal = Direction::ALL.into_iter().any(|d| game.can_move(d));
        assert_eq!(game.is_terminal(), !any_legal);
    }
}

#[test]
fn test_checkerboard_is_terminal() {
    let game = Game::from_parts(checkerboard(), 0, fastrand::Rng::with_seed(0));
    assert!(game.is_terminal());
    let agent = Agent::from_weights([[1.0; SIZE]; SIZE]).unwrap();
    assert_eq!(choose_best_move(game.board(), &agent), None);
}

// =============================================================================
// Fitness evaluation
// =============================================================================

#[test]
fn test_fitness_is_seed_deterministic() {
    let mut rng = fastrand::Rng::with_seed(1234);
    let population = Population::random(3, 0.1, &mut rng).unwrap();
    let agent = population.get(0).unwrap();

    let first = evaluate_fitness_report(agent, fastrand::Rng::with_seed(77), &mut NullDisplay);
    let second = evaluate_fitness_report(agent, fastrand::Rng::with_seed(77), &mut NullDisplay);
    assert_eq!(first, second);
    assert_eq!(
        evaluate_fitness(agent, fastrand::Rng::with_seed(77), &mut NullDisplay),
        first.score
    );
}

#[test]
fn test_fitness_game_ends_terminal() {
    let agent = Agent::random(&mut fastrand::Rng::with_seed(8));
    let mut game = Game::new(fastrand::Rng::with_seed(8));
    let report = genetic_2048::runner::play_out(&mut game, &agent, &mut NullDisplay);
    assert!(game.is_terminal());
    assert_eq!(game.board().count_empty(), 0);
    assert_eq!(report.score, game.score());
}
