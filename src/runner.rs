//! Greedy move selection and fitness evaluation.
//!
//! The runner looks one move ahead: every legal direction is slid on a copy
//! of the grid, the agent scores the result, and the best direction is played.
//! A fitness evaluation repeats this until the game is over.

use tracing::{debug, info, trace};

use crate::agent::Agent;
use crate::board::{Board, Direction, Game, Score, Tile};
use crate::display::Observer;

/// Outcome of one full game played by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessReport {
    pub score: Score,
    pub moves: usize,
    pub highest_tile: Tile,
}

/// Pick the legal direction whose resulting grid the agent rates highest.
///
/// Directions are tried in [`Direction::ALL`] order and only a strictly
/// better rating replaces the current pick, so ties go to the earliest
/// direction. Returns `None` when no direction is legal.
pub fn choose_best_move(board: &Board, agent: &Agent) -> Option<Direction> {
    let mut best: Option<(Direction, f64)> = None;
    for dir in Direction::ALL {
        if !board.would_change(dir) {
            continue;
        }
        let rating = agent.evaluate(&board.shift(dir));
        trace!(%dir, rating, "candidate");
        match best {
            Some((_, top)) if rating <= top => {}
            _ => best = Some((dir, rating)),
        }
    }
    best.map(|(dir, _)| dir)
}

/// Play a fresh game with `agent` and return its final score.
pub fn evaluate_fitness(agent: &Agent, rng: fastrand::Rng, observer: &mut dyn Observer) -> Score {
    evaluate_fitness_report(agent, rng, observer).score
}

/// Play a fresh game with `agent`, reporting score, move count, and highest tile.
///
/// The observer sees one snapshot after every applied move.
pub fn evaluate_fitness_report(
    agent: &Agent,
    rng: fastrand::Rng,
    observer: &mut dyn Observer,
) -> FitnessReport {
    let mut game = Game::new(rng);
    play_out(&mut game, agent, observer)
}

/// Drive `game` to a terminal state with `agent`.
pub fn play_out(game: &mut Game, agent: &Agent, observer: &mut dyn Observer) -> FitnessReport {
    let mut moves = 0;
    while let Some(dir) = choose_best_move(game.board(), agent) {
        game.play(dir);
        moves += 1;
        debug!(%dir, score = game.score(), moves, "move");
        observer.observe(&game.snapshot());
    }

    let report = FitnessReport {
        score: game.score(),
        moves,
        highest_tile: game.board().highest_tile(),
    };
    info!(
        score = report.score,
        moves = report.moves,
        highest_tile = report.highest_tile,
        "game over"
    );
    report
}
