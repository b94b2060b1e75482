//! Genetic-2048: the 2048 sliding-tile puzzle and a weighted-heuristic autoplayer.
//!
//! ## Modules
//!
//! - [`constants`] - Grid geometry, spawn odds, harness defaults
//! - [`board`] - Core game logic (slides, merges, spawns, terminal detection)
//! - [`agent`] - Linear weight agents and the population holding them
//! - [`runner`] - Greedy move choice and fitness evaluation
//! - [`display`] - Observers that receive a snapshot after each move
//!
//! The population carries a mutation rate, but only one agent is ever
//! evaluated. No evolutionary loop exists.
//!
//! ## Example
//!
//! ```
//! use genetic_2048::agent::Population;
//! use genetic_2048::display::NullDisplay;
//! use genetic_2048::runner::evaluate_fitness;
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let population = Population::random(4, 0.1, &mut rng).unwrap();
//! let agent = population.get(0).unwrap();
//!
//! let a = evaluate_fitness(agent, fastrand::Rng::with_seed(7), &mut NullDisplay);
//! let b = evaluate_fitness(agent, fastrand::Rng::with_seed(7), &mut NullDisplay);
//! assert_eq!(a, b);
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod display;
pub mod runner;
