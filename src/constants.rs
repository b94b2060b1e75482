//! Constants for grid geometry, tile spawning, and the agent harness.
//!
//! The grid is a fixed 4x4 matrix for the lifetime of a game. The harness
//! defaults reproduce a plain `genetic-2048` run with no flags.

// =============================================================================
// Grid Geometry
// =============================================================================

/// Side length of the square grid.
pub const SIZE: usize = 4;

/// Total number of cells on the grid.
pub const CELLS: usize = SIZE * SIZE;

/// Tiles placed on a fresh grid before the first move.
pub const INITIAL_TILES: usize = 2;

// =============================================================================
// Tile Spawning
// =============================================================================

/// Value of the common spawned tile.
pub const SPAWN_LOW: u32 = 2;

/// Value of the rare spawned tile.
pub const SPAWN_HIGH: u32 = 4;

/// A draw in `0..SPAWN_ODDS_DENOM` below this spawns `SPAWN_LOW` (9 in 10).
pub const SPAWN_LOW_ODDS: u8 = 9;

/// Denominator for the spawn draw.
pub const SPAWN_ODDS_DENOM: u8 = 10;

// =============================================================================
// Agent Harness
// =============================================================================

/// Default number of agents built at startup.
pub const DEFAULT_POPULATION_SIZE: usize = 20_000;

/// Default mutation rate carried by the population.
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// Default pause after each rendered step, in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 200;

/// Horizontal rule printed under each rendered grid.
pub const RULE: &str = "--------------------";
