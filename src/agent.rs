//! Weighted linear agents and the population that holds them.
//!
//! An [`Agent`] scores a grid as the dot product of tile values and its
//! per-cell weights. A [`Population`] is built once at startup. It carries a
//! mutation rate, but no selection, crossover, or mutation step reads it.

use crate::board::Board;
use crate::constants::SIZE;

/// Per-cell weights, row-major like the grid.
pub type Weights = [[f64; SIZE]; SIZE];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error("population must contain at least one agent")]
    EmptyPopulation,
    #[error("weight at ({row}, {col}) is not finite: {value}")]
    NonFiniteWeight { row: usize, col: usize, value: f64 },
    #[error("agent index {index} out of range for population of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A fixed weight matrix used to rank candidate grids.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    weights: Weights,
}

impl Agent {
    pub fn from_weights(weights: Weights) -> Result<Self, AgentError> {
        for (row, w_row) in weights.iter().enumerate() {
            for (col, &value) in w_row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(AgentError::NonFiniteWeight { row, col, value });
                }
            }
        }
        Ok(Agent { weights })
    }

    /// Agent with every weight drawn uniformly from `[0, 1)`.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Agent {
            weights: std::array::from_fn(|_| std::array::from_fn(|_| rng.f64())),
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Sum over all cells of `tile * weight`.
    pub fn evaluate(&self, board: &Board) -> f64 {
        board
            .cells()
            .iter()
            .flatten()
            .zip(self.weights.iter().flatten())
            .map(|(&tile, &w)| tile as f64 * w)
            .sum()
    }
}

/// Ordered agents created at startup.
#[derive(Debug, Clone)]
pub struct Population {
    agents: Vec<Agent>,
    mutation_rate: f64,
}

impl Population {
    pub fn random(
        size: usize,
        mutation_rate: f64,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, AgentError> {
        if size == 0 {
            return Err(AgentError::EmptyPopulation);
        }
        let agents = (0..size).map(|_| Agent::random(rng)).collect();
        Ok(Population {
            agents,
            mutation_rate,
        })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, index: usize) -> Result<&Agent, AgentError> {
        self.agents.get(index).ok_or(AgentError::IndexOutOfRange {
            index,
            len: self.agents.len(),
        })
    }
}
