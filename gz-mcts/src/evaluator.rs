//! Policy/value evaluator interface.
//!
//! The evaluator returns a prior per intersection, a prior for the pass
//! move, and a scalar winrate/variance pair from the side-to-move's
//! perspective. The tree renormalizes priors after masking illegal
//! moves, so they need not sum to one.

use crate::position::Position;
use thiserror::Error;

/// Symmetry-averaging mode requested from the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensemble {
    /// Average the network output over all board symmetries.
    Average,
    /// Evaluate a single randomly chosen symmetry.
    RandomSymmetry,
}

/// Raw evaluator output for one position.
#[derive(Debug, Clone)]
pub struct NetOutput {
    /// Prior per intersection, row-major, `board_size * board_size` long.
    pub policy: Vec<f32>,
    /// Prior for the pass move.
    pub policy_pass: f32,
    /// Winrate in `[0, 1]` from the side-to-move's perspective.
    pub winrate: f32,
    /// Variance of the winrate estimate.
    pub variance: f32,
}

/// Evaluator failures.
///
/// An error during expansion leaves the node re-expandable; the worker
/// loop propagates it to the driver.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("evaluator backend failure: {0}")]
    Backend(String),
}

/// The neural evaluator collaborator.
pub trait Evaluator<P: Position> {
    fn get_output(&self, position: &P, ensemble: Ensemble) -> Result<NetOutput, EvalError>;
}

/// Uniform priors with a fixed winrate/variance (baseline stub).
#[derive(Debug, Clone, Copy)]
pub struct UniformEvaluator {
    pub winrate: f32,
    pub variance: f32,
}

impl Default for UniformEvaluator {
    fn default() -> Self {
        UniformEvaluator {
            winrate: 0.5,
            variance: 1.0 / 12.0,
        }
    }
}

impl<P: Position> Evaluator<P> for UniformEvaluator {
    fn get_output(&self, position: &P, _ensemble: Ensemble) -> Result<NetOutput, EvalError> {
        let intersections = position.board_size() * position.board_size();
        let prior = 1.0 / (intersections as f32 + 1.0);
        Ok(NetOutput {
            policy: vec![prior; intersections],
            policy_pass: prior,
            winrate: self.winrate,
            variance: self.variance,
        })
    }
}
