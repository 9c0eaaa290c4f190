//! gz-mcts: the shared tree for parallel AlphaZero-style search.
//!
//! Many native worker threads descend the same tree without a global
//! lock. The design rests on:
//! - atomic visit/eval accumulators on every node (`node`, `atomic`)
//! - a three-state expansion interlock publishing the children list
//! - lazily inflated child slots (`slot`)
//! - Thompson sampling over per-child Beta posteriors for selection
//! - evaluator and game-state collaborators behind traits
//!   (`evaluator`, `position`)

pub mod atomic;
pub mod evaluator;
pub mod node;
pub mod position;
pub mod slot;
pub mod stats;

pub use evaluator::{Ensemble, EvalError, Evaluator, NetOutput, UniformEvaluator};
pub use node::{LeafEval, Node, NodeStatus, VIRTUAL_LOSS_COUNT};
pub use position::{Position, StaticPosition};
pub use slot::ChildSlot;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
