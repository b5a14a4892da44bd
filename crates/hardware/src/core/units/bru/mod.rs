//! Branch prediction boundary.
//!
//! The predictor is an external collaborator: the frontend asks it for a
//! guess when it fetches a branch or jump and the controller reports the
//! realized `(pc, taken, target)` on every such commit.

pub use self::branch_predictor::BranchPredictor;
pub use self::static_bp::StaticPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Static branch predictor (not taken, direct jumps taken).
pub mod static_bp;
