//! Resolution bookkeeping: the per-call context and its step history

pub mod context;
pub mod history;

pub use context::{ResolutionContext, ResolvingGuard};
pub use history::{ResolutionHistory, ResolutionStep, StepOutcome};
