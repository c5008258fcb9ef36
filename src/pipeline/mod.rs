//! Pipeline orchestration — the wizard's state machine.
//!
//! This module is the core of the crate:
//! * [`Stage`] / [`OpStatus`] — the strictly ordered pipeline stage and the
//!   orthogonal per-operation sub-status.
//! * [`WizardState`] / [`SharedState`] — the single source of truth the
//!   presentation layer renders from.
//! * [`PipelineOrchestrator`] — sequences stage transitions, invokes the
//!   remote services, and merges their responses into the project.
//! * [`PipelineError`] — the full error taxonomy at the orchestrator
//!   boundary.

pub mod orchestrator;
pub mod stage;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use orchestrator::{PipelineError, PipelineOrchestrator};
pub use stage::{new_shared_state, OpStatus, SharedState, Stage, WizardState};
