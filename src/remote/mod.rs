//! Remote operation invoker and wire contract for the generation services.
//!
//! * [`wire`] — one canonical JSON request/response shape per stage.
//! * [`StageInvoker`] — async trait for a single request/response exchange;
//!   the orchestrator only depends on this seam.
//! * [`HttpInvoker`] — the production implementation over `reqwest`.

pub mod invoker;
pub mod wire;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use invoker::{HttpInvoker, RemoteError, StageInvoker, StageOp};
