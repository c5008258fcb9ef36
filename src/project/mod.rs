//! Project model, narration voices, and stage gates.
//!
//! [`Project`] is the session entity; [`gates`] holds the pure predicates
//! that decide whether each remote stage may run against a given snapshot.

pub mod gates;
pub mod model;
pub mod voice;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use model::{ModelError, Project, Scene};
pub use voice::NarrationVoice;
