//! Pipeline stages and shared wizard state.
//!
//! [`Stage`] is the strictly ordered progress marker of the generation
//! pipeline; [`OpStatus`] is the transient sub-status of the current remote
//! operation, orthogonal to the stage.  [`WizardState`] is the single source
//! of truth for everything the presentation layer needs: the [`Project`],
//! the current stage/sub-status pair, and any error message.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<WizardState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::project::Project;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Stages of the generation wizard, in pipeline order.
///
/// The transitions are:
///
/// ```text
/// Idle ──script──▶ ScriptReady ──previews──▶ PreviewsReady
///      ──every scene selected──▶ SelectionsComplete
///      ──download──▶ DownloadsComplete ──voice──▶ VoiceSelected
///      ──audio──▶ AudioReady ──video──▶ VideoReady   (terminal)
///
/// deselect / re-fetch previews ──▶ back to PreviewsReady
/// any remote failure ──▶ stage unchanged, sub-status Failed
/// reset ──▶ Idle
/// ```
///
/// `Ord` follows declaration order, so gate checks can compare stages
/// directly (`stage >= Stage::PreviewsReady`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// No script yet; waiting for the user's topic.
    Idle,

    /// The script writer produced title, description, and the scene list.
    ScriptReady,

    /// Every scene has a candidate list to choose from.
    PreviewsReady,

    /// Every scene has a selected candidate.
    SelectionsComplete,

    /// Every selected candidate has been materialized; selections are
    /// locked.
    DownloadsComplete,

    /// A narration voice has been chosen.
    VoiceSelected,

    /// The narration audio artifact exists.
    AudioReady,

    /// The final video artifact exists.  Terminal success state.
    VideoReady,
}

impl Stage {
    /// A short human-readable label suitable for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::ScriptReady => "script ready",
            Stage::PreviewsReady => "previews ready",
            Stage::SelectionsComplete => "selections complete",
            Stage::DownloadsComplete => "downloads complete",
            Stage::VoiceSelected => "voice selected",
            Stage::AudioReady => "audio ready",
            Stage::VideoReady => "video ready",
        }
    }

    /// Returns `true` for the terminal success state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::VideoReady)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Idle
    }
}

// ---------------------------------------------------------------------------
// OpStatus
// ---------------------------------------------------------------------------

/// Progress of the current (or most recent) operation, orthogonal to
/// [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    /// Nothing pending.
    Idle,

    /// A remote call is running; all other transitions are rejected until it
    /// resolves.
    InFlight,

    /// The last operation completed and its result was merged.
    Succeeded,

    /// The last operation failed; the stage was left at its previous value
    /// and the error message is retained for display.
    Failed,
}

impl OpStatus {
    /// Returns `true` while a remote call is running.
    ///
    /// The presentation layer uses this to disable user actions while busy.
    pub fn is_busy(&self) -> bool {
        matches!(self, OpStatus::InFlight)
    }

    /// A short human-readable label suitable for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            OpStatus::Idle => "idle",
            OpStatus::InFlight => "working",
            OpStatus::Succeeded => "ok",
            OpStatus::Failed => "failed",
        }
    }
}

impl Default for OpStatus {
    fn default() -> Self {
        OpStatus::Idle
    }
}

// ---------------------------------------------------------------------------
// WizardState
// ---------------------------------------------------------------------------

/// Shared wizard state — the single source of truth for the presentation
/// layer.
///
/// Held behind [`SharedState`] (`Arc<Mutex<WizardState>>`).  The pipeline
/// orchestrator mutates it; the presentation layer reads it to render.
#[derive(Debug, Default)]
pub struct WizardState {
    /// The session's project, mutated only through orchestrator transitions.
    pub project: Project,

    /// Sub-status of the current operation.
    pub status: OpStatus,

    /// Human-readable message for the last failed operation.
    ///
    /// `None` while no failure is pending display.
    pub last_error: Option<String>,

    /// Session generation counter, bumped by reset.  A remote result that
    /// resolves against an older epoch is discarded instead of being merged
    /// into the fresh project.
    pub epoch: u64,
}

impl WizardState {
    /// Create the state for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`WizardState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<WizardState>>;

/// Construct a new [`SharedState`] wrapping a fresh [`WizardState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(WizardState::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
