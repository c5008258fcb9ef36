//! Stage gate evaluator — pure predicates over a [`Project`] snapshot.
//!
//! The gates are the sole authority on whether a remote stage may be
//! attempted.  The orchestrator consults them before issuing any call and
//! refuses with `PreconditionNotMet` (without invoking the remote service)
//! when one fails.  None of these functions has side effects.

use crate::project::Project;

/// True once the script stage has completed (the scene list exists).
pub fn can_fetch_previews(project: &Project) -> bool {
    !project.scenes().is_empty()
}

/// True when every scene has a selected candidate.
pub fn can_download_selected(project: &Project) -> bool {
    !project.scenes().is_empty()
        && project.scenes().iter().all(|s| s.selected_candidate().is_some())
}

/// True when a narration voice is chosen and every scene's visual has been
/// downloaded.
pub fn can_generate_audio(project: &Project) -> bool {
    project.narration_voice().is_some() && downloads_complete(project)
}

/// True when the narration audio exists and every scene's visual has been
/// downloaded.
pub fn can_generate_video(project: &Project) -> bool {
    project.narration_artifact().is_some() && downloads_complete(project)
}

fn downloads_complete(project: &Project) -> bool {
    !project.scenes().is_empty()
        && project.scenes().iter().all(|s| s.downloaded_asset().is_some())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
