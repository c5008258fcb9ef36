//! Pipeline orchestrator — the wizard's state machine.
//!
//! [`PipelineOrchestrator`] owns the [`SharedState`] and drives the fixed
//! generation pipeline in response to user intents forwarded by the
//! presentation layer:
//!
//! ```text
//! request_script(topic)  ──▶ GenerateScript    ──▶ ScriptReady
//! request_previews()     ──▶ FetchPreviews     ──▶ PreviewsReady
//! select_candidate(..)   ──▶ (local)           ──▶ SelectionsComplete
//! request_downloads()    ──▶ DownloadSelected  ──▶ DownloadsComplete
//! choose_voice(..)       ──▶ (local)           ──▶ VoiceSelected
//! request_audio()        ──▶ GenerateAudio     ──▶ AudioReady
//! request_video()        ──▶ GenerateVideo     ──▶ VideoReady
//! ```
//!
//! Every remote transition follows the same shape: check the gate and build
//! the request under the lock, mark the operation in flight, release the
//! lock, await the invoker, then take the lock once more to merge the
//! response and recompute the stage.  The lock is never held across the
//! await, and the merge is atomic with respect to every other transition.
//!
//! On a failed call the stage stays at its last successfully completed
//! value, the sub-status becomes `Failed`, and the error message is retained
//! for display; the user retries the same transition or calls
//! [`reset`](PipelineOrchestrator::reset).  At most one operation may be in
//! flight per project: any transition attempted while one is running is
//! rejected with [`PipelineError::OperationInProgress`], never queued.

use std::sync::Arc;

use thiserror::Error;

use crate::project::model::ModelError;
use crate::project::{gates, NarrationVoice, Project};
use crate::remote::invoker::RemoteError;
use crate::remote::wire::{
    AudioRequest, DownloadRequest, PreviewRequest, ScriptRequest, VideoRequest,
};
use crate::remote::StageInvoker;

use super::stage::{OpStatus, SharedState, Stage, WizardState};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Errors surfaced by orchestrator transitions.
///
/// The first three variants are stage-call outcomes: the stage is preserved,
/// the sub-status becomes `Failed`, and the message is retained for display.
/// The last three are synchronous local rejections that leave the project
/// untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Transport-level failure, including timeouts.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The generation service answered with a non-success status code.
    #[error("generation service returned status {0}")]
    ServiceError(u16),

    /// The response could not be decoded or violated a model invariant.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A stage gate failed; no remote call was made.
    #[error("precondition not met: {0}")]
    PreconditionNotMet(&'static str),

    /// A user choice outside the valid set (candidate or voice).
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Another transition is already running for this project.
    #[error("another operation is already in flight")]
    OperationInProgress,
}

impl From<RemoteError> for PipelineError {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::Network(msg) => PipelineError::NetworkFailure(msg),
            RemoteError::Timeout => PipelineError::NetworkFailure("request timed out".into()),
            RemoteError::Service(status) => PipelineError::ServiceError(status),
            RemoteError::Malformed(msg) => PipelineError::MalformedResponse(msg),
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::MalformedResponse(msg) => PipelineError::MalformedResponse(msg),
            ModelError::InvalidSelection(msg) => PipelineError::InvalidSelection(msg),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the generation pipeline for one wizard session.
///
/// Cheap to clone — clones share the same [`SharedState`] and invoker, which
/// is how the presentation layer and concurrent callers address the same
/// session.
#[derive(Clone)]
pub struct PipelineOrchestrator {
    state: SharedState,
    invoker: Arc<dyn StageInvoker>,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator over `state`, issuing remote calls through
    /// `invoker`.
    pub fn new(state: SharedState, invoker: Arc<dyn StageInvoker>) -> Self {
        Self { state, invoker }
    }

    /// Handle to the shared state for the presentation layer.
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    // -----------------------------------------------------------------------
    // Remote transitions
    // -----------------------------------------------------------------------

    /// Generate the script for `topic`.  Legal only from [`Stage::Idle`]
    /// (including after a failed attempt); the topic — possibly edited — is
    /// stored before the call so it survives a failure for retry.
    pub async fn request_script(&self, topic: &str) -> Result<(), PipelineError> {
        let (request, epoch) = self.begin(|st| {
            if st.project.stage() != Stage::Idle {
                return Err(PipelineError::PreconditionNotMet(
                    "a script already exists; reset to start a new session",
                ));
            }
            let topic = topic.trim();
            if topic.is_empty() {
                return Err(PipelineError::PreconditionNotMet("topic must not be empty"));
            }
            st.project.set_topic(topic);
            Ok(ScriptRequest {
                topic: topic.to_string(),
            })
        })?;

        log::info!("pipeline: generating script for topic {:?}", request.topic);
        let outcome = self.invoker.generate_script(&request).await;
        self.resolve(epoch, outcome, Project::apply_script_result)
    }

    /// Fetch preview candidates for every scene.  Re-invocable: re-running
    /// replaces each scene's candidate list and clears selections that are
    /// no longer valid.  Locked once the visuals have been downloaded.
    pub async fn request_previews(&self) -> Result<(), PipelineError> {
        let (request, epoch) = self.begin(|st| {
            if !gates::can_fetch_previews(&st.project) {
                return Err(PipelineError::PreconditionNotMet(
                    "the script has not been generated yet",
                ));
            }
            if st.project.stage() >= Stage::DownloadsComplete {
                return Err(PipelineError::PreconditionNotMet(
                    "visuals are already downloaded; reset to search again",
                ));
            }
            Ok(PreviewRequest::from_project(&st.project))
        })?;

        log::info!(
            "pipeline: fetching preview candidates for {} scenes",
            request.scenes.len()
        );
        let outcome = self.invoker.fetch_previews(&request).await;
        self.resolve(epoch, outcome, Project::apply_preview_result)
    }

    /// Materialize the selected candidate of every scene.  Legal only once
    /// every scene has a selection.
    pub async fn request_downloads(&self) -> Result<(), PipelineError> {
        const GATE: &str = "every scene needs a selected visual first";
        let (request, epoch) = self.begin(|st| {
            if !gates::can_download_selected(&st.project) {
                return Err(PipelineError::PreconditionNotMet(GATE));
            }
            DownloadRequest::from_project(&st.project)
                .ok_or(PipelineError::PreconditionNotMet(GATE))
        })?;

        log::info!("pipeline: downloading {} selected visuals", request.scenes.len());
        let outcome = self.invoker.download_selected(&request).await;
        self.resolve(epoch, outcome, Project::apply_download_result)
    }

    /// Synthesize the narration audio.  Legal only once a voice is chosen
    /// and every visual is downloaded.
    pub async fn request_audio(&self) -> Result<(), PipelineError> {
        const GATE: &str = "choose a narration voice after downloading visuals";
        let (request, epoch) = self.begin(|st| {
            if !gates::can_generate_audio(&st.project) {
                return Err(PipelineError::PreconditionNotMet(GATE));
            }
            AudioRequest::from_project(&st.project).ok_or(PipelineError::PreconditionNotMet(GATE))
        })?;

        log::info!(
            "pipeline: generating narration audio with voice {}",
            request.narration_voice
        );
        let outcome = self.invoker.generate_audio(&request).await;
        self.resolve(epoch, outcome, Project::apply_audio_result)
    }

    /// Render the final video.  Legal only once the narration audio exists
    /// and every visual is downloaded.  Success is the terminal stage.
    pub async fn request_video(&self) -> Result<(), PipelineError> {
        const GATE: &str = "narration audio and downloaded visuals are required first";
        let (request, epoch) = self.begin(|st| {
            if !gates::can_generate_video(&st.project) {
                return Err(PipelineError::PreconditionNotMet(GATE));
            }
            VideoRequest::from_project(&st.project).ok_or(PipelineError::PreconditionNotMet(GATE))
        })?;

        log::info!("pipeline: rendering final video");
        let outcome = self.invoker.generate_video(&request).await;
        self.resolve(epoch, outcome, Project::apply_video_result)
    }

    // -----------------------------------------------------------------------
    // Local transitions
    // -----------------------------------------------------------------------

    /// Pick a preview candidate for one scene.  Pure local mutation, no
    /// remote call; legal between the preview and download stages.
    pub fn select_candidate(
        &self,
        scene_index: usize,
        candidate: &str,
    ) -> Result<(), PipelineError> {
        let mut st = self.state.lock().unwrap();
        if st.status.is_busy() {
            return Err(PipelineError::OperationInProgress);
        }
        if st.project.stage() < Stage::PreviewsReady {
            return Err(PipelineError::PreconditionNotMet(
                "previews have not been fetched yet",
            ));
        }
        if st.project.stage() >= Stage::DownloadsComplete {
            return Err(PipelineError::PreconditionNotMet(
                "selections are locked once visuals are downloaded",
            ));
        }
        st.project.select_candidate(scene_index, candidate)?;
        log::debug!(
            "pipeline: scene {scene_index} selection set, stage is now {}",
            st.project.stage().label()
        );
        Ok(())
    }

    /// Drop one scene's selection, moving the stage back to
    /// [`Stage::PreviewsReady`] if selections were complete.
    pub fn clear_selection(&self, scene_index: usize) -> Result<(), PipelineError> {
        let mut st = self.state.lock().unwrap();
        if st.status.is_busy() {
            return Err(PipelineError::OperationInProgress);
        }
        if st.project.stage() < Stage::PreviewsReady {
            return Err(PipelineError::PreconditionNotMet(
                "previews have not been fetched yet",
            ));
        }
        if st.project.stage() >= Stage::DownloadsComplete {
            return Err(PipelineError::PreconditionNotMet(
                "selections are locked once visuals are downloaded",
            ));
        }
        st.project.clear_selection(scene_index)?;
        Ok(())
    }

    /// Choose the narration voice.  Pure local mutation; the identifier must
    /// belong to the fixed voice set.
    pub fn choose_voice(&self, voice_id: &str) -> Result<(), PipelineError> {
        let mut st = self.state.lock().unwrap();
        if st.status.is_busy() {
            return Err(PipelineError::OperationInProgress);
        }
        if st.project.stage() < Stage::DownloadsComplete {
            return Err(PipelineError::PreconditionNotMet(
                "visuals must be downloaded before choosing a voice",
            ));
        }
        let voice = NarrationVoice::from_id(voice_id).ok_or_else(|| {
            PipelineError::InvalidSelection(format!("unknown narration voice {voice_id:?}"))
        })?;
        st.project.choose_voice(voice);
        log::debug!("pipeline: narration voice set to {voice}");
        Ok(())
    }

    /// Discard the session and return to [`Stage::Idle`].  Legal from any
    /// state; a remote call still in flight has its eventual result
    /// discarded instead of merged.
    pub fn reset(&self) {
        let mut st = self.state.lock().unwrap();
        st.project = Project::new();
        st.status = OpStatus::Idle;
        st.last_error = None;
        st.epoch = st.epoch.wrapping_add(1);
        log::info!("pipeline: session reset");
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Gate-check and build the request under the lock, then mark the
    /// operation in flight.  Returns the request together with the session
    /// epoch it was issued under.
    fn begin<R>(
        &self,
        build: impl FnOnce(&mut WizardState) -> Result<R, PipelineError>,
    ) -> Result<(R, u64), PipelineError> {
        let mut st = self.state.lock().unwrap();
        if st.status.is_busy() {
            return Err(PipelineError::OperationInProgress);
        }
        let request = build(&mut st)?;
        st.status = OpStatus::InFlight;
        st.last_error = None;
        Ok((request, st.epoch))
    }

    /// Merge a resolved call under the lock.  A result arriving after a
    /// reset (epoch mismatch) is discarded without touching the fresh
    /// project.
    fn resolve<T>(
        &self,
        epoch: u64,
        outcome: Result<T, RemoteError>,
        merge: impl FnOnce(&mut Project, T) -> Result<(), ModelError>,
    ) -> Result<(), PipelineError> {
        let mut st = self.state.lock().unwrap();
        if st.epoch != epoch {
            log::debug!("pipeline: discarding result that resolved after a reset");
            return Ok(());
        }

        let merged = outcome
            .map_err(PipelineError::from)
            .and_then(|response| merge(&mut st.project, response).map_err(PipelineError::from));

        match merged {
            Ok(()) => {
                st.status = OpStatus::Succeeded;
                log::debug!("pipeline: stage is now {}", st.project.stage().label());
                Ok(())
            }
            Err(err) => {
                log::warn!("pipeline: stage call failed: {err}");
                st.status = OpStatus::Failed;
                st.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
