//! Project model — the data entity for one generation session.
//!
//! A [`Project`] is created empty when the user starts a session, mutated in
//! place by each stage's successful response, and discarded on reset.  All
//! fields are private; reads go through accessors and writes through one
//! mutation entry point per stage, so the model invariants are enforced in a
//! single place:
//!
//! * `scenes` is non-empty once the script stage completes, and its length
//!   and order never change afterwards.
//! * `selected_candidate`, when set, is an element of that scene's
//!   `preview_candidates`.
//! * `title` / `description` / `estimated_duration` and the per-scene script
//!   fields are written once, by the script stage.
//!
//! Stage *ordering* (which mutator may run when) is the orchestrator's job;
//! the model validates the *shape* of what the external services returned
//! and fails with [`ModelError::MalformedResponse`] when a response cannot
//! satisfy the invariants above.

use thiserror::Error;

use crate::pipeline::Stage;
use crate::project::NarrationVoice;
use crate::remote::wire::{
    AudioResponse, DownloadResponse, PreviewResponse, ScriptResponse, VideoResponse,
};

// ---------------------------------------------------------------------------
// ModelError
// ---------------------------------------------------------------------------

/// Errors raised by the project model's mutation entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The external service returned data that cannot satisfy the model
    /// invariants (wrong scene count, empty artifact reference, …).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A user choice outside the valid set for the target scene.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// One scene of the planned video, index-addressed within its [`Project`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    narration_text: String,
    search_keywords: Vec<String>,
    preview_candidates: Vec<String>,
    selected_candidate: Option<String>,
    downloaded_asset: Option<String>,
}

impl Scene {
    /// The line spoken over this scene.
    pub fn narration_text(&self) -> &str {
        &self.narration_text
    }

    /// Terms used to find visual candidates for this scene.
    pub fn search_keywords(&self) -> &[String] {
        &self.search_keywords
    }

    /// Candidate media references from the preview stage; empty until then.
    pub fn preview_candidates(&self) -> &[String] {
        &self.preview_candidates
    }

    /// The candidate the user picked, if any.
    pub fn selected_candidate(&self) -> Option<&str> {
        self.selected_candidate.as_deref()
    }

    /// The materialized asset reference, once the download stage has run.
    pub fn downloaded_asset(&self) -> Option<&str> {
        self.downloaded_asset.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// The single source of truth for one wizard session.
#[derive(Debug, Clone, Default)]
pub struct Project {
    topic: String,
    title: Option<String>,
    description: Option<String>,
    estimated_duration: Option<String>,
    scenes: Vec<Scene>,
    narration_voice: Option<NarrationVoice>,
    narration_artifact: Option<String>,
    final_artifact: Option<String>,
    stage: Stage,
}

impl Project {
    /// Create an empty project for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    // -- accessors ----------------------------------------------------------

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn estimated_duration(&self) -> Option<&str> {
        self.estimated_duration.as_deref()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn narration_voice(&self) -> Option<NarrationVoice> {
        self.narration_voice
    }

    pub fn narration_artifact(&self) -> Option<&str> {
        self.narration_artifact.as_deref()
    }

    pub fn final_artifact(&self) -> Option<&str> {
        self.final_artifact.as_deref()
    }

    /// The stage this session has successfully completed up to.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    // -- mutation entry points ----------------------------------------------

    /// Record the user's topic.  Kept on the project so a failed script call
    /// can be retried with the topic intact.
    pub fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    /// Merge the script-writer response: title, description, duration, and
    /// the fixed scene list.
    pub fn apply_script_result(&mut self, response: ScriptResponse) -> Result<(), ModelError> {
        if response.scenes.is_empty() {
            return Err(ModelError::MalformedResponse(
                "script response contained no scenes".into(),
            ));
        }
        for (index, scene) in response.scenes.iter().enumerate() {
            if scene.narration_text.trim().is_empty() {
                return Err(ModelError::MalformedResponse(format!(
                    "scene {index} has no narration text"
                )));
            }
            if scene.search_keywords.is_empty() {
                return Err(ModelError::MalformedResponse(format!(
                    "scene {index} has no search keywords"
                )));
            }
        }

        self.title = Some(response.title);
        self.description = Some(response.description);
        self.estimated_duration = Some(response.estimated_duration);
        self.scenes = response
            .scenes
            .into_iter()
            .map(|scene| Scene {
                narration_text: scene.narration_text,
                search_keywords: scene.search_keywords,
                ..Scene::default()
            })
            .collect();
        self.stage = Stage::ScriptReady;
        Ok(())
    }

    /// Merge the media-search response, replacing each scene's candidate
    /// list.
    ///
    /// Re-running the preview stage is idempotent: a previously selected
    /// candidate survives only if it still appears in the new candidate set;
    /// a stale selection is cleared.  The stage is recomputed from the
    /// surviving selections.
    pub fn apply_preview_result(&mut self, response: PreviewResponse) -> Result<(), ModelError> {
        if response.scenes.len() != self.scenes.len() {
            return Err(ModelError::MalformedResponse(format!(
                "preview response has {} scenes, expected {}",
                response.scenes.len(),
                self.scenes.len()
            )));
        }

        for (scene, previews) in self.scenes.iter_mut().zip(response.scenes) {
            scene.preview_candidates = previews.preview_candidates;
            if let Some(selected) = &scene.selected_candidate {
                if !scene.preview_candidates.contains(selected) {
                    log::debug!("project: clearing stale selection {selected:?}");
                    scene.selected_candidate = None;
                }
            }
        }
        self.recompute_selection_stage();
        Ok(())
    }

    /// Pick a candidate for one scene.
    ///
    /// The candidate must be an element of that scene's current preview set.
    /// The stage is recomputed after every call: all scenes selected moves
    /// the session to [`Stage::SelectionsComplete`], otherwise it sits at
    /// [`Stage::PreviewsReady`].
    pub fn select_candidate(
        &mut self,
        scene_index: usize,
        candidate: &str,
    ) -> Result<(), ModelError> {
        let scene = self.scenes.get_mut(scene_index).ok_or_else(|| {
            ModelError::InvalidSelection(format!("scene index {scene_index} is out of range"))
        })?;
        if !scene.preview_candidates.iter().any(|c| c == candidate) {
            return Err(ModelError::InvalidSelection(format!(
                "candidate {candidate:?} is not among the previews for scene {scene_index}"
            )));
        }
        scene.selected_candidate = Some(candidate.to_string());
        self.recompute_selection_stage();
        Ok(())
    }

    /// Drop the selection for one scene; the stage recomputation may move
    /// the session back to [`Stage::PreviewsReady`].
    pub fn clear_selection(&mut self, scene_index: usize) -> Result<(), ModelError> {
        let scene = self.scenes.get_mut(scene_index).ok_or_else(|| {
            ModelError::InvalidSelection(format!("scene index {scene_index} is out of range"))
        })?;
        scene.selected_candidate = None;
        self.recompute_selection_stage();
        Ok(())
    }

    /// Merge the media-downloader response, recording each scene's
    /// materialized asset.  Selections are locked from this point on.
    pub fn apply_download_result(&mut self, response: DownloadResponse) -> Result<(), ModelError> {
        if response.scenes.len() != self.scenes.len() {
            return Err(ModelError::MalformedResponse(format!(
                "download response has {} scenes, expected {}",
                response.scenes.len(),
                self.scenes.len()
            )));
        }
        for (index, asset) in response.scenes.iter().enumerate() {
            if asset.downloaded_asset.trim().is_empty() {
                return Err(ModelError::MalformedResponse(format!(
                    "scene {index} download returned an empty asset reference"
                )));
            }
        }

        for (scene, asset) in self.scenes.iter_mut().zip(response.scenes) {
            scene.downloaded_asset = Some(asset.downloaded_asset);
        }
        self.stage = Stage::DownloadsComplete;
        Ok(())
    }

    /// Record the narration voice.  Advances the stage from
    /// [`Stage::DownloadsComplete`] to [`Stage::VoiceSelected`]; re-choosing
    /// later replaces the voice without regressing the stage (the audio
    /// stage can simply be re-run).
    pub fn choose_voice(&mut self, voice: NarrationVoice) {
        self.narration_voice = Some(voice);
        if self.stage == Stage::DownloadsComplete {
            self.stage = Stage::VoiceSelected;
        }
    }

    /// Merge the speech-synthesis response.
    pub fn apply_audio_result(&mut self, response: AudioResponse) -> Result<(), ModelError> {
        if response.narration_artifact.trim().is_empty() {
            return Err(ModelError::MalformedResponse(
                "audio response contained an empty artifact reference".into(),
            ));
        }
        self.narration_artifact = Some(response.narration_artifact);
        self.stage = Stage::AudioReady;
        Ok(())
    }

    /// Merge the video-renderer response — the terminal stage.
    pub fn apply_video_result(&mut self, response: VideoResponse) -> Result<(), ModelError> {
        if response.final_artifact.trim().is_empty() {
            return Err(ModelError::MalformedResponse(
                "video response contained an empty artifact reference".into(),
            ));
        }
        self.final_artifact = Some(response.final_artifact);
        self.stage = Stage::VideoReady;
        Ok(())
    }

    // -- helpers ------------------------------------------------------------

    fn recompute_selection_stage(&mut self) {
        self.stage = if self.scenes.iter().all(|s| s.selected_candidate.is_some()) {
            Stage::SelectionsComplete
        } else {
            Stage::PreviewsReady
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
