//! Wire payloads for the generation-service contract.
//!
//! One canonical request/response shape per stage operation, exchanged as
//! JSON with snake_case fields.  Responses must preserve scene count and
//! order from the corresponding request; the project model treats any
//! mismatch as a malformed response rather than coalescing alternate shapes.
//!
//! The `from_project` constructors derive a request payload from the current
//! [`Project`] snapshot.  Builders that need data a gate guarantees (a chosen
//! voice, completed downloads) return `None` instead of panicking when that
//! data is absent.

use serde::{Deserialize, Serialize};

use crate::project::{NarrationVoice, Project};

// ---------------------------------------------------------------------------
// GenerateScript
// ---------------------------------------------------------------------------

/// Request body for the script-writer service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub topic: String,
}

/// One scene as produced by the script writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptScene {
    /// The line to be spoken over this scene.
    pub narration_text: String,
    /// Terms used to find visual candidates for this scene.
    pub search_keywords: Vec<String>,
}

/// Response body from the script-writer service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
    pub scenes: Vec<ScriptScene>,
}

// ---------------------------------------------------------------------------
// FetchPreviews
// ---------------------------------------------------------------------------

/// Per-scene search terms sent to the media-search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewQuery {
    pub search_keywords: Vec<String>,
}

/// Request body for the media-search service, aligned by index to the
/// project's scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub scenes: Vec<PreviewQuery>,
}

impl PreviewRequest {
    pub fn from_project(project: &Project) -> Self {
        Self {
            scenes: project
                .scenes()
                .iter()
                .map(|scene| PreviewQuery {
                    search_keywords: scene.search_keywords().to_vec(),
                })
                .collect(),
        }
    }
}

/// Candidate references found for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePreviews {
    pub preview_candidates: Vec<String>,
}

/// Response body from the media-search service, aligned by index to the
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub scenes: Vec<ScenePreviews>,
}

// ---------------------------------------------------------------------------
// DownloadSelected
// ---------------------------------------------------------------------------

/// The candidate the user picked for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadPick {
    pub selected_candidate: String,
}

/// Request body for the media-downloader service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub scenes: Vec<DownloadPick>,
}

impl DownloadRequest {
    /// `None` when any scene still lacks a selection.
    pub fn from_project(project: &Project) -> Option<Self> {
        let scenes = project
            .scenes()
            .iter()
            .map(|scene| {
                scene.selected_candidate().map(|candidate| DownloadPick {
                    selected_candidate: candidate.to_string(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { scenes })
    }
}

/// The materialized asset reference for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAsset {
    pub downloaded_asset: String,
}

/// Response body from the media-downloader service, aligned by index to the
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub scenes: Vec<SceneAsset>,
}

// ---------------------------------------------------------------------------
// GenerateAudio
// ---------------------------------------------------------------------------

/// One narration line sent to the speech synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationLine {
    pub narration_text: String,
}

/// Request body for the speech-synthesis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioRequest {
    pub scenes: Vec<NarrationLine>,
    pub narration_voice: NarrationVoice,
}

impl AudioRequest {
    /// `None` when no narration voice has been chosen yet.
    pub fn from_project(project: &Project) -> Option<Self> {
        let narration_voice = project.narration_voice()?;
        Some(Self {
            scenes: project
                .scenes()
                .iter()
                .map(|scene| NarrationLine {
                    narration_text: scene.narration_text().to_string(),
                })
                .collect(),
            narration_voice,
        })
    }
}

/// Response body from the speech-synthesis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioResponse {
    pub narration_artifact: String,
}

// ---------------------------------------------------------------------------
// GenerateVideo
// ---------------------------------------------------------------------------

/// The downloaded asset backing one scene of the final render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    pub downloaded_asset: String,
}

/// Request body for the video-renderer service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub scenes: Vec<AssetRef>,
    pub narration_artifact: String,
}

impl VideoRequest {
    /// `None` when the narration artifact or any scene's asset is missing.
    pub fn from_project(project: &Project) -> Option<Self> {
        let narration_artifact = project.narration_artifact()?.to_string();
        let scenes = project
            .scenes()
            .iter()
            .map(|scene| {
                scene.downloaded_asset().map(|asset| AssetRef {
                    downloaded_asset: asset.to_string(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            scenes,
            narration_artifact,
        })
    }
}

/// Response body from the video-renderer service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub final_artifact: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
