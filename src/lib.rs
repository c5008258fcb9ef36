//! reelwright — guided short-video generation wizard.
//!
//! A client for a remote generation service that walks the user through the
//! fixed pipeline
//!
//! ```text
//! topic ─▶ script ─▶ visual previews ─▶ selection ─▶ download
//!       ─▶ narration voice ─▶ audio ─▶ final video
//! ```
//!
//! The core of the crate is the pipeline orchestration state machine in
//! [`pipeline`]: it tracks the stage the session is in, gates every
//! transition on the data produced so far, and turns remote failures into
//! retryable, stage-preserving errors.  [`project`] holds the session data
//! model and the stage gates, [`remote`] the wire contract and the HTTP
//! invoker, [`app`] a line-oriented presentation skin, and [`config`] the
//! TOML-backed settings.

pub mod app;
pub mod config;
pub mod pipeline;
pub mod project;
pub mod remote;
