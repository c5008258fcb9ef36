//! Terminal wizard — line-oriented presentation skin over the orchestrator.
//!
//! The skin owns no pipeline state of its own: every line the user types is
//! parsed into a [`Command`], forwarded as an intent to
//! [`PipelineOrchestrator`], and followed by a status block rendered from
//! the shared [`WizardState`].  Scene and candidate numbers are 1-based on
//! the command line and resolved to candidate references before they reach
//! the orchestrator.
//!
//! # Session walkthrough
//!
//! ```text
//! > script ocean currents        stage: script ready
//! > previews                     stage: previews ready
//! > select 1 2                   pick candidate 2 for scene 1
//! > select 2 1
//! > select 3 4                   stage: selections complete
//! > download                     stage: downloads complete
//! > voice jess                   stage: voice selected
//! > audio                        stage: audio ready
//! > video                        stage: video ready — final artifact shown
//! ```

use std::io::{self, BufRead, Write};

use tokio::runtime::Runtime;

use crate::config::AppConfig;
use crate::pipeline::{OpStatus, PipelineError, PipelineOrchestrator, WizardState};
use crate::project::{NarrationVoice, Scene};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed user intent.  Scene and candidate numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Script(String),
    Previews,
    Select { scene: usize, pick: usize },
    Deselect { scene: usize },
    Download,
    Voice(Option<String>),
    Audio,
    Video,
    Status,
    Reset,
    Help,
    Quit,
}

/// Parse one input line.  Returns `None` for an empty or unrecognised line.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let mut parts = trimmed.split_whitespace();
    let head = parts.next()?;

    match head {
        "script" => {
            let topic = trimmed.strip_prefix("script").unwrap_or("").trim();
            Some(Command::Script(topic.to_string()))
        }
        "previews" => Some(Command::Previews),
        "select" => {
            let scene = parts.next()?.parse().ok()?;
            let pick = parts.next()?.parse().ok()?;
            Some(Command::Select { scene, pick })
        }
        "deselect" => {
            let scene = parts.next()?.parse().ok()?;
            Some(Command::Deselect { scene })
        }
        "download" => Some(Command::Download),
        "voice" => Some(Command::Voice(parts.next().map(str::to_string))),
        "audio" => Some(Command::Audio),
        "video" => Some(Command::Video),
        "status" => Some(Command::Status),
        "reset" => Some(Command::Reset),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the status block shown after every command.
pub fn render_status(state: &WizardState) -> String {
    let project = &state.project;
    let mut out = format!("stage: {}", project.stage().label());
    if state.status.is_busy() {
        out.push_str(" (working)");
    } else if state.status == OpStatus::Failed {
        out.push_str(" (last call failed)");
    }
    if let Some(err) = &state.last_error {
        out.push_str(&format!("\n  error: {err}"));
    }
    if let Some(title) = project.title() {
        out.push_str(&format!("\n  title: {title}"));
        if let Some(duration) = project.estimated_duration() {
            out.push_str(&format!(" ({duration})"));
        }
    }
    for (index, scene) in project.scenes().iter().enumerate() {
        out.push_str(&format!("\n  scene {}: {}", index + 1, scene.narration_text()));
        if !scene.preview_candidates().is_empty() {
            out.push_str(&format!(" — {} previews", scene.preview_candidates().len()));
        }
        if let Some(selected) = scene.selected_candidate() {
            if let Some(pos) = scene.preview_candidates().iter().position(|c| c == selected) {
                out.push_str(&format!(", selected #{}", pos + 1));
            }
        }
        if scene.downloaded_asset().is_some() {
            out.push_str(", downloaded");
        }
    }
    if let Some(voice) = project.narration_voice() {
        out.push_str(&format!("\n  voice: {voice}"));
    }
    if let Some(audio) = project.narration_artifact() {
        out.push_str(&format!("\n  narration: {audio}"));
    }
    if let Some(video) = project.final_artifact() {
        out.push_str(&format!("\n  final video: {video}"));
    }
    out
}

fn print_help() {
    let voices = NarrationVoice::ALL
        .iter()
        .map(|v| v.id())
        .collect::<Vec<_>>()
        .join(", ");
    println!("commands:");
    println!("  script <topic>      generate the script for a topic");
    println!("  previews            fetch visual candidates for every scene");
    println!("  select <scene> <n>  pick candidate n for a scene");
    println!("  deselect <scene>    drop a scene's selection");
    println!("  download            download the selected visuals");
    println!("  voice [name]        choose the narration voice ({voices})");
    println!("  audio               generate the narration audio");
    println!("  video               render the final video");
    println!("  status              show the session status");
    println!("  reset               discard the session and start over");
    println!("  quit                exit");
}

fn print_prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Resolve a 1-based (scene, candidate) pair to the candidate reference.
fn resolve_candidate(
    orchestrator: &PipelineOrchestrator,
    scene: usize,
    pick: usize,
) -> Result<String, PipelineError> {
    if scene == 0 || pick == 0 {
        return Err(PipelineError::InvalidSelection(
            "scene and candidate numbers start at 1".into(),
        ));
    }
    let state = orchestrator.state();
    let st = state.lock().unwrap();
    let candidates = st
        .project
        .scenes()
        .get(scene - 1)
        .map(Scene::preview_candidates)
        .ok_or_else(|| PipelineError::InvalidSelection(format!("scene {scene} does not exist")))?;
    candidates.get(pick - 1).cloned().ok_or_else(|| {
        PipelineError::InvalidSelection(format!("scene {scene} has no candidate {pick}"))
    })
}

/// Forward one command to the orchestrator, blocking on remote transitions.
fn dispatch(
    orchestrator: &PipelineOrchestrator,
    rt: &Runtime,
    command: Command,
    default_voice: &str,
) -> Result<(), PipelineError> {
    match command {
        Command::Script(topic) => rt.block_on(orchestrator.request_script(&topic)),
        Command::Previews => rt.block_on(orchestrator.request_previews()),
        Command::Select { scene, pick } => {
            let candidate = resolve_candidate(orchestrator, scene, pick)?;
            orchestrator.select_candidate(scene - 1, &candidate)
        }
        Command::Deselect { scene } => {
            if scene == 0 {
                return Err(PipelineError::InvalidSelection(
                    "scene numbers start at 1".into(),
                ));
            }
            orchestrator.clear_selection(scene - 1)
        }
        Command::Download => rt.block_on(orchestrator.request_downloads()),
        Command::Voice(choice) => {
            orchestrator.choose_voice(choice.as_deref().unwrap_or(default_voice))
        }
        Command::Audio => rt.block_on(orchestrator.request_audio()),
        Command::Video => rt.block_on(orchestrator.request_video()),
        Command::Reset => {
            orchestrator.reset();
            Ok(())
        }
        Command::Status | Command::Help | Command::Quit => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

/// Run the wizard loop until `quit` or end of input.
pub fn run(
    orchestrator: PipelineOrchestrator,
    rt: &Runtime,
    config: &AppConfig,
) -> anyhow::Result<()> {
    println!("reelwright — guided video generation");
    print_help();
    print_prompt()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                println!("unrecognised command — type `help`");
            }
            print_prompt()?;
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            command => {
                if let Err(err) = dispatch(&orchestrator, rt, command, &config.wizard.default_voice)
                {
                    println!("error: {err}");
                }
                let state = orchestrator.state();
                let st = state.lock().unwrap();
                println!("{}", render_status(&st));
            }
        }
        print_prompt()?;
    }

    log::info!("wizard: input closed, exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::wire::{ScriptResponse, ScriptScene};

    // ---- parse_command ---

    #[test]
    fn parses_script_with_multiword_topic() {
        assert_eq!(
            parse_command("script ocean currents explained"),
            Some(Command::Script("ocean currents explained".into()))
        );
    }

    #[test]
    fn parses_bare_script_as_empty_topic() {
        // the orchestrator rejects the empty topic with a useful message
        assert_eq!(parse_command("script"), Some(Command::Script(String::new())));
    }

    #[test]
    fn parses_select_with_scene_and_candidate() {
        assert_eq!(
            parse_command("select 2 4"),
            Some(Command::Select { scene: 2, pick: 4 })
        );
    }

    #[test]
    fn rejects_select_with_missing_or_bad_numbers() {
        assert_eq!(parse_command("select 2"), None);
        assert_eq!(parse_command("select two four"), None);
    }

    #[test]
    fn parses_voice_with_and_without_argument() {
        assert_eq!(parse_command("voice jess"), Some(Command::Voice(Some("jess".into()))));
        assert_eq!(parse_command("voice"), Some(Command::Voice(None)));
    }

    #[test]
    fn quit_and_exit_are_synonyms() {
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn blank_and_unknown_lines_parse_to_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("frobnicate"), None);
    }

    // ---- render_status ---

    #[test]
    fn renders_fresh_state() {
        let state = WizardState::new();
        let rendered = render_status(&state);
        assert_eq!(rendered, "stage: idle");
    }

    #[test]
    fn renders_title_scenes_and_error() {
        let mut state = WizardState::new();
        state
            .project
            .apply_script_result(ScriptResponse {
                title: "Rivers of the Sea".into(),
                description: "d".into(),
                estimated_duration: "45 seconds".into(),
                scenes: vec![ScriptScene {
                    narration_text: "Beneath the surface.".into(),
                    search_keywords: vec!["ocean".into()],
                }],
            })
            .unwrap();
        state.status = OpStatus::Failed;
        state.last_error = Some("network failure: request timed out".into());

        let rendered = render_status(&state);
        assert!(rendered.contains("stage: script ready (last call failed)"));
        assert!(rendered.contains("error: network failure: request timed out"));
        assert!(rendered.contains("title: Rivers of the Sea (45 seconds)"));
        assert!(rendered.contains("scene 1: Beneath the surface."));
    }
}
