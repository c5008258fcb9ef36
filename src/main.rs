//! Application entry point — reelwright terminal wizard.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the HTTP stage invoker from config.
//! 5. Create the shared wizard state and the pipeline orchestrator.
//! 6. Run the terminal wizard loop until `quit`.

use std::sync::Arc;

use reelwright::{
    app,
    config::AppConfig,
    pipeline::{new_shared_state, PipelineOrchestrator},
    remote::{HttpInvoker, StageInvoker},
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("reelwright starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    log::info!("generation service at {}", config.api.base_url);

    // 3. Tokio runtime (remote stage calls are the only async work)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    // 4.–5. Invoker, shared state, orchestrator
    let invoker: Arc<dyn StageInvoker> = Arc::new(HttpInvoker::from_config(&config.api));
    let orchestrator = PipelineOrchestrator::new(new_shared_state(), invoker);

    // 6. Wizard loop (blocks the main thread until quit / EOF)
    app::run(orchestrator, &rt, &config)
}
