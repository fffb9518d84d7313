//! Voice Bridge - persist the assistant's voice and configure the vision assistant.
//!
//! Subcommands read and write the voice preference file, serve it over HTTP, or build the
//! vision assistant persona and hand it to the agent runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use voice_bridge::assistant::{DryRunRuntime, VisionAssistant};
use voice_bridge::config::{AppConfig, AssistantArgs, Command, ServerArgs, print_voices};
use voice_bridge::preference::VoicePreferenceStore;
use voice_bridge::server::{AppState, HttpServer};

/// Initialize logging on stderr so command output on stdout stays clean.
///
/// Respects RUST_LOG, falls back to the verbose flag, defaults to info.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn wait_for_shutdown() {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("🛑 Received Ctrl+C, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                    }
                    Err(e) => {
                        warn!("Failed to register SIGTERM handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("🛑 Received SIGTERM, shutting down...");
        }
    }
}

/// Serve the preference store over HTTP until a shutdown signal arrives.
async fn run_server(args: &ServerArgs, store: VoicePreferenceStore) -> Result<()> {
    let state = AppState::new(Arc::new(store));
    HttpServer::new(args.server_config(), state)
        .run_with_shutdown(wait_for_shutdown())
        .await
        .with_context(|| format!("HTTP server failed on {}:{}", args.host, args.port))
}

/// Build the vision assistant and run one job against the dry-run runtime.
async fn run_assistant(args: &AssistantArgs, store: &VoicePreferenceStore) -> Result<()> {
    let persona = args.persona(store)?;

    // The persona voice is independent of the stored preference unless --voice-from-store is given.
    if !args.voice_from_store {
        let stored = store.load();
        if stored != persona.voice {
            warn!("Assistant voice {} differs from stored preference {}; pass --voice-from-store to use it", persona.voice, stored);
        }
    }

    let assistant = VisionAssistant::new(persona, args.input_options())?;
    let mut runtime = DryRunRuntime::new(args.livekit_url.clone());
    assistant.run(&mut runtime).await?;

    info!("✅ Assistant session configured ({} directives)", runtime.directives().len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let config = AppConfig::from_args();

    init_logging(config.verbose);

    let store = config.store.open_store();

    match config.command.as_ref().unwrap_or(&Command::Get) {
        Command::Server(args) => {
            config.log_config();
            run_server(args, store).await?
        }
        Command::Set { voice } => {
            store.save(*voice)?;
            println!("Voice set to: {}", voice);
        }
        Command::Get => println!("Current voice: {}", store.load()),
        Command::List => print_voices(),
        Command::Assistant(args) => {
            config.log_config();
            run_assistant(args, &store).await?
        }
    }

    Ok(())
}
