// ChatHelper entry point
// Wires configuration, the answer backend and the terminal view into the controller actor.

mod actors;
mod brain;
mod clipboard;
mod config;
mod error;
mod export;
mod fs_manager;
mod models;
mod render;
mod repl;
mod store;

#[cfg(test)]
mod tests;

use actors::mock::MockResponder;
use actors::remote::RemoteResponder;
use actors::supervisor::{ControllerHandle, ControllerOptions};
use clipboard::SystemClipboard;
use config::{AppConfig, LogFormat};
use render::terminal::{InputBuffer, TerminalView};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // Logs go to stderr so they never interleave with the chat on stdout.
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);
    info!("Starting ChatHelper with {:?}", config);

    let input = InputBuffer::default();
    let view = TerminalView::stdout(input.clone());
    let clipboard = Arc::new(SystemClipboard::detect());
    let options = ControllerOptions {
        response_timeout: config.response_timeout(),
        export_dir: config.export_dir.clone(),
        seed_demo: config.seed_demo,
    };

    let controller = match &config.backend_url {
        Some(url) => {
            let responder = RemoteResponder::new(url, config.response_timeout())?;
            ControllerHandle::spawn(Arc::new(responder), view, clipboard, options)
        }
        None => {
            let responder = MockResponder::with_delay(config.latency());
            ControllerHandle::spawn(Arc::new(responder), view, clipboard, options)
        }
    };

    repl::run(controller, input).await
}
