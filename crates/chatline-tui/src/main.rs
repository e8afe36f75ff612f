use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use chatline_core::{logging, ChatController, Config, InputField, Reply, ResponderClient, Transcript};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "chatline", version)]
#[command(about = "Terminal chat client for a remote AI responder")]
struct Cli {
    /// Responder base URL (overrides CHATLINE_SERVER_URL and the config file)
    #[arg(short, long)]
    server: Option<String>,
    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::new(), Some(e)),
    };

    logging::init(&config.resolve_log_file(cli.log_file.as_deref())?)?;
    if let Some(e) = config_error {
        log::warn!("ignoring unreadable config file: {:#}", e);
    }

    let responder = Arc::new(ResponderClient::new(
        &config.resolve_server_url(cli.server.as_deref()),
    ));
    let server_url = responder.base_url().to_string();
    log::info!("chatline v{} starting, responder at {}", env!("CARGO_PKG_VERSION"), server_url);

    let (controller, mut replies) =
        ChatController::new(InputField::new(), Transcript::new(), responder);
    let mut app = App::new(controller, server_url);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run(&mut terminal, &mut app, &mut events, &mut replies).await;

    tui::restore()?;
    log::info!("chatline exiting");
    result
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
    replies: &mut mpsc::UnboundedReceiver<Reply>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        tokio::select! {
            Some(event) = events.next() => handler::handle_event(app, event),
            Some(reply) = replies.recv() => app.settle(reply),
            else => break,
        }
    }
    Ok(())
}
