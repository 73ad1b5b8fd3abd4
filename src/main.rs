mod action;
mod app;
mod auth;
mod config;
mod error;
mod event;
mod github;
mod source;
mod tui;
mod types;
mod ui;

use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::error::ReposcopeError;
use crate::event::Event;
use crate::github::GitHub;
use crate::tui::EventHandler;
use crate::types::RepoId;

#[derive(Debug, Parser)]
#[command(name = "reposcope", version, about)]
struct Args {
    /// Repository to inspect, as owner/name (URL-encoded input is accepted)
    repository: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let args = Args::parse();
    let decoded = urlencoding::decode(&args.repository)
        .map_err(|_| ReposcopeError::InvalidRepo(args.repository.clone()))?;
    let repo_id = RepoId::parse(&decoded)?;

    // Resolve a token; without one, requests still work but rate-limited
    let config = Config::load();
    let token = auth::resolve_token(&config.github);
    if token.is_none() {
        tracing::warn!("no GitHub token found; requests run against the anonymous rate limit");
    }

    // Initialize GitHub client
    let github = GitHub::new(token)?;

    // Run the application
    let result = run(repo_id, github).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(repo_id: RepoId, github: GitHub) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize terminal
    let mut terminal = tui::init()?;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state
    let mut app = App::new(repo_id, Arc::new(github), action_tx.clone());

    // Create event handler
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(render_rate);

    // Main loop
    loop {
        // Handle events and actions
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
