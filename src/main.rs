mod action;
mod app;
mod bookmarks;
mod browser;
mod cli;
mod config;
mod error;
mod event;
mod gateway;
mod github;
mod route;
mod store;
mod tui;
mod types;
mod ui;

#[cfg(test)]
mod testing;

use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::bookmarks::BookmarkList;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::GhmarkError;
use crate::event::Event;
use crate::gateway::Gateway;
use crate::github::GitHub;
use crate::route::Route;
use crate::store::{BookmarkStore, JsonFileStore};
use crate::tui::EventHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    let store_path = cli
        .store
        .clone()
        .or_else(|| config.store_path())
        .ok_or_else(|| GhmarkError::Config("no data directory for bookmarks".to_string()))?;
    let store = JsonFileStore::new(store_path);
    tracing::debug!(path = %store.path().display(), base_url = %config.api.base_url, "starting");
    let gateway: Arc<dyn Gateway> = Arc::new(GitHub::new(&config.api.base_url)?);

    let start = match cli.command {
        Some(Command::List) => {
            for bookmark in store.load() {
                println!("{}", bookmark.name);
            }
            return Ok(());
        }
        Some(Command::Add { name }) => {
            let mut list = BookmarkList::new(Box::new(store));
            list.on_input_change(name);
            match list.submit(gateway.as_ref()).await {
                Ok(true) => {
                    if let Some(bookmark) = list.bookmarks.last() {
                        println!("Added {}", bookmark.name);
                    }
                }
                Ok(false) => {
                    if let Some(message) = &list.error {
                        println!("{}", message);
                    }
                }
                Err(e) => {
                    eprintln!("{}", list.error.unwrap_or_else(|| e.to_string()));
                    std::process::exit(1);
                }
            }
            return Ok(());
        }
        Some(Command::Open { target }) => Route::from_target(&target)
            .ok_or_else(|| GhmarkError::Config(format!("not a repository or route: {}", target)))?,
        None => Route::Bookmarks,
    };

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let bookmarks = BookmarkList::new(Box::new(store));

    // Run the application
    let result = run(bookmarks, gateway, start).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(
    bookmarks: BookmarkList,
    gateway: Arc<dyn Gateway>,
    start: Route,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize terminal
    let mut terminal = tui::init()?;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state
    let mut app = App::new(bookmarks, gateway, start, action_tx.clone());

    // Create event handler
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(render_rate);

    // Main loop
    loop {
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
