//! Rolodex TUI entry point.

use rolodex_tui::api_client::RestClient;
use rolodex_tui::commands::{self, Command};
use rolodex_tui::config::TuiConfig;
use rolodex_tui::error::TuiError;
use rolodex_tui::events::TuiEvent;
use rolodex_tui::keys::map_key;
use rolodex_tui::notifications::NotificationLevel;
use rolodex_tui::persistence;
use rolodex_tui::state::{App, Effect};
use rolodex_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    let client = RestClient::new(&config)?;
    let mut app = App::new(config);
    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.restore(&state),
        Ok(None) => {}
        Err(err) => app.notify(
            NotificationLevel::Error,
            format!("Ignoring saved preferences: {}", err),
        ),
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    let startup = app.startup();
    dispatch(&client, startup, event_tx.clone());

    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.prune_notifications(chrono::Utc::now());
            }
            Some(event) = event_rx.recv() => {
                let effect = match event {
                    TuiEvent::Input(key) => match map_key(key, app.input_mode()) {
                        Some(action) => app.handle(action),
                        None => Effect::None,
                    },
                    TuiEvent::Completed(outcome) => app.apply(*outcome),
                    TuiEvent::Resize { .. } => Effect::None,
                };
                match effect {
                    Effect::Quit => break,
                    Effect::Run(command) => dispatch(&client, command, event_tx.clone()),
                    Effect::None => {}
                }
            }
        }
    }

    persistence::save(&app.config.persistence_path, &app.persisted())?;

    Ok(())
}

/// Run a command off the UI loop and report back through the event channel.
fn dispatch(client: &RestClient, command: Command, sender: mpsc::Sender<TuiEvent>) {
    let client = client.clone();
    tokio::spawn(async move {
        let outcome = commands::execute(&client, command).await;
        let _ = sender.send(TuiEvent::Completed(Box::new(outcome))).await;
    });
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}
