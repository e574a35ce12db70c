use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Run the UI loop on the calling thread until the user quits or a
/// termination signal arrives.
pub fn run(app: &mut App, tick_rate: Duration, runtime: &Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(tick_rate);
    app.set_event_sender(events.sender());

    let signal_tx = events.sender();
    let signals = runtime.spawn(async move {
        wait_for_signal().await;
        tracing::info!("Termination signal received");
        let _ = signal_tx.send(AppEvent::Shutdown);
    });

    let result = event_loop(&mut terminal, app, &events, tick_rate);

    signals.abort();
    app.teardown();
    drop(guard);
    result
}

fn event_loop(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        app.sync_queries();
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(app, key),
            Ok(AppEvent::Shutdown) => app.request_quit(),
            // Resize is picked up by the next draw
            Ok(AppEvent::Tick | AppEvent::Resize(..) | AppEvent::QueryUpdated) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
