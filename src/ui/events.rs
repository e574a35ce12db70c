use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use parking_lot::Mutex;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// A query binder transitioned; redraw.
    QueryUpdated,
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

/// Replaceable destination for events posted from worker threads.
///
/// Observers hold a clone and post through it; connecting a new sender
/// redirects all of them, and nothing is posted while disconnected.
#[derive(Clone, Default)]
pub struct EventSink {
    tx: Arc<Mutex<Option<Sender<AppEvent>>>>,
}

impl EventSink {
    pub fn connect(&self, tx: Sender<AppEvent>) {
        *self.tx.lock() = Some(tx);
    }

    pub fn post(&self, event: AppEvent) {
        if let Some(tx) = self.tx.lock().as_ref() {
            // The loop may already be gone during shutdown.
            let _ = tx.send(event);
        }
    }
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
}

impl EventHandler {
    /// Start the terminal input thread.
    ///
    /// The thread exits on its own once the handler (and every sender) is
    /// gone, at the latest one poll interval later.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                // Short poll timeout so a dropped receiver is noticed quickly
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                let forwarded = match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => event_tx.send(AppEvent::Key(key)).is_ok(),
                        Ok(Event::Resize(cols, rows)) => {
                            event_tx.send(AppEvent::Resize(cols, rows)).is_ok()
                        }
                        Ok(_) => true,
                        Err(err) => {
                            tracing::error!(error = %err, "Failed to read terminal event");
                            false
                        }
                    },
                    Ok(false) => true,
                    Err(err) => {
                        tracing::error!(error = %err, "Failed to poll terminal events");
                        false
                    }
                };
                if !forwarded {
                    break;
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
            tracing::debug!("Input thread stopped");
        });

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}
