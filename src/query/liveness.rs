//! Scoped lifetime handle for binder-owned async work.
//!
//! The binder owns a [`Liveness`]; every request task gets a
//! [`LivenessToken`]. Once the owner is killed, tokens report dead and
//! [`LivenessToken::dropped`] resolves, letting tasks abandon in-flight work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

pub struct Liveness {
    alive: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Mark the owner as torn down. Returns false if it already was.
    pub fn kill(&self) -> bool {
        if self.alive.swap(false, Ordering::SeqCst) {
            self.notify.notify_waiters();
            true
        } else {
            false
        }
    }

    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Create a token to hand to a spawned task.
    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            alive: Arc::clone(&self.alive),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap, cloneable view of a [`Liveness`].
#[derive(Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl LivenessToken {
    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Resolves once the owner has been killed.
    pub async fn dropped(&self) {
        // Register with Notify before checking the flag; kill() between the
        // check and the await would otherwise be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if !self.is_live() {
            return;
        }
        notified.await;
    }
}
