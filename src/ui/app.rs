use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::config::Config;
use crate::query::{QueryOptions, RequestClient};
use crate::router::Route;
use crate::ui::events::{AppEvent, EventSink};
use crate::ui::home::{HomeIntent, HomeReducer, HomeState};
use crate::ui::mvi::Reducer;
use crate::ui::user::UserScreen;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    route: Route,
    /// Home prompt state (MVI pattern).
    home: HomeState,
    /// Mounted profile screen; `Some` exactly when `route` is a user.
    user: Option<UserScreen>,
    client: Arc<dyn RequestClient>,
    runtime: Handle,
    options: QueryOptions,
    repo_limit: u32,
    events: EventSink,
}

impl App {
    pub fn new(client: Arc<dyn RequestClient>, runtime: Handle, config: &Config) -> Self {
        Self {
            should_quit: false,
            route: Route::Home,
            home: HomeState::default(),
            user: None,
            client,
            runtime,
            options: QueryOptions::from(&config.query),
            repo_limit: config.ui.repo_limit,
            events: EventSink::default(),
        }
    }

    /// Deliver binder transitions to the event loop. Replaces any earlier sender.
    pub fn set_event_sender(&mut self, events: Sender<AppEvent>) {
        self.events.connect(events);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn user_screen(&self) -> Option<&UserScreen> {
        self.user.as_ref()
    }

    /// Switch screens.
    ///
    /// The old user screen is torn down before the new one mounts. Navigating
    /// to the user already shown keeps its screen and only re-observes.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            self.sync_queries();
            return;
        }

        tracing::info!(from = %self.route, to = %route, "Navigating");
        if let Some(mut screen) = self.user.take() {
            screen.teardown();
        }

        if let Route::User { username } = &route {
            let screen = UserScreen::new(
                username.clone(),
                Arc::clone(&self.client),
                self.runtime.clone(),
                self.options,
                self.repo_limit,
            );
            screen.notify(self.events.clone());
            self.user = Some(screen);
        }
        self.route = route;
        self.sync_queries();
    }

    /// Feed the mounted screen its current inputs. Called before every draw.
    pub fn sync_queries(&mut self) {
        let Some(screen) = self.user.as_mut() else {
            return;
        };
        match screen.observe() {
            Ok(0) => {}
            Ok(issued) => tracing::debug!(issued, username = screen.username(), "Queries issued"),
            Err(err) => tracing::error!(error = %err, "Rejected query inputs"),
        }
    }

    pub fn refetch(&mut self) {
        if let Some(screen) = self.user.as_mut() {
            let issued = screen.refetch();
            tracing::debug!(issued, "Refetch requested");
        }
    }

    pub fn dispatch_home(&mut self, intent: HomeIntent) {
        dispatch_mvi!(self, home, HomeReducer, intent);

        if let Some(username) = self.home.submitted.clone() {
            dispatch_mvi!(self, home, HomeReducer, HomeIntent::Navigated);
            self.navigate(Route::User { username });
        }
    }

    pub fn go_home(&mut self) {
        self.navigate(Route::Home);
    }

    /// Tear down the mounted screen. Used on exit.
    pub fn teardown(&mut self) {
        if let Some(mut screen) = self.user.take() {
            screen.teardown();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}
