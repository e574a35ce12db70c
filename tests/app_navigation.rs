mod common;

use common::{settle, wait_until, ScriptedClient};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ghprofile::config::Config;
use ghprofile::router::Route;
use ghprofile::ui::app::App;
use ghprofile::ui::events::AppEvent;
use ghprofile::ui::home::HomeIntent;
use ghprofile::ui::input::handle_key;
use ghprofile::ui::user::{PROFILE_QUERY, REPOS_QUERY};
use serde_json::json;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

const WAIT: Duration = Duration::from_secs(2);

fn make_app(client: &Arc<ScriptedClient>) -> App {
    App::new(client.clone(), Handle::current(), &Config::default())
}

fn octocat() -> Route {
    Route::user("octocat").unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const PROFILE: &str = r#"{
    "login": "octocat",
    "id": 583231,
    "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
    "html_url": "https://github.com/octocat",
    "name": "The Octocat"
}"#;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn home_issues_no_requests() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    assert_eq!(app.route(), &Route::Home);
    app.sync_queries();
    settle().await;
    assert_eq!(client.call_count(), 0);
    assert!(app.user_screen().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn user_route_fetches_profile_and_repos() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    app.navigate(octocat());
    client.wait_for_calls(2).await;

    let profile = client.find_call(PROFILE_QUERY).expect("profile request");
    let repos = client.find_call(REPOS_QUERY).expect("repos request");
    assert_eq!(client.call(profile).1, json!({"username": "octocat"}));
    assert_eq!(
        client.call(repos).1,
        json!({"username": "octocat", "per_page": 30, "sort": "updated"})
    );

    let screen = app.user_screen().unwrap();
    assert_eq!(screen.username(), "octocat");
    assert!(screen.profile().fetching);
    assert!(screen.repos().fetching);

    client.succeed(profile, serde_json::from_str(PROFILE).unwrap());
    client.fail(repos, json!({"message": "API rate limit exceeded"}));

    let screen = app.user_screen().unwrap();
    assert!(wait_until(WAIT, || screen.profile().loaded).await);
    assert!(wait_until(WAIT, || screen.repos().error.is_some()).await);
    assert_eq!(
        screen.profile().data.unwrap().display_name(),
        "The Octocat"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rerendering_with_fresh_variables_issues_nothing() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    app.navigate(octocat());
    client.wait_for_calls(2).await;

    for _ in 0..5 {
        app.sync_queries();
    }
    // Navigating to the user already shown keeps the screen.
    app.navigate(octocat());
    settle().await;
    assert_eq!(client.call_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn leaving_user_screen_tears_it_down() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    app.navigate(octocat());
    client.wait_for_calls(2).await;

    app.go_home();
    assert_eq!(app.route(), &Route::Home);
    assert!(app.user_screen().is_none());

    assert!(wait_until(WAIT, || client.is_abandoned(0) && client.is_abandoned(1)).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn switching_users_remounts_screen() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    app.navigate(octocat());
    client.wait_for_calls(2).await;
    app.navigate(Route::user("hubot").unwrap());
    client.wait_for_calls(4).await;

    assert_eq!(app.user_screen().unwrap().username(), "hubot");
    assert!(wait_until(WAIT, || client.is_abandoned(0) && client.is_abandoned(1)).await);
    assert_eq!(client.call(2).1["username"], "hubot");
    assert_eq!(client.call(3).1["username"], "hubot");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn refetch_reissues_both_requests() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    app.navigate(octocat());
    client.wait_for_calls(2).await;
    app.refetch();
    client.wait_for_calls(4).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn home_submit_navigates() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    for ch in "octocat".chars() {
        app.dispatch_home(HomeIntent::Insert(ch));
    }
    app.dispatch_home(HomeIntent::Submit);

    assert_eq!(app.route(), &octocat());
    assert!(app.home().input.is_empty(), "prompt resets after navigating");
    client.wait_for_calls(2).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_submit_stays_home() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    app.dispatch_home(HomeIntent::Insert('-'));
    app.dispatch_home(HomeIntent::Submit);

    assert_eq!(app.route(), &Route::Home);
    assert!(app.home().error.is_some());
    settle().await;
    assert_eq!(client.call_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn keys_drive_navigation() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);

    for ch in "hubot".chars() {
        handle_key(&mut app, key(KeyCode::Char(ch)));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.route(), &Route::user("hubot").unwrap());
    client.wait_for_calls(2).await;

    handle_key(&mut app, key(KeyCode::Char('r')));
    client.wait_for_calls(4).await;

    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.route(), &Route::Home);

    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(!app.should_quit(), "plain q is typed into the prompt");
    assert_eq!(app.home().input, "q");

    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
    );
    assert!(app.should_quit());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn binder_transitions_post_query_updated() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);
    let (tx, rx) = mpsc::channel();
    app.set_event_sender(tx);

    app.navigate(octocat());
    assert!(matches!(
        rx.recv_timeout(WAIT),
        Ok(AppEvent::QueryUpdated)
    ));

    client.wait_for_calls(2).await;
    let profile = client.find_call(PROFILE_QUERY).unwrap();
    client.succeed(profile, serde_json::from_str(PROFILE).unwrap());

    let screen = app.user_screen().unwrap();
    assert!(wait_until(WAIT, || screen.profile().loaded).await);
    // Two issues plus one resolution.
    let updates = rx.try_iter().filter(|e| matches!(e, AppEvent::QueryUpdated)).count();
    assert_eq!(updates, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn replacing_event_sender_redirects_updates_once() {
    let client = ScriptedClient::new();
    let mut app = make_app(&client);
    let (first_tx, first_rx) = mpsc::channel();
    app.set_event_sender(first_tx);

    app.navigate(octocat());
    client.wait_for_calls(2).await;
    assert_eq!(first_rx.try_iter().count(), 2);

    let (tx, rx) = mpsc::channel();
    app.set_event_sender(tx.clone());
    app.set_event_sender(tx);

    let profile = client.find_call(PROFILE_QUERY).unwrap();
    client.succeed(profile, serde_json::from_str(PROFILE).unwrap());
    let screen = app.user_screen().unwrap();
    assert!(wait_until(WAIT, || screen.profile().loaded).await);

    assert_eq!(rx.try_iter().count(), 1);
    assert_eq!(first_rx.try_iter().count(), 0);
}
