//! Scenario tests for the back-navigation guard

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hearth_cli::bus::StateBus;
use hearth_cli::config::Config;
use hearth_cli::nav::{
    AppControl, BackGuard, BackSignal, BackSignalSource, ExitPrompt, Route, Router,
};
use hearth_cli::session::{Role, Session, SessionStore};

/// Router double that records every pop and replace
struct RecordingRouter {
    stack: Mutex<Vec<Route>>,
    fail_pop: bool,
    pops: AtomicUsize,
    replaces: Mutex<Vec<Route>>,
}

impl RecordingRouter {
    fn new(stack: Vec<Route>) -> Arc<Self> {
        Arc::new(Self {
            stack: Mutex::new(stack),
            fail_pop: false,
            pops: AtomicUsize::new(0),
            replaces: Mutex::new(Vec::new()),
        })
    }

    fn failing(stack: Vec<Route>) -> Arc<Self> {
        Arc::new(Self {
            stack: Mutex::new(stack),
            fail_pop: true,
            pops: AtomicUsize::new(0),
            replaces: Mutex::new(Vec::new()),
        })
    }

    fn pops(&self) -> usize {
        self.pops.load(Ordering::SeqCst)
    }

    fn replaces(&self) -> Vec<Route> {
        self.replaces.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn current(&self) -> Route {
        self.stack.lock().unwrap().last().cloned().unwrap()
    }

    fn depth(&self) -> usize {
        self.stack.lock().unwrap().len()
    }

    fn pop(&self) -> Result<Route> {
        if self.fail_pop {
            anyhow::bail!("pop rejected");
        }
        self.pops.fetch_add(1, Ordering::SeqCst);
        let mut stack = self.stack.lock().unwrap();
        stack.pop();
        Ok(stack.last().cloned().unwrap())
    }

    fn replace(&self, route: Route) {
        self.replaces.lock().unwrap().push(route.clone());
        let mut stack = self.stack.lock().unwrap();
        stack.pop();
        stack.push(route);
    }
}

struct PromptStub {
    answer: bool,
    calls: AtomicUsize,
}

impl PromptStub {
    fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ExitPrompt for PromptStub {
    async fn confirm_exit(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

struct ControlStub {
    exits: AtomicUsize,
}

impl ControlStub {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            exits: AtomicUsize::new(0),
        })
    }
}

impl AppControl for ControlStub {
    fn request_exit(&self) {
        self.exits.fetch_add(1, Ordering::SeqCst);
    }
}

async fn test_sessions(authenticated: bool) -> Arc<SessionStore> {
    let config = Config::new_test().await.unwrap();
    let bus = Arc::new(StateBus::new(config.options.clone()));
    let sessions = Arc::new(SessionStore::new(bus));

    if authenticated {
        sessions
            .store(&Session {
                user_id: "user-1".to_string(),
                role: Role::User,
                token: "tok".to_string(),
                expires_at: None,
            })
            .await
            .unwrap();
    }

    sessions
}

fn guard(
    router: &Arc<RecordingRouter>,
    sessions: Arc<SessionStore>,
    prompt: &Arc<PromptStub>,
    control: &Arc<ControlStub>,
) -> Arc<BackGuard> {
    Arc::new(BackGuard::new(
        router.clone(),
        sessions,
        prompt.clone(),
        control.clone(),
    ))
}

async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within timeout");
}

// Scenario A: session absent, other route, canGoBack -> pop, no redirect
#[tokio::test]
async fn anonymous_back_pops_history() {
    let router = RecordingRouter::new(vec![Route::Home, Route::Listings]);
    let sessions = test_sessions(false).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: true }).await;

    assert_eq!(router.pops(), 1);
    assert!(router.replaces().is_empty());
    assert_eq!(router.current(), Route::Home);
}

// Scenario B: session present on login route -> immediate redirect home
#[tokio::test]
async fn authenticated_login_screen_redirects_home() {
    let router = RecordingRouter::new(vec![Route::Login]);
    let sessions = test_sessions(true).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: true }).await;

    assert_eq!(router.pops(), 0);
    assert_eq!(router.replaces(), vec![Route::Home]);
}

// Scenario C: session present, history length 2 -> redirect without popping
#[tokio::test]
async fn authenticated_short_history_redirects_without_pop() {
    let router = RecordingRouter::new(vec![Route::Login, Route::Listings]);
    let sessions = test_sessions(true).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: true }).await;

    assert_eq!(router.pops(), 0);
    assert_eq!(router.replaces(), vec![Route::Home]);
}

// Scenario D: home route, confirmed prompt -> exit requested exactly once
#[tokio::test]
async fn confirmed_exit_terminates_once() {
    let router = RecordingRouter::new(vec![Route::Home]);
    let sessions = test_sessions(true).await;
    let prompt = PromptStub::new(true);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: false }).await;

    assert_eq!(prompt.calls.load(Ordering::SeqCst), 1);
    assert_eq!(control.exits.load(Ordering::SeqCst), 1);
    assert_eq!(router.pops(), 0);
    assert!(router.replaces().is_empty());
}

#[tokio::test]
async fn cancelled_exit_is_a_noop() {
    let router = RecordingRouter::new(vec![Route::Home]);
    let sessions = test_sessions(false).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: false }).await;

    assert_eq!(prompt.calls.load(Ordering::SeqCst), 1);
    assert_eq!(control.exits.load(Ordering::SeqCst), 0);
    assert!(router.replaces().is_empty());
}

#[tokio::test]
async fn anonymous_without_history_redirects_home() {
    let router = RecordingRouter::new(vec![Route::Profile]);
    let sessions = test_sessions(false).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: false }).await;

    assert_eq!(router.pops(), 0);
    assert_eq!(router.replaces(), vec![Route::Home]);
}

// Popping into a stale login screen while authenticated is overridden
#[tokio::test]
async fn pop_into_login_is_overridden_with_home() {
    let router = RecordingRouter::new(vec![Route::Home, Route::Login, Route::Notifications]);
    let sessions = test_sessions(true).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: true }).await;

    assert_eq!(router.pops(), 1);
    assert_eq!(router.replaces(), vec![Route::Home]);
    assert_eq!(router.current(), Route::Home);
}

// A failed pop degrades to the home redirect instead of surfacing an error
#[tokio::test]
async fn failed_pop_falls_back_to_redirect() {
    let router = RecordingRouter::failing(vec![Route::Home, Route::Bookings, Route::Profile]);
    let sessions = test_sessions(false).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    guard.handle_back(BackSignal { can_go_back: true }).await;

    assert_eq!(router.replaces(), vec![Route::Home]);
}

// Attaching twice never double-fires one signal
#[tokio::test]
async fn reattach_leaves_exactly_one_handler() {
    let router = RecordingRouter::new(vec![Route::Home, Route::Listings]);
    let sessions = test_sessions(false).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    let source = BackSignalSource::new();
    let _first = guard.clone().attach(&source);
    let _second = guard.clone().attach(&source);

    assert!(source.emit(BackSignal { can_go_back: true }));

    wait_until(|| router.pops() == 1).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(router.pops(), 1);
    assert!(router.replaces().is_empty());
}

#[tokio::test]
async fn detached_guard_stops_consuming_signals() {
    let router = RecordingRouter::new(vec![Route::Home, Route::Listings]);
    let sessions = test_sessions(false).await;
    let prompt = PromptStub::new(false);
    let control = ControlStub::new();
    let guard = guard(&router, sessions, &prompt, &control);

    let source = BackSignalSource::new();
    let attached = guard.clone().attach(&source);
    attached.detach();

    wait_until(|| !source.has_handler()).await;
    assert!(!source.emit(BackSignal { can_go_back: true }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(router.pops(), 0);
}
