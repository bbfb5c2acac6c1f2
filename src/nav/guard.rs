//! Back-navigation guard
//!
//! Decides the effect of a single back signal from the current route and
//! session state, then executes it against the routing collaborator. All
//! failure paths degrade to a redirect onto the home landing route; no error
//! ever reaches the user as an error state.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::back::{BackSignal, BackSignalSource};
use super::route::Route;
use super::router::Router;
use crate::session::SessionStore;

/// Modal abstraction for the exit confirmation, returning a future of the
/// user's choice instead of blocking the caller.
#[async_trait]
pub trait ExitPrompt: Send + Sync {
    /// True when the user confirms leaving the application
    async fn confirm_exit(&self) -> bool;
}

/// Sink for the process-termination request issued on confirmed exit
pub trait AppControl: Send + Sync {
    fn request_exit(&self);
}

/// Effect chosen for one back signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Pop one entry of in-app history
    Pop,
    /// Redirect to the home landing route
    Redirect,
    /// Ask the user whether to exit the application
    ConfirmExit,
}

/// Pure decision table over route, session presence, back capability and
/// history depth.
///
/// A short history while authenticated means the entry underneath is
/// presumed to be the login screen, so the pop is skipped entirely.
pub fn decide(route: &Route, authenticated: bool, can_go_back: bool, depth: usize) -> BackAction {
    if route.is_login() && authenticated {
        return BackAction::Redirect;
    }
    if route.is_home() {
        return BackAction::ConfirmExit;
    }
    if !can_go_back {
        return BackAction::Redirect;
    }
    if authenticated && depth <= 2 {
        return BackAction::Redirect;
    }
    BackAction::Pop
}

/// Executes the decision table against the navigation collaborators
pub struct BackGuard {
    router: Arc<dyn Router>,
    sessions: Arc<SessionStore>,
    prompt: Arc<dyn ExitPrompt>,
    control: Arc<dyn AppControl>,
}

impl BackGuard {
    pub fn new(
        router: Arc<dyn Router>,
        sessions: Arc<SessionStore>,
        prompt: Arc<dyn ExitPrompt>,
        control: Arc<dyn AppControl>,
    ) -> Self {
        Self {
            router,
            sessions,
            prompt,
            control,
        }
    }

    /// Handle one back signal. Infallible by contract: navigation errors
    /// degrade to the home redirect.
    pub async fn handle_back(&self, signal: BackSignal) {
        let route = self.router.current();
        let authenticated = self.sessions.current().await.is_some();

        match decide(&route, authenticated, signal.can_go_back, self.router.depth()) {
            BackAction::ConfirmExit => {
                if self.prompt.confirm_exit().await {
                    log::info!("Exit confirmed");
                    self.control.request_exit();
                }
            }
            BackAction::Redirect => {
                self.router.replace(Route::Home);
            }
            BackAction::Pop => match self.router.pop() {
                // Popping into a stale unauthenticated screen is overridden
                Ok(landed) => {
                    if authenticated && landed.is_login() {
                        self.router.replace(Route::Home);
                    }
                }
                Err(e) => {
                    log::warn!("History pop failed ({:#}), redirecting home", e);
                    self.router.replace(Route::Home);
                }
            },
        }
    }

    /// Attach this guard to a back-signal source.
    ///
    /// Any previously registered handler is torn down first, so attaching is
    /// idempotent: exactly one handler consumes each signal no matter how
    /// often route or session changes force a re-attach. Dropping (or
    /// detaching) the returned guard removes the handler again.
    pub fn attach(self: Arc<Self>, source: &BackSignalSource) -> AttachedGuard {
        source.remove_all();
        let mut rx = source.register();

        let task = tokio::spawn(async move {
            while let Some(signal) = rx.recv().await {
                self.handle_back(signal).await;
            }
        });

        AttachedGuard { task }
    }
}

/// Active registration of a guard on a signal source
pub struct AttachedGuard {
    task: JoinHandle<()>,
}

impl AttachedGuard {
    /// Tear down the handler explicitly
    pub fn detach(self) {
        self.task.abort();
    }
}

impl Drop for AttachedGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}
