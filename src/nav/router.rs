//! Routing collaborator: current screen, history depth, pop and redirect

use anyhow::Result;
use std::sync::Mutex;

use super::route::Route;

/// What the guard needs from the routing collaborator
pub trait Router: Send + Sync {
    /// The screen currently on top of the history
    fn current(&self) -> Route;

    /// Number of entries in the in-app history
    fn depth(&self) -> usize;

    /// Pop one history entry, returning the screen landed on.
    /// Errors when there is nothing underneath the current entry.
    fn pop(&self) -> Result<Route>;

    /// Replace the current entry without growing the history
    fn replace(&self, route: Route);
}

/// In-memory history stack
pub struct HistoryRouter {
    stack: Mutex<Vec<Route>>,
}

impl HistoryRouter {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: Mutex::new(vec![initial]),
        }
    }

    /// Navigate forward to a new screen
    pub fn push(&self, route: Route) {
        self.stack.lock().unwrap().push(route);
    }
}

impl Router for HistoryRouter {
    fn current(&self) -> Route {
        self.stack
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or(Route::Home)
    }

    fn depth(&self) -> usize {
        self.stack.lock().unwrap().len()
    }

    fn pop(&self) -> Result<Route> {
        let mut stack = self.stack.lock().unwrap();
        if stack.len() <= 1 {
            anyhow::bail!("History has no entry to pop");
        }
        stack.pop();
        Ok(stack.last().cloned().unwrap_or(Route::Home))
    }

    fn replace(&self, route: Route) {
        let mut stack = self.stack.lock().unwrap();
        stack.pop();
        stack.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_lands_on_previous_entry() {
        let router = HistoryRouter::new(Route::Home);
        router.push(Route::Listings);
        router.push(Route::ListingDetail(7));

        assert_eq!(router.depth(), 3);
        assert_eq!(router.pop().unwrap(), Route::Listings);
        assert_eq!(router.current(), Route::Listings);
    }

    #[test]
    fn pop_on_single_entry_errors() {
        let router = HistoryRouter::new(Route::Home);
        assert!(router.pop().is_err());
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn replace_does_not_grow_history() {
        let router = HistoryRouter::new(Route::Home);
        router.push(Route::Listings);
        router.replace(Route::Profile);

        assert_eq!(router.depth(), 2);
        assert_eq!(router.current(), Route::Profile);
    }
}
