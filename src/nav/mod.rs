//! Navigation: routes, in-app history, and the back-signal guard

pub mod back;
pub mod guard;
pub mod route;
pub mod router;

pub use back::{BackSignal, BackSignalSource};
pub use guard::{AppControl, AttachedGuard, BackAction, BackGuard, ExitPrompt, decide};
pub use route::Route;
pub use router::{HistoryRouter, Router};
