//! Interactive navigation shell
//!
//! Drives the marketplace screens with an in-memory history stack, the back
//! guard attached to route and session state, and a live unread badge fed by
//! the state bus.

use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use dialoguer::Confirm;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::state_bus;
use crate::config::options::registrations::notify;
use crate::nav::{AppControl, BackGuard, BackSignal, ExitPrompt, HistoryRouter, Route, Router};
use crate::session::SessionStore;

/// Exit confirmation on the terminal, off the async thread
struct DialogExitPrompt;

#[async_trait]
impl ExitPrompt for DialogExitPrompt {
    async fn confirm_exit(&self) -> bool {
        tokio::task::spawn_blocking(|| {
            Confirm::new()
                .with_prompt("Exit Hearth?")
                .default(false)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }
}

/// Exit request flag checked by the shell loop
struct ShellControl {
    exit: Arc<AtomicBool>,
}

impl AppControl for ShellControl {
    fn request_exit(&self) {
        self.exit.store(true, Ordering::SeqCst);
    }
}

pub async fn shell_command() -> Result<()> {
    let bus = state_bus().await?;
    let sessions = Arc::new(SessionStore::new(bus.clone()));
    let router = Arc::new(HistoryRouter::new(Route::Home));
    let exit = Arc::new(AtomicBool::new(false));

    let guard = BackGuard::new(
        router.clone(),
        sessions.clone(),
        Arc::new(DialogExitPrompt),
        Arc::new(ShellControl { exit: exit.clone() }),
    );

    let _badge = bus.subscribe(notify::UNREAD, |value| {
        println!("  {} {} unread", "🔔".yellow(), value.bright_yellow().bold());
    });

    println!("  {}", "Hearth navigation shell".bright_blue().bold());
    println!(
        "  {}",
        "Commands: go <path> · back · where · quit".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", format!("hearth:{}>", router.current()).bright_green());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let mut parts = line.trim().split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("go"), Some(path)) => match Route::from_path(path) {
                Some(route) => router.push(route),
                None => println!("  {}", format!("Unknown screen '{}'", path).bright_red()),
            },
            (Some("back"), _) => {
                // The shell is the platform bridge: it delivers the signal
                // and waits for the guard to finish before reading again.
                let signal = BackSignal {
                    can_go_back: router.depth() > 1,
                };
                guard.handle_back(signal).await;
            }
            (Some("where"), _) => {
                let session = sessions.current().await;
                let who = session
                    .map(|s| s.user_id)
                    .unwrap_or_else(|| "anonymous".to_string());
                println!(
                    "  {} (depth {}, {})",
                    router.current().to_string().bright_white().bold(),
                    router.depth(),
                    who.dimmed()
                );
            }
            (Some("quit") | Some("exit"), _) => break,
            (None, _) => {}
            (Some(other), _) => {
                println!("  {}", format!("Unknown command '{}'", other).bright_red());
            }
        }

        if exit.load(Ordering::SeqCst) {
            println!("  {}", "Goodbye".dimmed());
            break;
        }
    }

    Ok(())
}
