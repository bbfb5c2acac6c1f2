//! HTTP client for the Hearth marketplace backend

pub mod auth;
pub mod client;
pub mod listings;
pub mod models;
pub mod notifications;

pub use client::MarketClient;
pub use notifications::refresh_unread;
