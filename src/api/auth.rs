//! Authentication endpoints

use anyhow::Result;

use super::client::MarketClient;
use super::models::{LoginRequest, LoginResponse};

impl MarketClient {
    /// Exchange credentials for a session token
    pub async fn login(&self, email: String, password: String) -> Result<LoginResponse> {
        self.post_json("/api/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Invalidate the current token server-side. Callers treat this as best
    /// effort: the local session is cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        self.post_empty("/api/auth/logout").await
    }
}
