//! Lazily built, explicitly closed HTTP client.
//!
//! One [`HttpClient`] is created by the caller (usually `main`) and shared by
//! `Arc` with every scraper that needs it. The underlying `reqwest::Client` is
//! only built on the first request, and [`HttpClient::close`] drops it again.

use crate::error::FetchError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug)]
pub struct HttpClient {
    user_agent: String,
    timeout: Duration,
    slot: Mutex<Option<reqwest::Client>>,
    builds: AtomicUsize,
}

impl HttpClient {
    /// Record client settings. No connection pool exists until [`Self::client`] is called.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            slot: Mutex::new(None),
            builds: AtomicUsize::new(0),
        }
    }

    /// Return the shared client, building it on first use.
    ///
    /// The slot lock is held across the build, so concurrent first callers
    /// wait for one build instead of racing to create several clients.
    /// `reqwest::Client` is reference counted; the returned clone shares the
    /// connection pool.
    ///
    /// # Errors
    ///
    /// [`FetchError::Http`] when the client cannot be built (TLS backend setup).
    pub async fn client(&self) -> Result<reqwest::Client, FetchError> {
        let mut slot = self.slot.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()?;
        let n = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(builds = n, timeout = ?self.timeout, "Built HTTP client");

        *slot = Some(client.clone());
        Ok(client)
    }

    /// Drop the shared client. Safe to call any number of times, including
    /// before the client was ever built. A later [`Self::client`] call builds
    /// a fresh one.
    pub async fn close(&self) {
        let mut slot = self.slot.lock().await;
        if slot.take().is_some() {
            info!("HTTP client closed");
        } else {
            debug!("HTTP client already closed");
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// How many times a `reqwest::Client` has been built by this handle.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}
