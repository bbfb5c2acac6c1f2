//! Cross-component state bus
//!
//! Propagates named scalar preferences and counters to independently-running
//! subscribers without a shared in-memory store. Writes go to the options
//! database first, then a same-process broadcast carries the new value to
//! subscribers. A periodic poll additionally re-reads the persisted value so
//! writes made by another process sharing the database are picked up within
//! one interval. Delivery is level-triggered: only the latest value is ever
//! seen, intermediate values between two ticks can be lost.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::options::registrations::notify;
use crate::config::options::{OptionValue, Options};

/// Capacity of the in-process broadcast channel. Subscribers that lag past
/// this many events recover through the polling path.
const BROADCAST_CAPACITY: usize = 64;

/// A single key update carried on the broadcast channel
#[derive(Debug, Clone)]
pub struct BusEvent {
    pub key: String,
    /// String encoding of the new value, as persisted
    pub value: String,
}

/// Publish/subscribe over the persisted options store
pub struct StateBus {
    options: Arc<Options>,
    tx: broadcast::Sender<BusEvent>,
    poll_interval: Duration,
}

impl StateBus {
    /// Create a bus with the default one-second polling interval
    pub fn new(options: Arc<Options>) -> Self {
        Self::with_poll_interval(options, Duration::from_secs(1))
    }

    /// Create a bus with an explicit polling interval (tests use short ones)
    pub fn with_poll_interval(options: Arc<Options>, poll_interval: Duration) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            options,
            tx,
            poll_interval,
        }
    }

    /// Create a bus whose polling interval comes from `bus.poll_interval_ms`
    pub async fn from_options(options: Arc<Options>) -> Result<Self> {
        let interval_ms = options.get_uint(notify::POLL_INTERVAL_MS).await?;
        Ok(Self::with_poll_interval(
            options,
            Duration::from_millis(interval_ms),
        ))
    }

    /// The options store backing this bus
    pub fn options(&self) -> &Arc<Options> {
        &self.options
    }

    /// Persist `value` under `key`, then broadcast it to same-process
    /// subscribers. Subscribers in other processes observe the write through
    /// their polling fallback instead.
    pub async fn set(&self, key: &str, value: OptionValue) -> Result<()> {
        self.options.set(key, value.clone()).await?;

        // No receivers is fine: the value is already durable
        let _ = self.tx.send(BusEvent {
            key: key.to_string(),
            value: value.encode(),
        });

        Ok(())
    }

    /// Persist and broadcast a bool
    pub async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, OptionValue::Bool(value)).await
    }

    /// Persist and broadcast a uint
    pub async fn set_uint(&self, key: &str, value: u64) -> Result<()> {
        self.set(key, OptionValue::UInt(value)).await
    }

    /// Persist and broadcast a string
    pub async fn set_string(&self, key: &str, value: String) -> Result<()> {
        self.set(key, OptionValue::String(value)).await
    }

    /// Direct read of the persisted value (registered default when absent)
    pub async fn get_bool(&self, key: &str) -> Result<bool> {
        self.options.get_bool(key).await
    }

    /// Direct read of the persisted value (registered default when absent)
    pub async fn get_uint(&self, key: &str) -> Result<u64> {
        self.options.get_uint(key).await
    }

    /// Direct read of the persisted value (registered default when absent)
    pub async fn get_string(&self, key: &str) -> Result<String> {
        self.options.get_string(key).await
    }

    /// Register `callback` for updates to `key`.
    ///
    /// The callback fires when a same-process broadcast for the key arrives,
    /// or when a poll tick finds the persisted encoding differs from the last
    /// value this subscriber observed. The last-observed value is seeded from
    /// the store at subscription time, so a component that just initialized
    /// from the persisted value is not immediately re-notified.
    ///
    /// The returned handle removes both the broadcast listener and the polling
    /// check when disposed (or dropped). Other subscriptions to the same key
    /// are unaffected.
    pub fn subscribe<F>(&self, key: &str, mut callback: F) -> WatchHandle
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let options = self.options.clone();
        let key = key.to_string();
        let poll_interval = self.poll_interval;

        let task = tokio::spawn(async move {
            let mut last = options.get_encoded(&key).await.ok();

            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the seed value
            // is not re-delivered on subscription.
            ticker.tick().await;

            loop {
                tokio::select! {
                    event = rx.recv() => match event {
                        Ok(event) if event.key == key => {
                            if last.as_deref() != Some(event.value.as_str()) {
                                last = Some(event.value.clone());
                                callback(event.value);
                            }
                        }
                        Ok(_) => {}
                        // Missed broadcasts are recovered by the next poll tick
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            log::debug!("Bus subscriber for '{}' lagged {} events", key, skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = ticker.tick() => {
                        match options.get_encoded(&key).await {
                            Ok(current) => {
                                if last.as_deref() != Some(current.as_str()) {
                                    last = Some(current.clone());
                                    callback(current);
                                }
                            }
                            Err(e) => {
                                log::warn!("Bus poll for '{}' failed: {:#}", key, e);
                            }
                        }
                    }
                }
            }
        });

        WatchHandle { task }
    }
}

/// Disposer for a single bus subscription
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Stop delivering callbacks for this subscription
    pub fn dispose(self) {
        self.task.abort();
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
