//! Convergence and round-trip tests for the state bus

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use hearth_cli::bus::StateBus;
use hearth_cli::config::Config;
use hearth_cli::config::options::registrations::{notify, prefs, session as session_keys};
use hearth_cli::session::{Role, Session, SessionStore};

const POLL: Duration = Duration::from_millis(25);

async fn test_bus() -> (Config, Arc<StateBus>) {
    let config = Config::new_test().await.unwrap();
    let bus = Arc::new(StateBus::with_poll_interval(config.options.clone(), POLL));
    (config, bus)
}

/// Collects callback deliveries for assertions
#[derive(Clone, Default)]
struct Recorder {
    values: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn callback(&self) -> impl FnMut(String) + Send + 'static {
        let values = self.values.clone();
        move |value| values.lock().unwrap().push(value)
    }

    fn seen(&self) -> Vec<String> {
        self.values.lock().unwrap().clone()
    }
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

/// Let a freshly spawned watcher seed its last-observed value
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn set_then_get_roundtrip() {
    let (_config, bus) = test_bus().await;

    bus.set_bool(prefs::LIGHT_MODE, true).await.unwrap();
    assert!(bus.get_bool(prefs::LIGHT_MODE).await.unwrap());

    bus.set_uint(notify::UNREAD, 12).await.unwrap();
    assert_eq!(bus.get_uint(notify::UNREAD).await.unwrap(), 12);

    bus.set_string(prefs::CURRENCY, "eur".to_string())
        .await
        .unwrap();
    assert_eq!(bus.get_string(prefs::CURRENCY).await.unwrap(), "eur");
}

#[tokio::test]
async fn broadcast_reaches_same_process_subscribers() {
    let (_config, bus) = test_bus().await;

    let recorder = Recorder::default();
    let _handle = bus.subscribe(prefs::LIGHT_MODE, recorder.callback());
    settle().await;

    bus.set_bool(prefs::LIGHT_MODE, true).await.unwrap();

    wait_until(|| recorder.seen().contains(&"true".to_string())).await;
}

// A write that bypasses the bus (another process sharing the database) is
// only visible through the polling fallback
#[tokio::test]
async fn out_of_band_write_converges_within_poll_interval() {
    let (config, bus) = test_bus().await;

    let recorder = Recorder::default();
    let _handle = bus.subscribe(notify::UNREAD, recorder.callback());
    settle().await;

    config.options.set_uint(notify::UNREAD, 7).await.unwrap();

    wait_until(|| recorder.seen().contains(&"7".to_string())).await;
}

#[tokio::test]
async fn disposer_stops_one_subscription_only() {
    let (_config, bus) = test_bus().await;

    let first = Recorder::default();
    let second = Recorder::default();
    let first_handle = bus.subscribe(prefs::CATEGORY, first.callback());
    let _second_handle = bus.subscribe(prefs::CATEGORY, second.callback());
    settle().await;

    first_handle.dispose();

    bus.set_string(prefs::CATEGORY, "condo".to_string())
        .await
        .unwrap();

    wait_until(|| second.seen().contains(&"condo".to_string())).await;
    assert!(first.seen().is_empty());
}

// Scenario E: a component mounted after the write reads the persisted value,
// not a stale default
#[tokio::test]
async fn late_reader_sees_persisted_value() {
    let (config, bus) = test_bus().await;

    bus.set_bool(prefs::LIGHT_MODE, true).await.unwrap();

    let late_bus = StateBus::with_poll_interval(config.options.clone(), POLL);
    assert!(late_bus.get_bool(prefs::LIGHT_MODE).await.unwrap());
}

#[tokio::test]
async fn unchanged_value_is_not_redelivered() {
    let (_config, bus) = test_bus().await;

    bus.set_string(prefs::CURRENCY, "gbp".to_string())
        .await
        .unwrap();

    let recorder = Recorder::default();
    let _handle = bus.subscribe(prefs::CURRENCY, recorder.callback());
    settle().await;

    // Same value again: subscribers already observed it
    bus.set_string(prefs::CURRENCY, "gbp".to_string())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(recorder.seen().is_empty());
}

#[tokio::test]
async fn session_login_propagates_over_the_bus() {
    let (_config, bus) = test_bus().await;
    let sessions = SessionStore::new(bus.clone());

    let recorder = Recorder::default();
    let _handle = bus.subscribe(session_keys::USER_ID, recorder.callback());
    settle().await;

    sessions
        .store(&Session {
            user_id: "user-9".to_string(),
            role: Role::Admin,
            token: "tok".to_string(),
            expires_at: None,
        })
        .await
        .unwrap();

    wait_until(|| recorder.seen().contains(&"user-9".to_string())).await;

    sessions.clear().await.unwrap();
    wait_until(|| recorder.seen().contains(&String::new())).await;
}

#[tokio::test]
async fn expired_session_is_detected_and_destroyed() {
    let (_config, bus) = test_bus().await;
    let sessions = SessionStore::new(bus.clone());

    sessions
        .store(&Session {
            user_id: "user-2".to_string(),
            role: Role::User,
            token: "tok".to_string(),
            expires_at: Some(Utc::now() - ChronoDuration::minutes(5)),
        })
        .await
        .unwrap();

    assert!(sessions.current().await.is_none());

    // The stored marker is gone, not just masked
    assert_eq!(
        bus.get_string(session_keys::USER_ID).await.unwrap(),
        String::new()
    );
}
