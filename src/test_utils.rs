//! In-memory stand-ins for the activities API and the clock.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::api::activities::{ActivityApi, ApiReply};
use crate::error::{ClientError, ClientResult};
use crate::models::activity::{Activity, ActivityCatalog};
use crate::models::clock::Clock;

pub fn activity(name: &str, max_participants: i64, participants: &[&str]) -> Activity {
    Activity {
        name: name.to_string(),
        description: "d".to_string(),
        schedule: "s".to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn chess_club_catalog() -> ActivityCatalog {
    ActivityCatalog::new(vec![activity("Chess Club", 10, &["a@x.com"])])
}

#[derive(Debug, Clone)]
pub enum FakeReply {
    Confirmed(String),
    Rejected(Option<String>),
    /// Response body that is not the expected JSON.
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub action: &'static str,
    pub activity: String,
    pub email: String,
}

/// Serves a catalog that confirmed mutations edit in place. Replies are
/// consumed in order; with none queued a mutation fails as malformed.
#[derive(Default)]
pub struct FakeApi {
    catalog: Mutex<Option<ActivityCatalog>>,
    fetches: AtomicUsize,
    replies: Mutex<VecDeque<FakeReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeApi {
    pub fn with_catalog(catalog: ActivityCatalog) -> Self {
        Self {
            catalog: Mutex::new(Some(catalog)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn set_catalog(&self, catalog: ActivityCatalog) {
        *self.catalog.lock().unwrap() = Some(catalog);
    }

    pub fn fail_fetches(&self) {
        *self.catalog.lock().unwrap() = None;
    }

    pub fn queue_reply(&self, reply: FakeReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn mutate(&self, action: &'static str, activity: &str, email: &str) -> ClientResult<ApiReply> {
        self.calls.lock().unwrap().push(RecordedCall {
            action,
            activity: activity.to_string(),
            email: email.to_string(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(FakeReply::Confirmed(message)) => {
                if let Some(catalog) = self.catalog.lock().unwrap().as_mut() {
                    if let Some(entry) = catalog.get_mut(activity) {
                        match action {
                            "signup" => entry.participants.push(email.to_string()),
                            _ => entry.participants.retain(|p| p != email),
                        }
                    }
                }
                Ok(ApiReply::Confirmed(message))
            }
            Some(FakeReply::Rejected(detail)) => Ok(ApiReply::Rejected(detail)),
            Some(FakeReply::Malformed) | None => {
                let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
                Err(ClientError::MalformedResponse(err))
            }
        }
    }
}

#[async_trait]
impl ActivityApi for FakeApi {
    async fn fetch_activities(&self) -> ClientResult<ActivityCatalog> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.catalog
            .lock()
            .unwrap()
            .clone()
            .ok_or(ClientError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn signup(&self, activity: &str, email: &str) -> ClientResult<ApiReply> {
        self.mutate("signup", activity, email)
    }

    async fn unregister(&self, activity: &str, email: &str) -> ClientResult<ApiReply> {
        self.mutate("unregister", activity, email)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();

        other.advance(Duration::from_millis(250));

        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }
}
