//! In-memory upstream used by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::ports::{Upstream, UpstreamError, UpstreamReply};

/// Records every call and answers with a canned reply
#[derive(Debug)]
pub(crate) struct MockUpstream {
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Value)>>,
    reply: Option<UpstreamReply>,
}

impl MockUpstream {
    pub fn replying(status: u16, body: Value) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            reply: Some(UpstreamReply { status, body }),
        }
    }

    pub fn ok() -> Self {
        Self::replying(
            200,
            json!({"statuscode": "TXN", "status": "Transaction Successful"}),
        )
    }

    /// An upstream that never answers in time
    pub fn unreachable() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            reply: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Path and decoded body of the last request
    pub fn last_request(&self) -> Option<(String, Value)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<UpstreamReply, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let decoded = serde_json::from_slice(&body).unwrap_or(Value::Null);
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), decoded));

        self.reply
            .clone()
            .ok_or(UpstreamError::Timeout(Duration::from_secs(30)))
    }
}
