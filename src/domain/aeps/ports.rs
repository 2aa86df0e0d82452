//! Interface to the vendor APIs the gateway forwards to.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Response of a vendor API, kept verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to get any response from a vendor API
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid static header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },
}

/// A vendor API accepting JSON over HTTP POST.
///
/// Implementations attach the vendor's static authentication headers and
/// enforce a deadline. They never retry.
#[async_trait]
pub trait Upstream: Send + Sync + 'static {
    /// POST an encoded JSON body to `path` below the vendor base URL.
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<UpstreamReply, UpstreamError>;
}
