//! E-stamp passthrough: the client body goes to the document vendor as-is.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use super::aeps::{TransactionError, Upstream, UpstreamReply};

pub const ESTAMP_PATH: &str = "/api/signature/estamp";

pub struct EstampService {
    upstream: Arc<dyn Upstream>,
}

impl EstampService {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    #[instrument(skip_all)]
    pub async fn forward(&self, body: &Value) -> Result<UpstreamReply, TransactionError> {
        let encoded = serde_json::to_vec(body)?;
        let reply = self.upstream.post_json(ESTAMP_PATH, encoded).await?;
        info!(status = reply.status, "e-stamp vendor replied");
        Ok(reply)
    }
}

impl std::fmt::Debug for EstampService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstampService").finish_non_exhaustive()
    }
}
