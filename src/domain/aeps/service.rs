//! Transaction orchestration: validate, parse, encrypt, assemble, forward.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::crypto::{self, IdentityCipher};
use crate::pid::{self, PidError};

use super::assembler::assemble;
use super::models::{Extras, TransactionKind, TransactionRequest};
use super::policy::{DevicePolicies, DeviceRejection};
use super::ports::{Upstream, UpstreamError, UpstreamReply};

/// Why a transaction was not forwarded, or got no answer
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("PID data missing")]
    MissingBiometricData,

    #[error("Required fields missing")]
    MissingRequiredFields(Vec<&'static str>),

    #[error("Invalid PID XML: {0}")]
    MalformedEnvelope(#[from] PidError),

    #[error("{message}")]
    DeviceCapture { code: String, message: String },

    #[error("Encryption failed")]
    Cipher(#[from] crypto::Error),

    #[error("Failed to encode upstream payload")]
    Encode(#[from] serde_json::Error),

    #[error("upstream unavailable")]
    UpstreamUnavailable(#[from] UpstreamError),
}

impl From<DeviceRejection> for TransactionError {
    fn from(rejection: DeviceRejection) -> Self {
        TransactionError::DeviceCapture {
            code: rejection.code,
            message: rejection.message,
        }
    }
}

/// The outlet operator whose identity the daily login uses when the
/// request does not name one.
#[derive(Debug, Clone)]
pub struct OutletOperator {
    pub aadhaar: SecretString,
    pub bank_iin: String,
}

impl OutletOperator {
    /// `bank` is either a bare IIN or a `NAME/IIN` label such as
    /// `BANK OF INDIA/508505`.
    pub fn new(aadhaar: SecretString, bank: &str) -> Self {
        let bank_iin = bank.rsplit('/').next().unwrap_or_default().trim().to_string();
        Self { aadhaar, bank_iin }
    }
}

/// Runs AePS transactions against the banking vendor
pub struct AepsService {
    upstream: Arc<dyn Upstream>,
    cipher: IdentityCipher,
    policies: DevicePolicies,
    operator: Option<OutletOperator>,
}

impl std::fmt::Debug for AepsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AepsService")
            .field("cipher", &self.cipher.cipher())
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

impl AepsService {
    pub fn new(upstream: Arc<dyn Upstream>, cipher: IdentityCipher) -> Self {
        Self {
            upstream,
            cipher,
            policies: DevicePolicies::default(),
            operator: None,
        }
    }

    pub fn with_policies(mut self, policies: DevicePolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_operator(mut self, operator: OutletOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Validate a request, build the vendor payload and forward it.
    ///
    /// Returns the vendor reply verbatim, whatever its status. Nothing is
    /// sent upstream unless every local check passed.
    #[instrument(skip_all, fields(kind = %kind, device = %request.device))]
    pub async fn execute(
        &self,
        kind: TransactionKind,
        request: TransactionRequest,
    ) -> Result<UpstreamReply, TransactionError> {
        let pid_xml = request
            .resolve_pid()
            .ok_or(TransactionError::MissingBiometricData)?;

        let (aadhaar, bank_iin) = self.identity(kind, &request);
        self.check_required(kind, &request, aadhaar, bank_iin)?;

        let pid = pid::parse(&pid::normalize(pid_xml)).inspect_err(|e| {
            debug!(error = %e, "rejecting PID block");
        })?;

        if let Err(rejection) = self.policies.for_kind(kind).check(&pid) {
            info!(err_code = %rejection.code, "device reported a failed capture");
            return Err(rejection.into());
        }

        let encrypted = self.cipher.encrypt(aadhaar)?;

        let extras = if kind.is_customer_transaction() {
            Extras {
                external_ref: Some(
                    request
                        .external_ref
                        .clone()
                        .filter(|r| !r.trim().is_empty())
                        .unwrap_or_else(external_reference),
                ),
                mobile: Some(request.mobile.trim().to_string()),
                amount: request.amount,
            }
        } else {
            Extras::default()
        };
        let external_ref = extras.external_ref.clone();

        let payload = assemble(
            &pid,
            encrypted,
            request.geolocation(),
            kind,
            bank_iin,
            extras,
        );
        let body = serde_json::to_vec(&payload)?;

        info!(
            external_ref = external_ref.as_deref().unwrap_or("-"),
            bytes = body.len(),
            "forwarding transaction"
        );
        let reply = self
            .upstream
            .post_json(kind.endpoint(), body)
            .await
            .inspect_err(|e| warn!(error = %e, "upstream call failed"))?;
        info!(status = reply.status, "upstream replied");

        Ok(reply)
    }

    /// Identity number and bank IIN of the transaction. The daily login
    /// falls back to the configured outlet operator.
    fn identity<'a>(
        &'a self,
        kind: TransactionKind,
        request: &'a TransactionRequest,
    ) -> (&'a str, &'a str) {
        let aadhaar = request.aadhaar.trim();
        let bank_iin = request.bank_iin.trim();

        match (&self.operator, kind) {
            (Some(operator), TransactionKind::OutletLogin) => (
                if aadhaar.is_empty() {
                    operator.aadhaar.expose_secret()
                } else {
                    aadhaar
                },
                if bank_iin.is_empty() {
                    operator.bank_iin.as_str()
                } else {
                    bank_iin
                },
            ),
            _ => (aadhaar, bank_iin),
        }
    }

    fn check_required(
        &self,
        kind: TransactionKind,
        request: &TransactionRequest,
        aadhaar: &str,
        bank_iin: &str,
    ) -> Result<(), TransactionError> {
        let mut missing = Vec::new();
        if aadhaar.is_empty() {
            missing.push("aadhaar");
        }
        if bank_iin.is_empty() {
            missing.push("bankiin");
        }
        if kind.is_customer_transaction() && request.mobile.trim().is_empty() {
            missing.push("mobile");
        }
        if kind.requires_amount() && !request.amount.is_some_and(|a| a > 0.0) {
            missing.push("amount");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            debug!(?missing, "rejecting incomplete request");
            Err(TransactionError::MissingRequiredFields(missing))
        }
    }
}

/// Correlation reference for customer transactions: UTC timestamp to the
/// millisecond followed by six random digits.
fn external_reference() -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000);
    format!("{}{suffix:06}", Utc::now().format("%Y%m%d%H%M%S%3f"))
}
