use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::aeps::TransactionError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request body")]
    InvalidRequestBody,
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

impl AppError {
    /// HTTP status of the error response.
    ///
    /// Bad input from a device is a business outcome and answered with 200,
    /// except a body that is not JSON at all.
    pub fn status(&self) -> StatusCode {
        use TransactionError::*;

        match self {
            AppError::InvalidRequestBody => StatusCode::BAD_REQUEST,
            AppError::Transaction(error) => match error {
                MissingBiometricData
                | MissingRequiredFields(_)
                | MalformedEnvelope(_)
                | DeviceCapture { .. } => StatusCode::OK,
                Cipher(_) | Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
                UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    /// Message shown to the client. Internal failures do not reveal details.
    pub fn message(&self) -> String {
        match self {
            AppError::Transaction(TransactionError::Encode(_)) => INTERNAL_ERROR_MESSAGE.into(),
            other => other.to_string(),
        }
    }

    /// Log the error at a level matching who caused it
    pub(crate) fn log(&self) {
        match self {
            AppError::Transaction(
                e @ (TransactionError::Cipher(_) | TransactionError::Encode(_)),
            ) => tracing::error!("Service failure: {e:?}"),
            AppError::Transaction(e @ TransactionError::UpstreamUnavailable(_)) => {
                tracing::warn!("Upstream failure: {e:?}")
            }
            other => tracing::debug!("Request rejected: {other}"),
        }
    }
}
