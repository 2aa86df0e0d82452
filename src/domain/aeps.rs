//! Aadhaar-enabled payment transactions: turning a POS capture into the
//! banking vendor's request.

pub mod assembler;
pub mod models;
pub mod policy;
pub mod ports;
pub mod service;
#[cfg(test)]
pub(crate) mod testing;

pub use assembler::assemble;
pub use models::{
    BiometricData, BiometricField, Extras, Geolocation, TransactionKind, TransactionRequest,
    UpstreamPayload,
};
pub use policy::{DeviceErrorPolicy, DevicePolicies};
pub use ports::{Upstream, UpstreamError, UpstreamReply};
pub use service::{AepsService, OutletOperator, TransactionError};
