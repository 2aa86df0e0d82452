//! PID block handling: the XML envelope a registered biometric device
//! produces for every capture.

mod model;
mod normalize;
mod parser;

pub(crate) use model::or_empty;
pub use model::{AdditionalInfo, Data, DeviceInfo, DeviceParams, Param, PidData, Resp, Skey};
pub use normalize::normalize;
pub use parser::{PidError, parse};

/// Root element name of a PID block
pub const ROOT_ELEMENT: &str = "PidData";
