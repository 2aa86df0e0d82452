use serde::{Deserialize, Serialize};

/// Outlet user record submitted at onboarding.
///
/// Accepted and echoed back; there is no user store yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub mobile: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar: Option<String>,
}
