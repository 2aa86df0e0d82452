use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Transaction types offered by the banking vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Daily two-factor login of the outlet operator
    OutletLogin,
    BalanceEnquiry,
    MiniStatement,
    CashWithdrawal,
}

impl TransactionKind {
    /// Value of the `type` field in the upstream payload
    pub const fn wire_type(self) -> &'static str {
        match self {
            Self::OutletLogin => "DAILY_LOGIN",
            Self::BalanceEnquiry => "BALANCE_ENQUIRY",
            Self::MiniStatement => "MINI_STATEMENT",
            Self::CashWithdrawal => "CASH_WITHDRAWAL",
        }
    }

    /// Path of the vendor endpoint, relative to its base URL
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::OutletLogin => "/fi/aeps/outletLogin",
            Self::BalanceEnquiry => "/fi/aeps/balanceInquiry",
            Self::MiniStatement => "/fi/aeps/miniStatement",
            Self::CashWithdrawal => "/fi/aeps/cashWithdrawal",
        }
    }

    /// Customer transactions carry the customer's mobile number and a
    /// correlation reference; the outlet login carries neither.
    pub const fn is_customer_transaction(self) -> bool {
        !matches!(self, Self::OutletLogin)
    }

    pub const fn requires_amount(self) -> bool {
        matches!(self, Self::CashWithdrawal)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OutletLogin => "outlet_login",
            Self::BalanceEnquiry => "balance_enquiry",
            Self::MiniStatement => "mini_statement",
            Self::CashWithdrawal => "cash_withdrawal",
        };
        write!(f, "{name}")
    }
}

/// POS clients send `null` for fields they leave out
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Nested `biometricData` object of an inbound request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BiometricField {
    #[serde(deserialize_with = "null_as_default")]
    pub pid_data: String,
}

/// Inbound transaction request as POS clients send it.
///
/// Every field is optional on the wire; required ones are checked per
/// transaction kind by the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub mobile: String,
    #[serde(deserialize_with = "null_as_default")]
    pub aadhaar: String,
    #[serde(rename = "bankiin", deserialize_with = "null_as_default")]
    pub bank_iin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub device: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pid_data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub biometric_data: BiometricField,
    pub external_ref: Option<String>,
    pub amount: Option<f64>,
}

impl TransactionRequest {
    /// The PID block, from the top-level field first, then the nested one.
    pub fn resolve_pid(&self) -> Option<&str> {
        [&self.pid_data, &self.biometric_data.pid_data]
            .into_iter()
            .map(|pid| pid.as_str())
            .find(|pid| !pid.trim().is_empty())
    }

    pub fn geolocation(&self) -> Geolocation {
        Geolocation {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Optional top-level payload fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras {
    pub external_ref: Option<String>,
    pub mobile: Option<String>,
    pub amount: Option<f64>,
}

/// Request body of the banking vendor's AePS endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPayload {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(rename = "bankiin")]
    pub bank_iin: String,
    pub biometric_data: BiometricData,
}

/// Flattened PID block plus the encrypted identity number
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricData {
    pub encrypted_aadhaar: String,
    pub dc: String,
    pub ci: String,
    pub hmac: String,
    pub dp_id: String,
    pub mc: String,
    pub pid_data_type: String,
    pub session_key: String,
    pub mi: String,
    pub rds_id: String,
    pub rds_ver: String,
    pub err_code: String,
    pub err_info: String,
    pub f_count: String,
    pub f_type: String,
    pub q_score: String,
    pub nm_points: String,
    pub i_count: u8,
    pub i_type: u8,
    pub p_count: u8,
    pub p_type: u8,
    pub srno: String,
    pub sysid: String,
    pub ts: String,
    pub pid_data: String,
}
