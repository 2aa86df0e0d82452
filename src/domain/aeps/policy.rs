use serde::Deserialize;

use crate::pid::PidData;

use super::models::TransactionKind;

/// Error code RD services report when the capture timed out or the device
/// was busy.
pub const DEVICE_BUSY_CODE: &str = "700";

/// Which device error codes abort a transaction before it reaches the bank.
///
/// Configured per transaction kind, e.g.
/// `device_policy.outlet_login = { mode = "sentinel", code = "700" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DeviceErrorPolicy {
    /// Anything other than `"0"` is a failed capture, including a missing code.
    AnyNonZero,
    /// Only the given code is a failed capture; the device is asked to retry.
    Sentinel { code: String },
}

/// A capture the policy refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRejection {
    pub code: String,
    pub message: String,
}

impl DeviceErrorPolicy {
    pub fn sentinel(code: impl Into<String>) -> Self {
        Self::Sentinel { code: code.into() }
    }

    /// Check the capture status of a parsed PID block.
    pub fn check(&self, pid: &PidData) -> Result<(), DeviceRejection> {
        let code = pid.err_code();
        let info = pid.err_info();

        match self {
            Self::AnyNonZero if code != "0" => Err(DeviceRejection {
                code: code.to_string(),
                message: if info.is_empty() {
                    format!("Device capture failed (errCode {code:?})")
                } else {
                    info.to_string()
                },
            }),
            Self::Sentinel { code: sentinel } if code == sentinel.as_str() => Err(DeviceRejection {
                code: code.to_string(),
                message: format!("{info}, please try again"),
            }),
            _ => Ok(()),
        }
    }
}

/// Device error policy for each transaction kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DevicePolicies {
    pub outlet_login: DeviceErrorPolicy,
    pub balance_enquiry: DeviceErrorPolicy,
    pub mini_statement: DeviceErrorPolicy,
    pub cash_withdrawal: DeviceErrorPolicy,
}

impl DevicePolicies {
    pub fn for_kind(&self, kind: TransactionKind) -> &DeviceErrorPolicy {
        match kind {
            TransactionKind::OutletLogin => &self.outlet_login,
            TransactionKind::BalanceEnquiry => &self.balance_enquiry,
            TransactionKind::MiniStatement => &self.mini_statement,
            TransactionKind::CashWithdrawal => &self.cash_withdrawal,
        }
    }
}

impl Default for DevicePolicies {
    fn default() -> Self {
        Self {
            outlet_login: DeviceErrorPolicy::sentinel(DEVICE_BUSY_CODE),
            balance_enquiry: DeviceErrorPolicy::AnyNonZero,
            mini_statement: DeviceErrorPolicy::AnyNonZero,
            cash_withdrawal: DeviceErrorPolicy::AnyNonZero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pid::parse;

    fn capture(resp: &str) -> PidData {
        parse(&format!("<PidData>{resp}</PidData>")).unwrap()
    }

    #[test]
    fn test_any_non_zero() {
        let policy = DeviceErrorPolicy::AnyNonZero;

        assert!(policy.check(&capture(r#"<Resp errCode="0"/>"#)).is_ok());

        let rejection = policy
            .check(&capture(r#"<Resp errCode="710" errInfo="Finger not placed"/>"#))
            .unwrap_err();
        assert_eq!(rejection.code, "710");
        assert_eq!(rejection.message, "Finger not placed");

        // A capture without status is not a success under this policy.
        assert!(policy.check(&capture("")).is_err());
    }

    #[test]
    fn test_sentinel() {
        let policy = DeviceErrorPolicy::sentinel("700");

        let rejection = policy
            .check(&capture(r#"<Resp errCode="700" errInfo="Capture timed out"/>"#))
            .unwrap_err();
        assert_eq!(rejection.message, "Capture timed out, please try again");

        assert!(policy.check(&capture(r#"<Resp errCode="0"/>"#)).is_ok());
        assert!(policy.check(&capture(r#"<Resp errCode="710"/>"#)).is_ok());
        assert!(policy.check(&capture("")).is_ok());
    }

    #[test]
    fn test_defaults_per_kind() {
        let policies = DevicePolicies::default();
        assert_eq!(
            policies.for_kind(TransactionKind::OutletLogin),
            &DeviceErrorPolicy::sentinel("700")
        );
        assert_eq!(
            policies.for_kind(TransactionKind::CashWithdrawal),
            &DeviceErrorPolicy::AnyNonZero
        );
    }

    #[test]
    fn test_policy_deserializes_from_tagged_map() {
        let policy: DeviceErrorPolicy =
            serde_json::from_str(r#"{"mode":"sentinel","code":"720"}"#).unwrap();
        assert_eq!(policy, DeviceErrorPolicy::sentinel("720"));

        let policies: DevicePolicies =
            serde_json::from_str(r#"{"outlet_login":{"mode":"any_non_zero"}}"#).unwrap();
        assert_eq!(policies.outlet_login, DeviceErrorPolicy::AnyNonZero);
        assert_eq!(policies.balance_enquiry, DeviceErrorPolicy::AnyNonZero);
    }
}
