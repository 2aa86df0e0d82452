use serde::Deserialize;

/// Parsed PID block.
///
/// The device output is loosely structured vendor XML, so every field is
/// optional and reads as an empty string when absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PidData {
    #[serde(rename = "Resp", default)]
    pub resp: Resp,

    #[serde(rename = "DeviceInfo", default)]
    pub device_info: DeviceInfo,

    #[serde(rename = "Skey", default)]
    pub skey: Skey,

    #[serde(rename = "Hmac", default)]
    pub hmac: Option<String>,

    #[serde(rename = "Data", default)]
    pub data: Data,
}

/// Capture status and quality diagnostics
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Resp {
    #[serde(rename = "@errCode", default)]
    pub err_code: Option<String>,
    #[serde(rename = "@errInfo", default)]
    pub err_info: Option<String>,
    #[serde(rename = "@fCount", default)]
    pub f_count: Option<String>,
    #[serde(rename = "@fType", default)]
    pub f_type: Option<String>,
    #[serde(rename = "@qScore", default)]
    pub q_score: Option<String>,
    #[serde(rename = "@nmPoints", default)]
    pub nm_points: Option<String>,
}

/// Identifiers of the registered device that produced the capture
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "@dpId", default)]
    pub dp_id: Option<String>,
    #[serde(rename = "@rdsId", default)]
    pub rds_id: Option<String>,
    #[serde(rename = "@rdsVer", default)]
    pub rds_ver: Option<String>,
    #[serde(rename = "@mi", default)]
    pub mi: Option<String>,
    #[serde(rename = "@dc", default)]
    pub dc: Option<String>,
    #[serde(rename = "@mc", default)]
    pub mc: Option<String>,
    #[serde(rename = "additional_info", default)]
    pub additional_info: AdditionalInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdditionalInfo {
    #[serde(rename = "Param", default)]
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Param {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
}

/// Session key, encrypted by the device for the verifier's certificate
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skey {
    #[serde(rename = "@ci", default)]
    pub ci: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: Option<String>,
}

/// Encrypted biometric template
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Data {
    #[serde(rename = "@type", default)]
    pub data_type: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: Option<String>,
}

/// The three device parameters the banking API wants as flat fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceParams {
    pub srno: String,
    pub sysid: String,
    pub ts: String,
}

const PARAM_KEYS: [&str; 3] = ["srno", "sysid", "ts"];

/// Read an optional field as trimmed text, empty when absent.
pub(crate) fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

impl PidData {
    pub fn err_code(&self) -> &str {
        or_empty(&self.resp.err_code)
    }

    pub fn err_info(&self) -> &str {
        or_empty(&self.resp.err_info)
    }

    /// Serial number, system id and timestamp of the capture.
    ///
    /// Looked up by name (`srno`, `sysid`, `ts`), the last entry winning on
    /// duplicates. Older RD services emit the list without any of those
    /// names; then the first three entries are taken in that order.
    pub fn device_params(&self) -> DeviceParams {
        let params = &self.device_info.additional_info.params;

        let keyed = params
            .iter()
            .any(|p| PARAM_KEYS.contains(&or_empty(&p.name)));

        let [srno, sysid, ts] = if keyed {
            PARAM_KEYS.map(|key| {
                params
                    .iter()
                    .rfind(|p| or_empty(&p.name) == key)
                    .map(|p| or_empty(&p.value).to_string())
                    .unwrap_or_default()
            })
        } else {
            [0, 1, 2].map(|idx| {
                params
                    .get(idx)
                    .map(|p| or_empty(&p.value).to_string())
                    .unwrap_or_default()
            })
        };

        DeviceParams { srno, sysid, ts }
    }
}
