use crate::pid::PidData;

use super::models::{BiometricData, Extras, Geolocation, TransactionKind, UpstreamPayload};

/// Fill-in value of the iris and face counters, which the vendor requires
/// on fingerprint transactions.
const UNUSED_MODALITY: u8 = 0;

/// Build the vendor payload from a parsed capture.
///
/// Pure reshape: no field is validated here.
pub fn assemble(
    pid: &PidData,
    encrypted_identity: String,
    location: Geolocation,
    kind: TransactionKind,
    bank_iin: &str,
    extras: Extras,
) -> UpstreamPayload {
    let text = |value: &Option<String>| crate::pid::or_empty(value).to_string();
    let params = pid.device_params();
    let device = &pid.device_info;

    let biometric_data = BiometricData {
        encrypted_aadhaar: encrypted_identity,
        dc: text(&device.dc),
        ci: text(&pid.skey.ci),
        hmac: text(&pid.hmac),
        dp_id: text(&device.dp_id),
        mc: text(&device.mc),
        pid_data_type: text(&pid.data.data_type),
        session_key: text(&pid.skey.value),
        mi: text(&device.mi),
        rds_id: text(&device.rds_id),
        rds_ver: text(&device.rds_ver),
        err_code: pid.err_code().to_string(),
        err_info: pid.err_info().to_string(),
        f_count: text(&pid.resp.f_count),
        f_type: text(&pid.resp.f_type),
        q_score: text(&pid.resp.q_score),
        nm_points: text(&pid.resp.nm_points),
        i_count: UNUSED_MODALITY,
        i_type: UNUSED_MODALITY,
        p_count: UNUSED_MODALITY,
        p_type: UNUSED_MODALITY,
        srno: params.srno,
        sysid: params.sysid,
        ts: params.ts,
        pid_data: text(&pid.data.value),
    };

    UpstreamPayload {
        latitude: location.latitude,
        longitude: location.longitude,
        external_ref: extras.external_ref,
        mobile: extras.mobile,
        amount: extras.amount,
        transaction_type: kind.wire_type().to_string(),
        bank_iin: bank_iin.to_string(),
        biometric_data,
    }
}
