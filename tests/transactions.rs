mod common;

use aeps_gateway::crypto::IdentityCipher;
use std::time::{Duration, Instant};

use common::{
    CAPTURE_OK, CIPHER_KEY, DEVICE_BUSY, OPERATOR_AADHAAR, OUTLET_ID, spawn_app, spawn_gateway,
    spawn_silent_vendor,
};
use reqwest::Client;
use serde_json::{Value, json};

async fn post(url: String, body: Value) -> (u16, Value) {
    let response = Client::new().post(url).json(&body).send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_daily_login_end_to_end() {
    let app = spawn_app().await;

    let (status, body) = post(
        format!("{}/2FAauth", app.address),
        json!({
            "latitude": 12.97,
            "longitude": 77.59,
            "device": "MANTRA",
            "biometricData": { "pidData": CAPTURE_OK },
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["statuscode"], "TXN");

    let requests = app.vendor.requests();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.path, "/fi/aeps/outletLogin");
    assert_eq!(sent.headers["x-ipay-outlet-id"], OUTLET_ID);
    assert_eq!(sent.headers["x-ipay-client-id"], "client-id");
    assert_eq!(sent.headers["x-ipay-auth-code"], "1");

    assert_eq!(sent.body["type"], "DAILY_LOGIN");
    assert_eq!(sent.body["bankiin"], "508505");
    assert!(sent.body.get("externalRef").is_none());

    let biometric = &sent.body["biometricData"];
    assert_eq!(biometric["errCode"], "0");
    assert_eq!(biometric["srno"], "8317482");
    let encrypted = biometric["encryptedAadhaar"].as_str().unwrap();
    let cipher = IdentityCipher::new(CIPHER_KEY).unwrap();
    assert_eq!(cipher.decrypt(encrypted).unwrap(), OPERATOR_AADHAAR);
}

#[tokio::test]
async fn test_missing_pid_never_reaches_vendor() {
    let app = spawn_app().await;

    let (status, body) = post(
        format!("{}/balance_enquiry", app.address),
        json!({"mobile": "9876543210", "aadhaar": "123412341234", "bankiin": "607094"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "PID data missing");
    assert!(app.vendor.requests().is_empty());
}

#[tokio::test]
async fn test_device_error_never_reaches_vendor() {
    let app = spawn_app().await;

    let (status, body) = post(
        format!("{}/balance_enquiry", app.address),
        json!({
            "mobile": "9876543210",
            "aadhaar": "123412341234",
            "bankiin": "607094",
            "pidData": DEVICE_BUSY,
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Capture timed out");
    assert!(app.vendor.requests().is_empty());
}

#[tokio::test]
async fn test_cash_withdrawal_carries_reference_and_amount() {
    let app = spawn_app().await;

    let (status, body) = post(
        format!("{}/cashwidroll", app.address),
        json!({
            "mobile": "9876543210",
            "aadhaar": "123412341234",
            "bankiin": "607094",
            "amount": 500.0,
            "pidData": CAPTURE_OK,
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let requests = app.vendor.requests();
    let sent = &requests[0].body;
    assert_eq!(requests[0].path, "/fi/aeps/cashWithdrawal");
    assert_eq!(sent["type"], "CASH_WITHDRAWAL");
    assert_eq!(sent["amount"], 500.0);
    assert_eq!(sent["mobile"], "9876543210");
    assert_eq!(sent["externalRef"].as_str().unwrap().len(), 23);
}

#[tokio::test]
async fn test_estamp_is_forwarded_with_vendor_headers() {
    let app = spawn_app().await;
    let request = json!({"firstParty": "A", "secondParty": "B", "stampDuty": 100});

    let (status, body) = post(format!("{}/estamp", app.address), request.clone()).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let requests = app.vendor.requests();
    assert_eq!(requests[0].path, "/api/signature/estamp");
    assert_eq!(requests[0].headers["x-product-instance-id"], "pi-1");
    assert_eq!(requests[0].body, request);
}

fn balance_request(pid: Value) -> Value {
    json!({
        "mobile": "9876543210",
        "aadhaar": "123412341234",
        "bankiin": "607094",
        "pidData": pid,
        "biometricData": { "pidData": CAPTURE_OK },
    })
}

#[tokio::test]
async fn test_null_top_level_pid_uses_nested_block() {
    let app = spawn_app().await;

    let (status, body) = post(
        format!("{}/balance_enquiry", app.address),
        balance_request(Value::Null),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(app.vendor.requests().len(), 1);
}

#[tokio::test]
async fn test_silent_vendor_is_bad_gateway_after_deadline() {
    let silent = spawn_silent_vendor().await;
    let address = spawn_gateway(&silent, &silent, 1).await;

    let started = Instant::now();
    let (status, body) = post(
        format!("{address}/balance_enquiry"),
        balance_request(json!(CAPTURE_OK)),
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "upstream unavailable");
    assert!(started.elapsed() < Duration::from_secs(4));
}
