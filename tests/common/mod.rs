#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aeps_gateway::{config::Config, server::Server, setup};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Uri},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const CIPHER_KEY: &str = "e99816ca42d2c9bce99816ca42d2c9bc";
pub const OPERATOR_AADHAAR: &str = "634169620558";
pub const OUTLET_ID: &str = "381229";

pub const CAPTURE_OK: &str = include_str!("../../test_data/pid/capture_ok.xml");
pub const DEVICE_BUSY: &str = include_str!("../../test_data/pid/device_busy.xml");

/// One request as the vendor saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Stand-in for both vendors: records every request and answers success
#[derive(Debug, Clone, Default)]
pub struct FakeVendor {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeVendor {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(vendor): State<FakeVendor>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    vendor.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        headers,
        body,
    });
    Json(json!({"statuscode": "TXN", "status": "Transaction Successful"}))
}

async fn spawn_vendor() -> (String, FakeVendor) {
    let vendor = FakeVendor::default();
    let app = Router::new().fallback(record).with_state(vendor.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake vendor failed");
    });

    (format!("http://127.0.0.1:{port}"), vendor)
}

pub struct TestApp {
    pub address: String,
    pub vendor: FakeVendor,
}

/// Address of a banking vendor that accepts connections and never answers
pub async fn spawn_silent_vendor() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    format!("http://127.0.0.1:{port}")
}

// Spawns the gateway on a random port, wired to a fresh fake vendor
pub async fn spawn_app() -> TestApp {
    let (vendor_url, vendor) = spawn_vendor().await;
    let address = spawn_gateway(&vendor_url, &vendor_url, 5).await;
    TestApp { address, vendor }
}

/// Gateway whose banking calls go to `aeps_url` with a deadline of
/// `timeout_secs`; returns its address.
pub async fn spawn_gateway(aeps_url: &str, estamp_url: &str, timeout_secs: u64) -> String {
    let timeout_secs = timeout_secs.to_string();
    let vars: HashMap<String, String> = [
        ("server.host", "127.0.0.1"),
        ("server.port", "0"),
        ("upstream.timeout_secs", timeout_secs.as_str()),
        ("identity.cipher_key", CIPHER_KEY),
        ("aeps.base_url", aeps_url),
        ("aeps.client_id", "client-id"),
        ("aeps.client_secret", "client-secret"),
        ("aeps.outlet_id", OUTLET_ID),
        ("aeps.endpoint_ip", "10.0.0.1"),
        ("estamp.base_url", estamp_url),
        ("estamp.client_id", "es-id"),
        ("estamp.client_secret", "es-secret"),
        ("estamp.product_instance_id", "pi-1"),
        ("outlet_login.aadhaar", OPERATOR_AADHAAR),
        ("outlet_login.bank", "BANK OF INDIA/508505"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let config = Config::load_with_sources(Some(vars)).unwrap();
    let state = setup::build_state(&config).unwrap();
    let server = Server::new(state, &config.server).await.unwrap();

    let port = server.port().unwrap();
    tokio::spawn(async move {
        server.run().await.expect("failed to run server");
    });

    format!("http://127.0.0.1:{port}")
}
