use std::{collections::HashMap, time::Duration};

use config::{Config as ConfigLib, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::aeps::DevicePolicies;

const DEFAULT_AEPS_BASE_URL: &str = "https://api.instantpay.in";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub aeps: AepsConfig,
    pub estamp: EstampConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub outlet_login: Option<OutletLoginConfig>,
    #[serde(default)]
    pub device_policy: DevicePolicies,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Deadline for one vendor call, connect to last body byte
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Banking vendor endpoint and its static `X-Ipay-*` credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AepsConfig {
    pub base_url: String,
    pub auth_code: String,
    pub client_id: SecretString,
    pub client_secret: SecretString,
    pub outlet_id: String,
    pub endpoint_ip: String,
}

/// Document e-stamp vendor endpoint and credentials
#[derive(Debug, Clone, Deserialize)]
pub struct EstampConfig {
    pub base_url: String,
    pub client_id: SecretString,
    pub client_secret: SecretString,
    pub product_instance_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Key shared with the banking vendor for identity number encryption
    pub cipher_key: SecretString,
}

/// Operator identity used for the daily outlet login
#[derive(Debug, Clone, Deserialize)]
pub struct OutletLoginConfig {
    pub aadhaar: SecretString,
    /// Bare IIN or `NAME/IIN`
    pub bank: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLib::builder()
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8003)?
            .set_default("upstream.timeout_secs", 30)?
            .set_default("aeps.base_url", DEFAULT_AEPS_BASE_URL)?
            .set_default("aeps.auth_code", "1")?
            .add_source(File::with_name("config/settings").required(false));

        // Explicit sources replace the process environment so tests do not
        // see each other's variables.
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // e.g. APP_AEPS__CLIENT_ID or APP_DEVICE_POLICY__OUTLET_LOGIN__MODE
            builder = builder.add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }
}
