use std::sync::Arc;

use color_eyre::eyre::Context;
use secrecy::ExposeSecret;

use crate::adapters::http::HttpUpstream;
use crate::config::Config;
use crate::crypto::IdentityCipher;
use crate::domain::aeps::{AepsService, OutletOperator};
use crate::domain::estamp::EstampService;
use crate::server::AppState;

/// Wire the vendor clients and services described by `config`
pub fn build_state(config: &Config) -> color_eyre::Result<AppState> {
    let timeout = config.upstream.timeout();

    let cipher = IdentityCipher::new(config.identity.cipher_key.expose_secret().as_bytes())
        .wrap_err("Invalid identity cipher key")?;
    tracing::info!(cipher = ?cipher.cipher(), "Identity cipher ready");

    let banking =
        HttpUpstream::banking(&config.aeps, timeout).wrap_err("Failed to build banking client")?;
    let estamp_vendor =
        HttpUpstream::estamp(&config.estamp, timeout).wrap_err("Failed to build e-stamp client")?;

    let mut aeps =
        AepsService::new(Arc::new(banking), cipher).with_policies(config.device_policy.clone());
    match &config.outlet_login {
        Some(login) => {
            aeps = aeps.with_operator(OutletOperator::new(login.aadhaar.clone(), &login.bank));
        }
        None => tracing::warn!("No outlet operator configured, daily login needs aadhaar and bankiin"),
    }

    Ok(AppState {
        aeps: Arc::new(aeps),
        estamp: Arc::new(EstampService::new(Arc::new(estamp_vendor))),
    })
}
