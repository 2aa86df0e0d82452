pub mod adapters;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod pid;
pub mod server;
pub mod setup;
pub mod telemetry;
