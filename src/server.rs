pub mod errors;
pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    Router,
    http::{
        Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    },
    routing::{get, post},
};
use color_eyre::eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::domain::aeps::AepsService;
use crate::domain::estamp::EstampService;
use handlers::{aeps, estamp::estamp, health::health_check, user::register_user};

#[derive(Debug, Clone)]
pub struct AppState {
    pub aeps: Arc<AepsService>,
    pub estamp: Arc<EstampService>,
}

/// The gateway's routes with CORS and request tracing applied
pub fn router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &'_ axum::extract::Request<_>| {
            let request_id = Uuid::new_v4();
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                %request_id,
            )
        });

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/health", get(health_check))
        .route("/2FAauth", post(aeps::outlet_login))
        .route("/balance_enquiry", post(aeps::balance_enquiry))
        .route("/ministatemnet", post(aeps::mini_statement))
        .route("/cashwidroll", post(aeps::cash_withdrawal))
        .route("/estamp", post(estamp))
        .route("/user", post(register_user))
        .layer(cors_layer)
        .layer(trace_layer)
        .with_state(state)
}

pub struct Server {
    router: Router,
    listener: TcpListener,
}

impl Server {
    /// Binds the listener. Port 0 picks a free port, see [`Server::port`].
    pub async fn new(state: AppState, config: &ServerConfig) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .wrap_err_with(|| format!("Failed to bind {addr}"))?;

        Ok(Self {
            router: router(state),
            listener,
        })
    }

    pub fn port(&self) -> Result<u16> {
        Ok(self
            .listener
            .local_addr()
            .wrap_err("Failed to read local address")?
            .port())
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.listener.local_addr()?;
        tracing::info!("Listening on http://{addr}");
        axum::serve(self.listener, self.router)
            .await
            .wrap_err("Server error")
    }
}
