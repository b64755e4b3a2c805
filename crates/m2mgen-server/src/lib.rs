//! m2mgen Server Library
//!
//! HTTP service exposing the oneM2M client generators and the live test
//! requests to a configuration UI.

pub mod config;
pub mod error;
pub mod routes;

pub use crate::{
    config::ServerConfig,
    error::ApiError,
    routes::{router, AppState},
};

use m2mgen_core::PassthroughClient;
use tokio::net::TcpListener;

/// Build the application router for `config`
pub fn app(config: &ServerConfig) -> m2mgen_core::Result<axum::Router> {
    let passthrough = PassthroughClient::new(config.passthrough_options())?;
    Ok(router(AppState::new(passthrough)))
}

/// Bind `config.host:config.port` and serve until the process stops
pub async fn serve(config: &ServerConfig) -> m2mgen_core::Result<()> {
    let app = app(config)?;
    let listener = TcpListener::bind(config.bind_addr()).await?;
    log::info!("m2mgen listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
