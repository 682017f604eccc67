#![deny(missing_docs)]
//! Entry point for the TOTP web server.

use local_ip_address::local_ip;
use log::{error, info, warn};
use totp_web::{ServerConfig, app};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let addr = config.socket_addr();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("listening on:");
    match local_ip() {
        Ok(my_local_ip) => info!("  - http://{my_local_ip}:{}/api/health", config.port),
        Err(e) => warn!("Could not determine the local IP address: {e}"),
    }
    info!("  - http://127.0.0.1:{}/api/health", config.port);

    if let Err(e) = axum::serve(listener, app()).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}
