#![deny(missing_docs)]
//! A web server for the TOTP tool, exposing generation and verification as a JSON API.
//!
//! | Method | Path                   | Purpose                                  |
//! |--------|------------------------|------------------------------------------|
//! | POST   | `/api/generate`        | Compute the code for a secret            |
//! | POST   | `/api/verify`          | Check a code within a drift window       |
//! | GET    | `/api/generate-secret` | Create a random base32 secret            |
//! | GET    | `/api/health`          | Liveness probe                           |

/// Listen address configuration.
pub mod config;
/// Routes and handlers.
pub mod routes;

pub use config::ServerConfig;
pub use routes::app;
