// File:    error.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: Typed failures reported by the OTP engine.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use thiserror::Error;

/// Errors raised by the OTP engine.
///
/// Every variant is produced by input validation that runs before any HMAC
/// work, except [`OtpError::RandomSource`], which reports a failure of the
/// operating system's entropy source while generating a secret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The shared secret is not valid base32 or decodes to zero bytes.
    #[error("Invalid secret key: {0}")]
    InvalidSecret(String),

    /// A numeric parameter (digits, time step, window, timestamp, length) is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The hash algorithm identifier is not one of sha1, sha256 or sha512.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The operating system random source could not be read.
    #[error("Failed to read random bytes: {0}")]
    RandomSource(String),
}

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, OtpError>;
