// File:    lib.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: The main library crate for totp-core, exposing TOTP/HOTP generation, verification and secret handling.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # TOTP Core Library
//!
//! This library implements time-based one-time passwords (RFC 6238) on top of
//! the HOTP algorithm (RFC 4226). Every operation is a pure function of its
//! inputs: the engine keeps no state between calls and is safe to use from
//! any number of threads.
//!
//! ```
//! use totp_core::{OtpParameters, generate, verify};
//!
//! let params = OtpParameters::new("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", "sha1", 8, 30, 0)?;
//! let result = generate(&params, 59)?;
//! assert_eq!(result.otp, "94287082");
//! assert!(verify(&params, &result.otp, 1, 59)?);
//! # Ok::<(), totp_core::OtpError>(())
//! ```

/// Supported HMAC hash functions.
pub mod algorithm;
/// Errors reported by the engine.
pub mod error;
/// The counter-based HOTP primitive.
pub mod hotp;
/// Validated parameter sets and defaults.
pub mod params;
/// Base32 secret decoding, encoding and generation.
pub mod secret;
/// Time-based code generation and verification.
pub mod totp;

pub use algorithm::Algorithm;
pub use error::{OtpError, Result};
pub use hotp::hotp;
pub use params::{
    DEFAULT_DIGITS, DEFAULT_T0, DEFAULT_TIME_STEP, DEFAULT_WINDOW, DIGITS_RANGE, OtpParameters,
    WINDOW_RANGE,
};
pub use secret::{DEFAULT_SECRET_LENGTH, decode_secret, encode_secret, generate_secret};
pub use totp::{GeneratedOtp, compute_counter, generate, unix_now, verify};
