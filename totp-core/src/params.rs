// File:    params.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: Validated TOTP parameters and the shared validation policy.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::algorithm::Algorithm;
use crate::error::{OtpError, Result};
use crate::secret::decode_secret;
use std::fmt;
use std::ops::RangeInclusive;

/// Time step used when the caller does not pick one, in seconds.
pub const DEFAULT_TIME_STEP: i64 = 30;
/// Reference epoch used when the caller does not pick one.
pub const DEFAULT_T0: i64 = 0;
/// Code length used when the caller does not pick one.
pub const DEFAULT_DIGITS: u32 = 6;
/// Verification window used when the caller does not pick one.
pub const DEFAULT_WINDOW: i64 = 1;
/// Drift windows the shells accept from callers. The engine itself scans
/// whatever window it is given.
pub const WINDOW_RANGE: RangeInclusive<i64> = 0..=10;
/// Accepted code lengths. Ten digits is the ceiling of the 31-bit truncation output.
pub const DIGITS_RANGE: RangeInclusive<u32> = 6..=10;

/// Everything needed to compute a TOTP code, already validated.
///
/// Values are immutable once built; constructing one runs the full validation
/// policy, so the engine never starts HMAC work on bad input.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpParameters {
    secret: Vec<u8>,
    algorithm: Algorithm,
    digits: u32,
    time_step: u64,
    t0: i64,
}

impl OtpParameters {
    /// Builds parameters from a base32 secret and raw, unvalidated settings.
    ///
    /// `algorithm` is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`OtpError::UnsupportedAlgorithm`] for an unknown algorithm identifier.
    /// - [`OtpError::InvalidParameter`] if `digits` is outside `6..=10` or `time_step <= 0`.
    /// - [`OtpError::InvalidSecret`] if the secret is not valid base32.
    pub fn new(secret: &str, algorithm: &str, digits: i64, time_step: i64, t0: i64) -> Result<Self> {
        let algorithm = algorithm.parse::<Algorithm>()?;
        let digits = validate_digits(digits)?;
        let time_step = validate_time_step(time_step)?;
        let secret = decode_secret(secret)?;
        Ok(Self {
            secret,
            algorithm,
            digits,
            time_step,
            t0,
        })
    }

    /// Builds parameters from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidSecret`] for an empty key and
    /// [`OtpError::InvalidParameter`] for out-of-range digits or time step.
    pub fn from_secret_bytes(
        secret: impl Into<Vec<u8>>,
        algorithm: Algorithm,
        digits: u32,
        time_step: u64,
        t0: i64,
    ) -> Result<Self> {
        let digits = validate_digits(i64::from(digits))?;
        let time_step = i64::try_from(time_step)
            .map_or_else(|_| Err(time_step_error()), validate_time_step)?;
        let secret = secret.into();
        if secret.is_empty() {
            return Err(OtpError::InvalidSecret("secret key is empty".to_string()));
        }
        Ok(Self {
            secret,
            algorithm,
            digits,
            time_step,
            t0,
        })
    }

    /// Parameters with the defaults (SHA-1, 6 digits, 30 second step, t0 = 0).
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidSecret`] if the secret is not valid base32.
    pub fn with_defaults(secret: &str) -> Result<Self> {
        Self::new(
            secret,
            Algorithm::default().as_str(),
            i64::from(DEFAULT_DIGITS),
            DEFAULT_TIME_STEP,
            DEFAULT_T0,
        )
    }

    /// Raw key bytes.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// HMAC hash function.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of decimal digits in a code.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Length of one time step in seconds.
    #[must_use]
    pub const fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Epoch second from which time steps are counted.
    #[must_use]
    pub const fn t0(&self) -> i64 {
        self.t0
    }
}

// Keeps key material out of logs and panic messages.
impl fmt::Debug for OtpParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpParameters")
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("time_step", &self.time_step)
            .field("t0", &self.t0)
            .finish()
    }
}

pub(crate) fn validate_digits(digits: i64) -> Result<u32> {
    u32::try_from(digits)
        .ok()
        .filter(|d| DIGITS_RANGE.contains(d))
        .ok_or_else(|| {
            OtpError::InvalidParameter(format!("digits must be between 6 and 10, got {digits}"))
        })
}

pub(crate) fn validate_time_step(time_step: i64) -> Result<u64> {
    u64::try_from(time_step)
        .ok()
        .filter(|step| *step > 0)
        .ok_or_else(time_step_error)
}

fn time_step_error() -> OtpError {
    OtpError::InvalidParameter("time step must be a positive integer".to_string())
}
