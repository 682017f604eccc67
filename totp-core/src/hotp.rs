// File:    hotp.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: RFC 4226 HOTP: HMAC over a big-endian counter followed by dynamic truncation.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::algorithm::Algorithm;
use crate::error::{OtpError, Result};
use crate::params::validate_digits;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Computes the HOTP code for `counter`.
///
/// The counter is serialized as an 8-byte big-endian integer, signed with
/// HMAC under `secret`, dynamically truncated to 31 bits and reduced modulo
/// `10^digits`. The result is always exactly `digits` characters long.
///
/// # Errors
///
/// Returns [`OtpError::InvalidSecret`] for an empty key and
/// [`OtpError::InvalidParameter`] if `digits` is outside `6..=10`.
pub fn hotp(secret: &[u8], counter: u64, algorithm: Algorithm, digits: u32) -> Result<String> {
    if secret.is_empty() {
        return Err(OtpError::InvalidSecret("secret key is empty".to_string()));
    }
    validate_digits(i64::from(digits))?;
    compute(secret, counter, algorithm, digits)
}

/// HOTP for a digit count that has already been validated.
pub(crate) fn compute(secret: &[u8], counter: u64, algorithm: Algorithm, digits: u32) -> Result<String> {
    let digest = sign(secret, &counter.to_be_bytes(), algorithm)?;
    let code = u64::from(truncate(&digest)) % 10u64.pow(digits);
    Ok(format!("{code:0>width$}", width = digits as usize))
}

fn sign(key: &[u8], message: &[u8], algorithm: Algorithm) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::Sha1 => mac::<Hmac<Sha1>>(key, message),
        Algorithm::Sha256 => mac::<Hmac<Sha256>>(key, message),
        Algorithm::Sha512 => mac::<Hmac<Sha512>>(key, message),
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(key)
        .map_err(|e| OtpError::InvalidSecret(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Dynamic truncation (RFC 4226 section 5.3).
fn truncate(digest: &[u8]) -> u32 {
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let mut window = [0u8; 4];
    window.copy_from_slice(&digest[offset..offset + 4]);
    u32::from_be_bytes(window) & 0x7fff_ffff
}
