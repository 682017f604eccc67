// File:    secret.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: Base32 handling and random generation of shared secrets.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Shared secrets travel as RFC 4648 base32 text and are only turned into raw
//! key bytes at the moment a code is computed.

use crate::error::{OtpError, Result};
use data_encoding::{BASE32_NOPAD, Encoding, Specification, SpecificationError};
use once_cell::sync::Lazy;
use rand::{TryRngCore, rngs::OsRng};

/// Secret length used when the caller does not pick one.
pub const DEFAULT_SECRET_LENGTH: usize = 32;

const BASE32_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Lenient decoder: accepts lowercase input and ignores non-zero trailing bits.
static DECODER: Lazy<std::result::Result<Encoding, SpecificationError>> = Lazy::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(BASE32_SYMBOLS);
    spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
    spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    spec.check_trailing_bits = false;
    spec.encoding()
});

fn decoder() -> Result<&'static Encoding> {
    DECODER.as_ref().map_err(|e| {
        log::error!("Base32 decoder specification was rejected: {e}");
        OtpError::InvalidSecret(format!("base32 decoder unavailable: {e}"))
    })
}

/// Decodes a base32 secret into raw key bytes.
///
/// Decoding is case-insensitive, surrounding whitespace is ignored and
/// trailing `=` padding may be present or omitted.
///
/// # Errors
///
/// Returns [`OtpError::InvalidSecret`] if the text contains characters outside
/// the base32 alphabet, has an impossible length, or decodes to zero bytes.
pub fn decode_secret(text: &str) -> Result<Vec<u8>> {
    let unpadded = text.trim().trim_end_matches('=');
    let bytes = decoder()?
        .decode(unpadded.as_bytes())
        .map_err(|e| OtpError::InvalidSecret(e.to_string()))?;

    if bytes.is_empty() {
        return Err(OtpError::InvalidSecret(
            "secret must decode to at least one byte".to_string(),
        ));
    }
    Ok(bytes)
}

/// Encodes raw key bytes as uppercase base32 without padding.
#[must_use]
pub fn encode_secret(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

/// Generates a new random secret of `length` bytes, returned as base32 text.
///
/// The bytes come straight from the operating system CSPRNG.
///
/// # Errors
///
/// Returns [`OtpError::InvalidParameter`] if `length` is zero and
/// [`OtpError::RandomSource`] if the OS random source fails.
pub fn generate_secret(length: usize) -> Result<String> {
    if length == 0 {
        return Err(OtpError::InvalidParameter(
            "secret length must be a positive number of bytes".to_string(),
        ));
    }

    let mut buffer = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| OtpError::RandomSource(e.to_string()))?;

    log::debug!("Generated a {length}-byte secret.");
    Ok(encode_secret(&buffer))
}
