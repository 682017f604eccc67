// File:    algorithm.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: The HMAC hash functions an OTP can be computed with.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::error::OtpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash function used for the HMAC step of HOTP.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// HMAC-SHA-1, 20-byte digest. The RFC 4226 default.
    #[default]
    Sha1,
    /// HMAC-SHA-256, 32-byte digest.
    Sha256,
    /// HMAC-SHA-512, 64-byte digest.
    Sha512,
}

impl Algorithm {
    /// The normalized lowercase identifier, e.g. `"sha256"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Length in bytes of the HMAC output for this algorithm.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl FromStr for Algorithm {
    type Err = OtpError;

    /// Parses an identifier case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(OtpError::UnsupportedAlgorithm(format!(
                "'{s}' (expected sha1, sha256 or sha512)"
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("SHA1".parse::<Algorithm>(), Ok(Algorithm::Sha1));
        assert_eq!("Sha256".parse::<Algorithm>(), Ok(Algorithm::Sha256));
        assert_eq!("sha512".parse::<Algorithm>(), Ok(Algorithm::Sha512));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        for bad in ["md5", "sha-1", "", "sha384"] {
            assert!(matches!(
                bad.parse::<Algorithm>(),
                Err(OtpError::UnsupportedAlgorithm(_))
            ));
        }
    }

    #[test]
    fn display_matches_identifier() {
        assert_eq!(Algorithm::Sha512.to_string(), "sha512");
        assert_eq!(Algorithm::default(), Algorithm::Sha1);
    }
}
