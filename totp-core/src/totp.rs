// File:    totp.rs
// Author:  apezoo
// Date:    2025-08-03
//
// Description: RFC 6238 TOTP: time-step counters, code generation and windowed verification.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::error::{OtpError, Result};
use crate::hotp;
use crate::params::{OtpParameters, validate_time_step};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::{Choice, ConstantTimeEq};

/// A generated code together with the values it was derived from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOtp {
    /// The zero-padded decimal code.
    pub otp: String,
    /// Seconds until the code expires, in `1..=time_step`.
    pub time_remaining: u64,
    /// The time-step counter the code was computed for.
    pub counter: u64,
    /// The unix timestamp the code was computed at.
    pub timestamp: i64,
}

/// Current wall-clock time in unix seconds.
///
/// A clock set before the epoch reads as `0` and is logged as a warning.
#[must_use]
pub fn unix_now() -> i64 {
    epoch_seconds(SystemTime::now())
}

fn epoch_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(e) => {
            log::warn!("System clock is {:?} before the unix epoch; using 0.", e.duration());
            0
        }
    }
}

/// Computes `floor((now - t0) / time_step)`.
///
/// Division rounds toward negative infinity, so timestamps before `t0` give
/// negative counters that still increase steadily with time.
///
/// # Errors
///
/// Returns [`OtpError::InvalidParameter`] if `time_step <= 0` or `now - t0` overflows.
pub fn compute_counter(now: i64, t0: i64, time_step: i64) -> Result<i64> {
    let step = validate_time_step(time_step)?;
    position(now, t0, step).map(|(counter, _)| counter)
}

/// Generates the code valid at `now`.
///
/// # Errors
///
/// Returns [`OtpError::InvalidParameter`] if `now` is negative or earlier
/// than the parameters' `t0`.
pub fn generate(params: &OtpParameters, now: i64) -> Result<GeneratedOtp> {
    check_timestamp(now)?;
    let (counter, time_remaining) = position(now, params.t0(), params.time_step())?;
    let counter = u64::try_from(counter).map_err(|_| {
        OtpError::InvalidParameter(format!(
            "timestamp {now} precedes the reference time t0 = {}",
            params.t0()
        ))
    })?;

    log::debug!(
        "Generating {}-digit {} code for counter {counter}.",
        params.digits(),
        params.algorithm()
    );
    let otp = hotp::compute(params.secret(), counter, params.algorithm(), params.digits())?;

    Ok(GeneratedOtp {
        otp,
        time_remaining,
        counter,
        timestamp: now,
    })
}

/// Checks `candidate` against every counter in `[current - window, current + window]`.
///
/// The whole window is always scanned and each comparison is constant-time,
/// so the running time does not depend on which offset matched. Candidates of
/// the wrong length or containing non-digits are rejected up front with
/// `Ok(false)`. Offsets that fall below counter zero are skipped.
///
/// # Errors
///
/// Returns [`OtpError::InvalidParameter`] if `window` or `now` is negative.
pub fn verify(params: &OtpParameters, candidate: &str, window: i64, now: i64) -> Result<bool> {
    if window < 0 {
        return Err(OtpError::InvalidParameter(format!(
            "window must be a non-negative integer, got {window}"
        )));
    }
    check_timestamp(now)?;
    let (current, _) = position(now, params.t0(), params.time_step())?;

    if !is_well_formed(candidate, params.digits()) {
        log::debug!("Rejected a malformed candidate code.");
        return Ok(false);
    }

    log::trace!("Scanning counters {current} ± {window}.");
    let mut matched = Choice::from(0);
    for offset in -window..=window {
        let Some(counter) = current
            .checked_add(offset)
            .and_then(|c| u64::try_from(c).ok())
        else {
            continue;
        };
        let expected = hotp::compute(params.secret(), counter, params.algorithm(), params.digits())?;
        matched |= expected.as_bytes().ct_eq(candidate.as_bytes());
    }

    Ok(matched.into())
}

/// Counter and seconds remaining in the current step.
fn position(now: i64, t0: i64, step: u64) -> Result<(i64, u64)> {
    let overflow = || OtpError::InvalidParameter("timestamp is out of range".to_string());
    let step_signed = i64::try_from(step)
        .map_err(|_| OtpError::InvalidParameter(format!("time step {step} is too large")))?;
    let elapsed = now.checked_sub(t0).ok_or_else(overflow)?;

    let counter = elapsed.div_euclid(step_signed);
    // rem_euclid is in 0..step for a positive divisor.
    let into_step = elapsed.rem_euclid(step_signed).unsigned_abs();
    Ok((counter, step - into_step))
}

fn check_timestamp(now: i64) -> Result<()> {
    if now < 0 {
        return Err(OtpError::InvalidParameter(format!(
            "timestamp must be non-negative, got {now}"
        )));
    }
    Ok(())
}

fn is_well_formed(candidate: &str, digits: u32) -> bool {
    candidate.len() == digits as usize && candidate.bytes().all(|b| b.is_ascii_digit())
}
