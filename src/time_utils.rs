// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Seconds since the Unix epoch, as used in JWT `iat`/`exp` claims.
pub fn unix_seconds(now: SystemTime) -> anyhow::Result<u64> {
    Ok(now.duration_since(UNIX_EPOCH)?.as_secs())
}
