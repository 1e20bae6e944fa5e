//! Expiry Module
//!
//! Decides whether an entry is expired from the timestamp in its expiry slot.

use std::sync::Arc;

use super::clock::{Clock, SystemClock};

// == Expiry Oracle ==
/// Computes and checks absolute expiry timestamps against a [`Clock`].
#[derive(Debug, Clone)]
pub struct ExpiryOracle {
    clock: Arc<dyn Clock>,
}

impl ExpiryOracle {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Absolute timestamp `ttl_seconds` from now.
    pub fn expires_at(&self, ttl_seconds: u64) -> i64 {
        let ttl_ms = i64::try_from(ttl_seconds)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        self.now_ms().saturating_add(ttl_ms)
    }

    /// Checks a raw expiry slot value.
    ///
    /// A missing, unparsable or zero timestamp means the entry never expires.
    /// A timestamp equal to the current time has not expired yet.
    pub fn is_expired(&self, raw: Option<&str>) -> bool {
        match raw.and_then(parse_int) {
            Some(0) | None => false,
            Some(expires_at) => expires_at < self.now_ms(),
        }
    }
}

impl Default for ExpiryOracle {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Parses the leading base-10 integer of `s`, ignoring leading whitespace
/// and anything after the digits (`" 42px"` is 42).
pub(crate) fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let sign_len = s.len() - unsigned.len();
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
