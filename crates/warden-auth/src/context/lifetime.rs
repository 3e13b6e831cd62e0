//! Validity window of an authenticated session.
//!
//! Timestamps are Unix seconds. A session stays valid while
//! `now <= min(expires, destroy, active + timeout)`.

use serde_json::Value;

/// Which deadline ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCause {
    /// Absolute lifetime since login elapsed (or no login recorded).
    Ttl,
    /// Deferred destruction after a re-login elapsed.
    Destroy,
    /// No authenticated activity within the idle timeout.
    Idle,
}

impl std::fmt::Display for ExpiryCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryCause::Ttl => write!(f, "ttl"),
            ExpiryCause::Destroy => write!(f, "destroy"),
            ExpiryCause::Idle => write!(f, "idle"),
        }
    }
}

/// Outcome of evaluating a session at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// The session may be used; its activity should be refreshed.
    Valid,
    /// The session must be wiped.
    Expired(ExpiryCause),
}

/// Timestamps recorded in a context namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTimes {
    /// Absolute expiry. Absent reads as already expired.
    pub expires: Option<i64>,
    /// Deferred destruction deadline. Absent means none is pending.
    pub destroy: Option<i64>,
    /// Last activity. Absent reads as the epoch.
    pub active: Option<i64>,
}

impl SessionTimes {
    /// The instant after which the session is invalid, and the deadline that
    /// set it. A `timeout` of `None` disables idle expiry.
    ///
    /// On ties the absolute expiry is reported first, then destruction.
    pub fn clear_at(&self, timeout: Option<i64>) -> (i64, ExpiryCause) {
        let expires = self.expires.unwrap_or(0);
        let destroy = self.destroy.unwrap_or(i64::MAX);
        let idle = timeout.map_or(i64::MAX, |timeout| {
            self.active.unwrap_or(0).saturating_add(timeout)
        });

        let mut earliest = (expires, ExpiryCause::Ttl);
        if destroy < earliest.0 {
            earliest = (destroy, ExpiryCause::Destroy);
        }
        if idle < earliest.0 {
            earliest = (idle, ExpiryCause::Idle);
        }
        earliest
    }

    /// Evaluate the session at `now`. Reaching the deadline exactly is still valid.
    pub fn evaluate(&self, now: i64, timeout: Option<i64>) -> Validity {
        let (clear_at, cause) = self.clear_at(timeout);
        if now > clear_at {
            Validity::Expired(cause)
        } else {
            Validity::Valid
        }
    }
}

/// Read a stored timestamp. Anything but an integer reads as absent.
pub(crate) fn timestamp(value: Option<Value>) -> Option<i64> {
    value.and_then(|v| v.as_i64())
}
