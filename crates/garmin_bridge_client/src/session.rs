//! Authenticated session state for the bridge.
//!
//! A session is a plain value with an expiry. Nothing refreshes it behind the
//! caller's back: callers check [`Session::is_expired_at`] and re-authenticate
//! explicitly.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug)]
pub struct Session {
    token: Option<SecretString>,
    established_at: DateTime<Utc>,
    ttl: Option<Duration>,
}

impl Session {
    /// Session used when the bridge needs no login. Never expires.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            established_at: Utc::now(),
            ttl: None,
        }
    }

    pub fn authenticated(token: SecretString, established_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: Some(token),
            established_at,
            ttl: Some(ttl),
        }
    }

    /// Placeholder for a credentialed client that has not logged in yet.
    pub fn expired() -> Self {
        Self {
            token: None,
            established_at: DateTime::<Utc>::MIN_UTC,
            ttl: Some(Duration::zero()),
        }
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    /// `None` when the session never expires, including a deadline past the
    /// representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.ttl
            .and_then(|ttl| self.established_at.checked_add_signed(ttl))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub(crate) fn bearer(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_never_expires() {
        let s = Session::anonymous();
        assert!(s.expires_at().is_none());
        assert!(!s.is_expired_at(Utc::now() + Duration::days(365)));
        assert!(s.bearer().is_none());
    }

    #[test]
    fn authenticated_session_expires_after_ttl() {
        let start = Utc::now();
        let s = Session::authenticated(SecretString::new("tok".into()), start, Duration::seconds(3600));
        assert_eq!(s.expires_at(), Some(start + Duration::seconds(3600)));
        assert!(!s.is_expired_at(start + Duration::seconds(3599)));
        assert!(s.is_expired_at(start + Duration::seconds(3600)));
        assert_eq!(s.bearer(), Some("tok"));
    }

    #[test]
    fn overflowing_deadline_never_expires() {
        let s = Session::authenticated(SecretString::new("tok".into()), Utc::now(), Duration::MAX);
        assert!(s.expires_at().is_none());
        assert!(!s.is_expired());
    }

    #[test]
    fn placeholder_session_starts_expired() {
        assert!(Session::expired().is_expired());
    }
}
