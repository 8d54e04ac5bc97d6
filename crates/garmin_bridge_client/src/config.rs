use crate::HealthError;
use secrecy::SecretString;

pub const DEFAULT_BRIDGE_URL: &str = "http://localhost:3001";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;
/// Longest accepted session lifetime (30 days).
pub const MAX_SESSION_TTL_SECS: i64 = 30 * 24 * 3600;

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Bridge connection settings.
///
/// `credentials` are only needed when the bridge sits behind an auth proxy
/// exposing `POST /login`; a stock bridge takes no login and they should be
/// left unset.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub session_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BRIDGE_URL.into(),
            credentials: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, HealthError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, HealthError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get("GARMIN_BRIDGE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BRIDGE_URL.into());

        let username = get("GARMIN_USERNAME").filter(|s| !s.trim().is_empty());
        let password = get("GARMIN_PASSWORD").filter(|s| !s.is_empty());
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials {
                username,
                password: SecretString::new(password.into()),
            }),
            (None, None) => None,
            _ => {
                return Err(HealthError::Config(
                    "GARMIN_USERNAME and GARMIN_PASSWORD must be set together".into(),
                ));
            }
        };

        let session_ttl_secs = match get("GARMIN_SESSION_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|v| (1..=MAX_SESSION_TTL_SECS).contains(v))
                .ok_or_else(|| {
                    HealthError::Config(format!("invalid GARMIN_SESSION_TTL_SECS: {raw}"))
                })?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            base_url,
            credentials,
            session_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn from_env_defaults_without_credentials() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.base_url, DEFAULT_BRIDGE_URL);
        assert!(cfg.credentials.is_none());
        assert_eq!(cfg.session_ttl_secs, 3600);
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "GARMIN_BRIDGE_URL" => Some("http://bridge.local:9000".into()),
            "GARMIN_USERNAME" => Some("runner@example.com".into()),
            "GARMIN_PASSWORD" => Some("sekrit".into()),
            "GARMIN_SESSION_TTL_SECS" => Some("600".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://bridge.local:9000");
        let creds = cfg.credentials.expect("credentials");
        assert_eq!(creds.username, "runner@example.com");
        assert_eq!(creds.password.expose_secret(), "sekrit");
        assert_eq!(cfg.session_ttl_secs, 600);
    }

    #[test]
    fn from_env_rejects_half_credentials() {
        let get = |k: &str| match k {
            "GARMIN_USERNAME" => Some("runner@example.com".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }

    #[test]
    fn from_env_rejects_oversized_ttl() {
        let get = |k: &str| match k {
            "GARMIN_SESSION_TTL_SECS" => Some(i64::MAX.to_string()),
            _ => None,
        };
        assert!(matches!(Config::from_env_with(get), Err(HealthError::Config(_))));

        let at_cap = MAX_SESSION_TTL_SECS.to_string();
        let get = |k: &str| (k == "GARMIN_SESSION_TTL_SECS").then(|| at_cap.clone());
        assert_eq!(Config::from_env_with(get).expect("cfg").session_ttl_secs, MAX_SESSION_TTL_SECS);
    }

    #[test]
    fn from_env_rejects_bad_ttl() {
        let get = |k: &str| match k {
            "GARMIN_SESSION_TTL_SECS" => Some("soon".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }
}
