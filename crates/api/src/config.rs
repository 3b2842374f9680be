//! Process configuration from environment variables.

use std::net::SocketAddr;

use anyhow::Context;
use chrono::Duration;

use stockwatch_inventory::SeedSource;
use stockwatch_observability::LogFormat;

use crate::app::sessions::SessionLimits;

pub const ADDR_VAR: &str = "STOCKWATCH_ADDR";
pub const SEED_VAR: &str = "STOCKWATCH_SEED";
pub const LOG_FORMAT_VAR: &str = "STOCKWATCH_LOG_FORMAT";
pub const SESSION_TTL_VAR: &str = "STOCKWATCH_SESSION_TTL_SECS";
pub const MAX_SESSIONS_VAR: &str = "STOCKWATCH_MAX_SESSIONS";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub addr: SocketAddr,
    pub seed: SeedSource,
    pub log_format: LogFormat,
    pub session_limits: SessionLimits,
    /// Recoverable problems found while parsing; logged once tracing is up.
    pub warnings: Vec<String>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse from an arbitrary key lookup (tests pass a map instead of the
    /// process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut warnings = Vec::new();

        let raw_addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = raw_addr
            .trim()
            .parse()
            .with_context(|| format!("{ADDR_VAR}={raw_addr} is not a socket address"))?;

        let seed = match lookup(SEED_VAR) {
            None => SeedSource::Entropy,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(seed) => SeedSource::Fixed(seed),
                Err(_) => {
                    warnings.push(format!("{SEED_VAR}={raw} is not a u64; using entropy"));
                    SeedSource::Entropy
                }
            },
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => LogFormat::default(),
            Some(raw) => raw.parse::<LogFormat>().unwrap_or_else(|e: String| {
                warnings.push(format!("{LOG_FORMAT_VAR}: {e}; using json"));
                LogFormat::default()
            }),
        };

        let defaults = SessionLimits::default();
        let idle_ttl = match positive(&lookup, SESSION_TTL_VAR, &mut warnings) {
            Some(secs) => Duration::seconds(secs.min(i64::MAX as u64 / 1_000) as i64),
            None => defaults.idle_ttl,
        };
        let max_sessions = match positive(&lookup, MAX_SESSIONS_VAR, &mut warnings) {
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
            None => defaults.max_sessions,
        };

        Ok(Self {
            addr,
            seed,
            log_format,
            session_limits: SessionLimits {
                idle_ttl,
                max_sessions,
            },
            warnings,
        })
    }
}

/// A positive integer variable; anything else is a warning and `None`.
fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warnings.push(format!("{key}={raw} is not a positive integer; using default"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.seed, SeedSource::Entropy);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.session_limits, SessionLimits::default());
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn reads_all_variables() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            (ADDR_VAR, "127.0.0.1:9000"),
            (SEED_VAR, "42"),
            (LOG_FORMAT_VAR, "pretty"),
            (SESSION_TTL_VAR, "120"),
            (MAX_SESSIONS_VAR, "50"),
        ]))
        .unwrap();
        assert_eq!(cfg.session_limits.idle_ttl, Duration::seconds(120));
        assert_eq!(cfg.session_limits.max_sessions, 50);
        assert_eq!(cfg.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.seed, SeedSource::Fixed(42));
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn bad_seed_falls_back_with_warning() {
        let cfg = ApiConfig::from_lookup(lookup(&[(SEED_VAR, "forty-two")])).unwrap();
        assert_eq!(cfg.seed, SeedSource::Entropy);
        assert_eq!(cfg.warnings.len(), 1);
        assert!(cfg.warnings[0].contains(SEED_VAR));
    }

    #[test]
    fn bad_log_format_falls_back_with_warning() {
        let cfg = ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap();
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn non_positive_session_limits_fall_back_with_warning() {
        let cfg = ApiConfig::from_lookup(lookup(&[(SESSION_TTL_VAR, "0"), (MAX_SESSIONS_VAR, "-3")]))
            .unwrap();
        assert_eq!(cfg.session_limits, SessionLimits::default());
        assert_eq!(cfg.warnings.len(), 2);
    }

    #[test]
    fn bad_addr_is_fatal() {
        let err = ApiConfig::from_lookup(lookup(&[(ADDR_VAR, "not an addr")])).unwrap_err();
        assert!(err.to_string().contains(ADDR_VAR));
    }
}
