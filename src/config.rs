use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://www.fotmob.com/api";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;

/// Runtime knobs for the team feed. The team itself is fixed at compile time
/// (see `team_fetch::TEAM_ID`); only transport details are tunable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub api_base: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opt = |key: &str| {
            lookup(key).and_then(|val| {
                let trimmed = val.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let api_base = opt("FOTMOB_API_BASE")
            .map(|val| val.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let user_agent =
            opt("FETCH_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = opt("FETCH_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);
        let ttl_secs = opt("TEAM_CACHE_TTL_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS)
            .max(1);

        Self {
            api_base,
            user_agent,
            timeout: Duration::from_secs(timeout_secs),
            cache_ttl: Duration::from_secs(ttl_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{DEFAULT_API_BASE, FeedConfig};

    fn config_from(pairs: &[(&str, &str)]) -> FeedConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FeedConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = config_from(&[]);
        assert_eq!(cfg, FeedConfig::default());
        assert_eq!(cfg.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn blank_and_garbage_values_fall_back() {
        let cfg = config_from(&[
            ("FOTMOB_API_BASE", "   "),
            ("FETCH_TIMEOUT_SECS", "soon"),
            ("TEAM_CACHE_TTL_SECS", ""),
        ]);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn overrides_are_clamped_and_trimmed() {
        let cfg = config_from(&[
            ("FOTMOB_API_BASE", "http://127.0.0.1:9000/api/"),
            ("FETCH_TIMEOUT_SECS", "900"),
            ("TEAM_CACHE_TTL_SECS", "0"),
        ]);
        assert_eq!(cfg.api_base, "http://127.0.0.1:9000/api");
        assert_eq!(cfg.timeout, Duration::from_secs(120));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(1));
    }
}
