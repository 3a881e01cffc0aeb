//! Configuration for memocache.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::types::errors::{MemoError, MemoResult};

/// Configuration for a memoized function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoConfig {
    /// Eviction policy applied to the in-memory store.
    #[serde(default = "default_policy")]
    pub policy: Policy,

    /// Maximum number of entries held in memory.
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Optional entry time-to-live in seconds. `None` disables expiry.
    #[serde(default)]
    pub ttl_secs: Option<u64>,

    /// Directory where durable records are written.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            max_size: default_max_size(),
            ttl_secs: None,
            cache_dir: default_cache_dir(),
        }
    }
}

fn default_policy() -> Policy {
    Policy::Lfu
}

fn default_max_size() -> usize {
    100
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".memocache")
}

impl MemoConfig {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> MemoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MemoConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MemoResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("memocache.toml").unwrap_or_default()
    }

    /// Checks that the configuration can actually back a cache.
    ///
    /// `max_size == 0` would force an eviction on every insert, so it is
    /// rejected here instead of surfacing later as pathological behavior.
    pub fn validate(&self) -> MemoResult<()> {
        if self.max_size == 0 {
            return Err(MemoError::config("max_size deve ser maior que zero"));
        }
        Ok(())
    }
}

/// Available eviction policies.
///
/// Unrecognized names are rejected outright, both here and during
/// deserialization. There is no silent fallback to a default policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Least Recently Used: evicts the entry idle for the longest.
    Lru,
    /// Least Frequently Used: evicts the entry with the fewest accesses.
    Lfu,
    /// First In, First Out: evicts the oldest inserted entry.
    Fifo,
}

impl Policy {
    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Lru => "lru",
            Policy::Lfu => "lfu",
            Policy::Fifo => "fifo",
        }
    }
}

impl FromStr for Policy {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Policy::Lru),
            "lfu" => Ok(Policy::Lfu),
            "fifo" => Ok(Policy::Fifo),
            other => Err(MemoError::config(format!(
                "política de evicção desconhecida: '{other}' (esperado lru, lfu ou fifo)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MemoConfig::default();
        assert_eq!(config.policy, Policy::Lfu);
        assert_eq!(config.max_size, 100);
        assert!(config.ttl_secs.is_none());
        assert_eq!(config.cache_dir, PathBuf::from(".memocache"));
    }

    #[test]
    fn test_zero_max_size_rejected() {
        let config = MemoConfig {
            max_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MemoError::Config(_))));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lru".parse::<Policy>().unwrap(), Policy::Lru);
        assert_eq!("LFU".parse::<Policy>().unwrap(), Policy::Lfu);
        assert_eq!("fifo".parse::<Policy>().unwrap(), Policy::Fifo);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = "mru".parse::<Policy>().unwrap_err();
        assert!(matches!(err, MemoError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            policy = "lru"
            max_size = 8
            ttl_secs = 60
        "#;
        let config: MemoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.policy, Policy::Lru);
        assert_eq!(config.max_size, 8);
        assert_eq!(config.ttl_secs, Some(60));
    }

    #[test]
    fn test_unknown_policy_in_toml_rejected() {
        let toml_str = r#"policy = "arc""#;
        assert!(toml::from_str::<MemoConfig>(toml_str).is_err());
    }
}
