//! Runtime configuration.
//!
//! Defaults can be overridden through environment variables:
//! - `NEON_METADATA_URI`: base URI for token metadata
//! - `NEON_SEED`: seed for token rolls (0 uses OS entropy)

use std::env;

/// Base URI token metadata is served from.
pub const DEFAULT_METADATA_URI: &str =
    "https://gateway.pinata.cloud/ipfs/QmX2ubhtBPtYw75Wrpv6HLb1fhbJqxrnbhDo1RViW3oVoi";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub metadata_uri: String,
    /// Seed for token rolls. 0 means OS entropy.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            metadata_uri: DEFAULT_METADATA_URI.to_string(),
            seed: 0,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(uri) = env::var("NEON_METADATA_URI").ok().filter(|v| !v.is_empty()) {
            config.metadata_uri = uri;
        }
        if let Some(seed) = read_env::<u64>("NEON_SEED") {
            config.seed = seed;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
