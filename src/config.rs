//! Mining worker configuration

use crate::core::ChainwebVersion;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Startup configuration for the mining worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinerConfig {
    /// Number of parallel search workers, at least 1
    pub cores: u16,
    /// Network version, which selects the proof-of-work digest
    pub version: ChainwebVersion,
}

impl MinerConfig {
    /// Create a validated configuration
    pub fn new(cores: u16, version: ChainwebVersion) -> Result<Self> {
        let config = Self { cores, version };
        config.validate()?;
        Ok(config)
    }

    /// Check configuration invariants
    pub fn validate(&self) -> Result<()> {
        if self.cores == 0 {
            return Err(Error::config("cores must be at least 1"));
        }
        Ok(())
    }
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            cores: num_cpus::get().min(u16::MAX as usize) as u16,
            version: ChainwebVersion::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cores_rejected() {
        assert!(MinerConfig::new(0, ChainwebVersion::Test).is_err());
        assert!(MinerConfig::new(1, ChainwebVersion::Test).is_ok());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(MinerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = MinerConfig::new(4, ChainwebVersion::Testnet00).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: MinerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cores, 4);
        assert_eq!(back.version, ChainwebVersion::Testnet00);
    }
}
