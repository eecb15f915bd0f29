//! Persisted link configuration
//!
//! A [`LinkConfig`] wrapped in a magic/version header and serialized with
//! postcard, for storing in flash or EEPROM.

use serde::{Deserialize, Serialize};

use super::link::{ConfigError, LinkConfig};

/// Magic number identifying stored link config
pub const CONFIG_MAGIC: u32 = 0x534C_4E4B; // "SLNK"

/// Current stored config version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size
pub const MAX_STORED_CONFIG_SIZE: usize = 96;

/// Link config with a validation header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// The stored configuration
    pub config: LinkConfig,
}

impl StoredConfig {
    /// Wrap a config with the current header
    pub const fn new(config: LinkConfig) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config,
        }
    }

    /// Check if magic and version match
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }

    /// Serialize into `buf`, returning the used part
    ///
    /// The config is validated first so an invalid profile is never stored.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        self.config.validate()?;
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate stored bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: StoredConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if stored.magic != CONFIG_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if stored.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        stored.config.validate()?;

        Ok(stored)
    }
}

impl From<LinkConfig> for StoredConfig {
    fn from(config: LinkConfig) -> Self {
        Self::new(config)
    }
}
