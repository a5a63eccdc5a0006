//! Per-image configuration lookup.
//!
//! Every image identifier resolves to a valid [`WatermarkConfig`]: an explicit
//! override when the caller has set one, the default otherwise. The override
//! map is an ordinary value owned by the caller; nothing here keeps state
//! between batches on its own.

use super::WatermarkConfig;
use std::collections::HashMap;

/// Resolve the configuration for one identifier.
///
/// The result is always clamped into range.
pub fn resolve(
    identifier: &str,
    overrides: &HashMap<String, WatermarkConfig>,
    default: &WatermarkConfig,
) -> WatermarkConfig {
    overrides
        .get(identifier)
        .copied()
        .unwrap_or(*default)
        .clamped()
}

/// Caller-owned override map plus the fallback configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigResolver {
    default: WatermarkConfig,
    overrides: HashMap<String, WatermarkConfig>,
}

impl ConfigResolver {
    pub fn new(default: WatermarkConfig) -> Self {
        Self {
            default: default.clamped(),
            overrides: HashMap::new(),
        }
    }

    /// Start from an existing override map (e.g. loaded from configuration).
    pub fn with_overrides(
        default: WatermarkConfig,
        overrides: HashMap<String, WatermarkConfig>,
    ) -> Self {
        Self {
            default: default.clamped(),
            overrides,
        }
    }

    pub fn default_config(&self) -> &WatermarkConfig {
        &self.default
    }

    pub fn overrides(&self) -> &HashMap<String, WatermarkConfig> {
        &self.overrides
    }

    /// Store an override; it persists until replaced or removed.
    pub fn set(&mut self, identifier: impl Into<String>, config: WatermarkConfig) {
        self.overrides.insert(identifier.into(), config.clamped());
    }

    pub fn remove(&mut self, identifier: &str) -> Option<WatermarkConfig> {
        self.overrides.remove(identifier)
    }

    /// Mutable settings for an identifier, seeded with the default the first
    /// time the identifier is seen.
    pub fn entry(&mut self, identifier: &str) -> &mut WatermarkConfig {
        let default = self.default;
        self.overrides
            .entry(identifier.to_string())
            .or_insert(default)
    }

    pub fn resolve(&self, identifier: &str) -> WatermarkConfig {
        resolve(identifier, &self.overrides, &self.default)
    }
}
