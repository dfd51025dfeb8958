use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::grid::{FlowMetrics, Insets};

const FLOW_JSON: &str = include_str!("../assets/flow.json");

/// Largest total gap (in pixels, either sign) between the cells of one row
const MAX_ROW_GAPS: u32 = 1 << 20;

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    NonPositiveRowCapacity(i32),
    ZeroFollowInterval,
    PaddingTooLarge { row_capacity: i32, padding: i32 },
    GoneChildOutOfRange { index: usize, child_count: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Invalid flow config: {}", msg),
            ConfigError::NonPositiveRowCapacity(n) => {
                write!(f, "Row capacity must be at least 1, got {}", n)
            }
            ConfigError::ZeroFollowInterval => write!(f, "Follow interval must be non-zero"),
            ConfigError::PaddingTooLarge {
                row_capacity,
                padding,
            } => write!(
                f,
                "Padding {} is too large for {} cells per row",
                padding, row_capacity
            ),
            ConfigError::GoneChildOutOfRange { index, child_count } => write!(
                f,
                "Gone child {} is out of range ({} children)",
                index, child_count
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Layout and animation settings for the flow grid
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Cells per row
    pub row_capacity: i32,
    /// Gap between cells, in pixels
    pub child_padding: i32,
    /// Delay between two follow ticks
    pub follow_interval_ms: u64,
    pub insets: Insets,
    /// How many cells the container starts with
    pub child_count: usize,
    /// Cells that start gone (hidden and skipped by layout)
    pub gone_children: Vec<usize>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        FlowConfig {
            row_capacity: 7,
            child_padding: 10,
            follow_interval_ms: 16,
            insets: Insets::default(),
            child_count: 28,
            gone_children: Vec::new(),
        }
    }
}

impl FlowConfig {
    /// Load the embedded configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(FLOW_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FlowConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.row_capacity < 1 {
            return Err(ConfigError::NonPositiveRowCapacity(self.row_capacity));
        }
        if self.follow_interval_ms == 0 {
            return Err(ConfigError::ZeroFollowInterval);
        }
        let row_gaps = (self.row_capacity - 1).checked_mul(self.child_padding);
        if row_gaps.is_none_or(|gaps| gaps.unsigned_abs() > MAX_ROW_GAPS) {
            return Err(ConfigError::PaddingTooLarge {
                row_capacity: self.row_capacity,
                padding: self.child_padding,
            });
        }
        if let Some(&index) = self
            .gone_children
            .iter()
            .find(|&&index| index >= self.child_count)
        {
            return Err(ConfigError::GoneChildOutOfRange {
                index,
                child_count: self.child_count,
            });
        }
        Ok(())
    }

    pub fn metrics(&self) -> FlowMetrics {
        FlowMetrics {
            row_capacity: self.row_capacity,
            padding: self.child_padding,
            insets: self.insets,
        }
    }

    pub fn follow_interval(&self) -> Duration {
        Duration::from_millis(self.follow_interval_ms)
    }

    pub fn is_gone(&self, index: usize) -> bool {
        self.gone_children.contains(&index)
    }
}

/// System to load the flow configuration.
/// Runs first in Startup; falls back to defaults if the embedded file is bad.
pub fn setup_flow_config(mut commands: Commands) {
    let config = match FlowConfig::load() {
        Ok(config) => {
            info!("✓ Flow config loaded:");
            info!(
                "  - {} cells, {} per row, padding {}",
                config.child_count, config.row_capacity, config.child_padding
            );
            info!("  - follow interval {}ms", config.follow_interval_ms);
            if !config.gone_children.is_empty() {
                info!("  - gone cells: {:?}", config.gone_children);
            }
            config
        }
        Err(e) => {
            error!("Failed to load flow config: {}", e);
            warn!("Falling back to default flow config");
            FlowConfig::default()
        }
    };

    commands.insert_resource(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = FlowConfig::load().unwrap();
        assert_eq!(config.row_capacity, 7);
        assert_eq!(config.child_padding, 10);
        assert_eq!(config.follow_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = FlowConfig::from_json(r#"{ "child_count": 10 }"#).unwrap();
        assert_eq!(config.child_count, 10);
        assert_eq!(config.row_capacity, 7);
        assert_eq!(config.insets, Insets::default());
        assert!(config.gone_children.is_empty());
    }

    #[test]
    fn test_metrics_from_config() {
        let config = FlowConfig::from_json(
            r#"{ "row_capacity": 5, "child_padding": 4, "insets": { "left": 8, "right": 2 } }"#,
        )
        .unwrap();
        let metrics = config.metrics();

        assert_eq!(metrics.row_capacity, 5);
        assert_eq!(metrics.padding, 4);
        assert_eq!(metrics.insets.left, 8);
        assert_eq!(metrics.insets.top, 0);
        assert_eq!(metrics.insets.right, 2);
    }

    #[test]
    fn test_invalid_row_capacity() {
        assert_eq!(
            FlowConfig::from_json(r#"{ "row_capacity": 0 }"#),
            Err(ConfigError::NonPositiveRowCapacity(0))
        );
    }

    #[test]
    fn test_invalid_interval() {
        assert_eq!(
            FlowConfig::from_json(r#"{ "follow_interval_ms": 0 }"#),
            Err(ConfigError::ZeroFollowInterval)
        );
    }

    #[test]
    fn test_padding_too_large() {
        assert_eq!(
            FlowConfig::from_json(r#"{ "child_padding": 2147483647 }"#),
            Err(ConfigError::PaddingTooLarge {
                row_capacity: 7,
                padding: i32::MAX
            })
        );
        // a single cell per row has no gaps, so any padding is fine
        assert!(
            FlowConfig::from_json(r#"{ "row_capacity": 1, "child_padding": 2147483647 }"#).is_ok()
        );
        // negative padding is still allowed
        assert!(FlowConfig::from_json(r#"{ "child_padding": -12 }"#).is_ok());
    }

    #[test]
    fn test_gone_child_out_of_range() {
        let err = FlowConfig::from_json(r#"{ "child_count": 3, "gone_children": [1, 3] }"#)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::GoneChildOutOfRange {
                index: 3,
                child_count: 3
            }
        );
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            FlowConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_is_gone() {
        let config =
            FlowConfig::from_json(r#"{ "child_count": 4, "gone_children": [2] }"#).unwrap();
        assert!(config.is_gone(2));
        assert!(!config.is_gone(1));
    }
}
