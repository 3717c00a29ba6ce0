use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::Status;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse board configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Board configuration must list at least one status")]
    NoStatuses,

    #[error("Status {0} is listed more than once")]
    DuplicateStatus(Status),

    #[error("Position step must be a positive finite number, got {0}")]
    InvalidPositionStep(f64),

    #[error("Closest corners range must be a non-negative number, got {0}")]
    InvalidClosestCornersRange(f64),
}

/// Layout and tuning of the status board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BoardConfig {
    /// Columns in display order. New cards go into the first one.
    pub statuses: Vec<Status>,

    /// Gap between neighbouring positions when appending or renumbering.
    pub position_step: f64,

    /// How far away, in corner distance, a target may be and still be picked
    /// when neither the pointer nor the card touches any target.
    pub closest_corners_range: Option<f64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            statuses: Status::ALL.to_vec(),
            position_step: 1024.0,
            closest_corners_range: None,
        }
    }
}

impl BoardConfig {
    /// # Errors
    ///
    /// If the YAML is malformed or describes an invalid board.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// If serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> { Ok(serde_yaml::to_string(self)?) }

    /// # Errors
    ///
    /// The first problem found with the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.statuses.is_empty() {
            return Err(ConfigError::NoStatuses);
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.statuses.iter().find(|status| !seen.insert(**status)) {
            return Err(ConfigError::DuplicateStatus(*duplicate));
        }

        if !(self.position_step.is_finite() && self.position_step > 0.0) {
            return Err(ConfigError::InvalidPositionStep(self.position_step));
        }

        if let Some(range) = self.closest_corners_range {
            if range.is_nan() || range < 0.0 {
                return Err(ConfigError::InvalidClosestCornersRange(range));
            }
        }

        Ok(())
    }

    /// Status given to cards that enter the board.
    #[must_use]
    pub fn initial_status(&self) -> Status { self.statuses.first().copied().unwrap_or(Status::Drafting) }
}
