// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::bounds::ScreenCaps;

/// Tunables for zoom limits, double-tap steps and motion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// Ascending double-tap steps, as fractions between min (`0.0`) and max
    /// (`1.0`) scale.
    pub zoom_pivots: Vec<f64>,
    /// Zoomed content breadth may reach this multiple of the display breadth.
    pub breadth_multiplier: f64,
    /// Zoomed content length may reach this multiple of the display length.
    pub length_multiplier: f64,
    /// Duration of animated transforms, in milliseconds.
    pub transition_duration_ms: u64,
    /// Fling deceleration in pixels per second squared.
    pub fling_deceleration: f64,
    /// Fling velocities below this magnitude (pixels per second) are ignored.
    pub min_fling_velocity: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_pivots: vec![0.0, 0.5, 1.0],
            breadth_multiplier: 3.0,
            length_multiplier: 5.0,
            transition_duration_ms: 250,
            fling_deceleration: 2000.0,
            min_fling_velocity: 50.0,
        }
    }
}

impl ZoomConfig {
    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoom_pivots.is_empty() {
            return Err(ConfigError::EmptyZoomPivots);
        }
        for (index, &value) in self.zoom_pivots.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ZoomPivotOutOfRange { index, value });
            }
            if index > 0 && value <= self.zoom_pivots[index - 1] {
                return Err(ConfigError::ZoomPivotsNotAscending { index });
            }
        }
        positive("breadth_multiplier", self.breadth_multiplier)?;
        positive("length_multiplier", self.length_multiplier)?;
        positive("fling_deceleration", self.fling_deceleration)?;
        if !(self.min_fling_velocity.is_finite() && self.min_fling_velocity >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "min_fling_velocity",
                value: self.min_fling_velocity,
            });
        }
        Ok(())
    }

    pub(crate) fn screen_caps(&self) -> ScreenCaps {
        ScreenCaps {
            breadth_multiplier: self.breadth_multiplier,
            length_multiplier: self.length_multiplier,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

/// Reasons a [`ZoomConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// No double-tap steps were given.
    #[error("zoom pivot list is empty")]
    EmptyZoomPivots,
    /// A double-tap step lies outside `[0, 1]` or is NaN.
    #[error("zoom pivot {index} is {value}, expected a value in [0, 1]")]
    ZoomPivotOutOfRange {
        /// Position in the list.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// Double-tap steps must be strictly ascending.
    #[error("zoom pivot {index} does not exceed the previous pivot")]
    ZoomPivotsNotAscending {
        /// Position of the first out-of-order step.
        index: usize,
    },
    /// A numeric field is non-finite or out of range.
    #[error("{field} has invalid value {value}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ZoomConfig};

    #[test]
    fn default_is_valid() {
        assert_eq!(ZoomConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_pivots() {
        let mut c = ZoomConfig::default();
        c.zoom_pivots = vec![];
        assert_eq!(c.validate(), Err(ConfigError::EmptyZoomPivots));

        c.zoom_pivots = vec![0.0, 1.5];
        assert_eq!(
            c.validate(),
            Err(ConfigError::ZoomPivotOutOfRange {
                index: 1,
                value: 1.5
            })
        );

        c.zoom_pivots = vec![0.0, 0.5, 0.5];
        assert_eq!(
            c.validate(),
            Err(ConfigError::ZoomPivotsNotAscending { index: 2 })
        );

        c.zoom_pivots = vec![f64::NAN];
        assert!(matches!(
            c.validate(),
            Err(ConfigError::ZoomPivotOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_bad_numbers() {
        let c = ZoomConfig {
            fling_deceleration: 0.0,
            ..ZoomConfig::default()
        };
        let err = c.validate().unwrap_err();
        assert_eq!(err.to_string(), "fling_deceleration has invalid value 0");

        let c = ZoomConfig {
            breadth_multiplier: f64::INFINITY,
            ..ZoomConfig::default()
        };
        assert!(c.validate().is_err());

        let c = ZoomConfig {
            min_fling_velocity: -1.0,
            ..ZoomConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
