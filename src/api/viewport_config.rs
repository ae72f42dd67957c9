use serde::{Deserialize, Serialize};

use crate::core::{AxisRangeTuning, ZoomCatalog, ZoomPreset};
use crate::error::{ChartError, ChartResult};

/// How far a window-mode pan moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanStep {
    /// `round(window_duration * move_fraction)`.
    #[default]
    Fraction,
    /// The active preset's `pan_step_seconds`.
    PresetStep,
}

/// Viewport bootstrap configuration.
///
/// Serializable so hosts can ship catalog and navigation tuning in a config
/// file. Construction of a [`super::ViewportStateMachine`] validates it and
/// fails fast on any defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub catalog: ZoomCatalog,
    #[serde(default = "default_window_seconds")]
    pub default_window_seconds: f64,
    #[serde(default = "default_move_fraction")]
    pub move_fraction: f64,
    #[serde(default = "default_zoom_fraction")]
    pub zoom_fraction: f64,
    #[serde(default)]
    pub pan_step: PanStep,
    #[serde(default)]
    pub axis_range: AxisRangeTuning,
    #[serde(default)]
    pub tick_label_utc_offset_seconds: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            catalog: ZoomCatalog::standard(),
            default_window_seconds: default_window_seconds(),
            move_fraction: default_move_fraction(),
            zoom_fraction: default_zoom_fraction(),
            pan_step: PanStep::default(),
            axis_range: AxisRangeTuning::default(),
            tick_label_utc_offset_seconds: 0,
        }
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn new(catalog: ZoomCatalog, default_window_seconds: f64) -> Self {
        Self {
            catalog,
            default_window_seconds,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_move_fraction(mut self, move_fraction: f64) -> Self {
        self.move_fraction = move_fraction;
        self
    }

    #[must_use]
    pub fn with_zoom_fraction(mut self, zoom_fraction: f64) -> Self {
        self.zoom_fraction = zoom_fraction;
        self
    }

    #[must_use]
    pub fn with_pan_step(mut self, pan_step: PanStep) -> Self {
        self.pan_step = pan_step;
        self
    }

    #[must_use]
    pub fn with_axis_range(mut self, axis_range: AxisRangeTuning) -> Self {
        self.axis_range = axis_range;
        self
    }

    #[must_use]
    pub fn with_tick_label_utc_offset_seconds(mut self, offset_seconds: i32) -> Self {
        self.tick_label_utc_offset_seconds = offset_seconds;
        self
    }

    /// Preset selected by `default_window_seconds`.
    pub fn default_preset(&self) -> ChartResult<&ZoomPreset> {
        self.catalog.nearest_preset(0.0, self.default_window_seconds)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.default_preset()?;

        if !self.move_fraction.is_finite() || self.move_fraction <= 0.0 || self.move_fraction > 1.0
        {
            return Err(ChartError::Config(
                "move fraction must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.zoom_fraction.is_finite() || self.zoom_fraction <= 0.0 || self.zoom_fraction >= 1.0
        {
            return Err(ChartError::Config(
                "zoom fraction must be finite and in (0, 1)".to_owned(),
            ));
        }
        if self.tick_label_utc_offset_seconds.unsigned_abs() >= 86_400 {
            return Err(ChartError::Config(
                "tick label utc offset must be within one day".to_owned(),
            ));
        }
        self.axis_range
            .validate()
            .map_err(|e| ChartError::Config(e.to_string()))?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_window_seconds() -> f64 {
    86_400.0
}

fn default_move_fraction() -> f64 {
    0.25
}

fn default_zoom_fraction() -> f64 {
    0.5
}
