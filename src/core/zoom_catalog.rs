use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One preset window: duration, sampling interval and pan step together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomPreset {
    pub label: String,
    pub window_seconds: f64,
    pub interval_seconds: f64,
    pub pan_step_seconds: f64,
}

impl ZoomPreset {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        window_seconds: f64,
        interval_seconds: f64,
        pan_step_seconds: f64,
    ) -> Self {
        Self {
            label: label.into(),
            window_seconds,
            interval_seconds,
            pan_step_seconds,
        }
    }
}

/// Ordered, non-empty list of zoom presets with strictly increasing windows.
///
/// All lookups are total: they saturate at the catalog ends instead of
/// failing. The only fallible lookup is [`ZoomCatalog::nearest_preset`] when
/// it has to resolve the configured default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoomPreset>", into = "Vec<ZoomPreset>")]
pub struct ZoomCatalog {
    presets: Vec<ZoomPreset>,
}

impl ZoomCatalog {
    pub fn new(presets: Vec<ZoomPreset>) -> ChartResult<Self> {
        if presets.is_empty() {
            return Err(ChartError::Config(
                "zoom catalog must contain at least one preset".to_owned(),
            ));
        }

        for preset in &presets {
            if !preset.window_seconds.is_finite() || preset.window_seconds <= 0.0 {
                return Err(ChartError::Config(format!(
                    "zoom preset `{}` window must be finite and > 0",
                    preset.label
                )));
            }
            if !preset.interval_seconds.is_finite() || preset.interval_seconds < 0.0 {
                return Err(ChartError::Config(format!(
                    "zoom preset `{}` interval must be finite and >= 0",
                    preset.label
                )));
            }
            if !preset.pan_step_seconds.is_finite() || preset.pan_step_seconds < 0.0 {
                return Err(ChartError::Config(format!(
                    "zoom preset `{}` pan step must be finite and >= 0",
                    preset.label
                )));
            }
        }

        if let Some(pair) = presets
            .windows(2)
            .find(|pair| pair[0].window_seconds >= pair[1].window_seconds)
        {
            return Err(ChartError::Config(format!(
                "zoom catalog windows must be strictly increasing: `{}` ({}) precedes `{}` ({})",
                pair[0].label, pair[0].window_seconds, pair[1].label, pair[1].window_seconds
            )));
        }

        Ok(Self { presets })
    }

    /// Presets shipped with the crate, from five minutes up to two years.
    #[must_use]
    pub fn standard() -> Self {
        const MINUTE: f64 = 60.0;
        const HOUR: f64 = 3_600.0;
        const DAY: f64 = 86_400.0;

        Self {
            presets: vec![
                ZoomPreset::new("5m", 5.0 * MINUTE, 5.0, MINUTE),
                ZoomPreset::new("15m", 15.0 * MINUTE, 10.0, 5.0 * MINUTE),
                ZoomPreset::new("30m", 30.0 * MINUTE, 15.0, 10.0 * MINUTE),
                ZoomPreset::new("1h", HOUR, 30.0, 15.0 * MINUTE),
                ZoomPreset::new("3h", 3.0 * HOUR, 30.0, 30.0 * MINUTE),
                ZoomPreset::new("6h", 6.0 * HOUR, 30.0, HOUR),
                ZoomPreset::new("12h", 12.0 * HOUR, 60.0, 2.0 * HOUR),
                ZoomPreset::new("1d", DAY, 120.0, 6.0 * HOUR),
                ZoomPreset::new("3d", 3.0 * DAY, 300.0, 12.0 * HOUR),
                ZoomPreset::new("1w", 7.0 * DAY, 900.0, DAY),
                ZoomPreset::new("2w", 14.0 * DAY, 1_800.0, 2.0 * DAY),
                ZoomPreset::new("1M", 30.0 * DAY, HOUR, 7.0 * DAY),
                ZoomPreset::new("3M", 90.0 * DAY, 3.0 * HOUR, 30.0 * DAY),
                ZoomPreset::new("6M", 180.0 * DAY, 6.0 * HOUR, 60.0 * DAY),
                ZoomPreset::new("1y", 365.0 * DAY, 12.0 * HOUR, 90.0 * DAY),
                ZoomPreset::new("2y", 730.0 * DAY, DAY, 180.0 * DAY),
            ],
        }
    }

    #[must_use]
    pub fn presets(&self) -> &[ZoomPreset] {
        &self.presets
    }

    #[must_use]
    pub fn smallest(&self) -> &ZoomPreset {
        // Non-empty by construction.
        &self.presets[0]
    }

    #[must_use]
    pub fn largest(&self) -> &ZoomPreset {
        &self.presets[self.presets.len() - 1]
    }

    #[must_use]
    pub fn find_exact(&self, window_seconds: f64) -> Option<&ZoomPreset> {
        self.presets
            .iter()
            .find(|preset| preset.window_seconds == window_seconds)
    }

    /// Resolves a requested window to a preset.
    ///
    /// A zero window means "use the default" and must match a preset exactly;
    /// anything else resolves to the nearest preset.
    pub fn nearest_preset(
        &self,
        window_seconds: f64,
        default_window_seconds: f64,
    ) -> ChartResult<&ZoomPreset> {
        if window_seconds == 0.0 {
            return self.find_exact(default_window_seconds).ok_or_else(|| {
                ChartError::Config(format!(
                    "no zoom preset matches default window {default_window_seconds}s"
                ))
            });
        }
        Ok(self.nearest(window_seconds))
    }

    #[must_use]
    pub fn preset_for_exact_or_nearest_window(&self, window_seconds: f64) -> &ZoomPreset {
        self.find_exact(window_seconds)
            .unwrap_or_else(|| self.nearest(window_seconds))
    }

    /// Smallest preset strictly larger than `window_seconds`, else the largest.
    #[must_use]
    pub fn next_larger(&self, window_seconds: f64) -> &ZoomPreset {
        self.presets
            .iter()
            .find(|preset| preset.window_seconds > window_seconds)
            .unwrap_or_else(|| self.largest())
    }

    /// Largest preset strictly smaller than `window_seconds`, else the smallest.
    #[must_use]
    pub fn next_smaller(&self, window_seconds: f64) -> &ZoomPreset {
        self.presets
            .iter()
            .rev()
            .find(|preset| preset.window_seconds < window_seconds)
            .unwrap_or_else(|| self.smallest())
    }

    #[must_use]
    pub fn has_smaller_than(&self, window_seconds: f64) -> bool {
        self.smallest().window_seconds < window_seconds
    }

    #[must_use]
    pub fn has_larger_than(&self, window_seconds: f64) -> bool {
        self.largest().window_seconds > window_seconds
    }

    /// Ties resolve to the first (smaller) preset.
    fn nearest(&self, window_seconds: f64) -> &ZoomPreset {
        self.presets
            .iter()
            .min_by_key(|preset| OrderedFloat((preset.window_seconds - window_seconds).abs()))
            .unwrap_or_else(|| self.smallest())
    }
}

impl Default for ZoomCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<ZoomPreset>> for ZoomCatalog {
    type Error = ChartError;

    fn try_from(presets: Vec<ZoomPreset>) -> Result<Self, Self::Error> {
        Self::new(presets)
    }
}

impl From<ZoomCatalog> for Vec<ZoomPreset> {
    fn from(catalog: ZoomCatalog) -> Self {
        catalog.presets
    }
}
