use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a plotted feed.
///
/// Feeds come from the host catalog either as numeric ids or as named keys.
/// Serialized as a JSON number or string. All-digit strings read back as
/// `Numeric`, so ids used as JSON object keys survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesId {
    Numeric(u64),
    Named(String),
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for SeriesId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(id) => serializer.serialize_u64(*id),
            Self::Named(name) => serializer.serialize_str(name),
        }
    }
}

struct SeriesIdVisitor;

impl Visitor<'_> for SeriesIdVisitor {
    type Value = SeriesId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a string series id")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<SeriesId, E> {
        Ok(SeriesId::Numeric(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<SeriesId, E> {
        u64::try_from(value)
            .map(SeriesId::Numeric)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<SeriesId, E> {
        Ok(SeriesId::from_key(value))
    }
}

impl<'de> Deserialize<'de> for SeriesId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeriesIdVisitor)
    }
}

impl SeriesId {
    /// Reads a textual key; canonical decimal integers map to `Numeric`.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let canonical = !key.is_empty()
            && key.bytes().all(|b| b.is_ascii_digit())
            && (key == "0" || !key.starts_with('0'));
        match key.parse::<u64>() {
            Ok(id) if canonical => Self::Numeric(id),
            _ => Self::Named(key.to_owned()),
        }
    }
}

impl From<u64> for SeriesId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        Self::Named(value.to_owned())
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

/// Y-axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    #[default]
    Left,
    Right,
}

impl AxisSide {
    pub const ALL: [AxisSide; 2] = [AxisSide::Left, AxisSide::Right];
}

/// Either an explicit coordinate or "let the renderer decide".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBound {
    #[default]
    Auto,
    At(f64),
}

impl RangeBound {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::At(value) => Some(value),
        }
    }

    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Per-series payload of one row.
///
/// `value == None` means the downsampled bucket held no valid value; a series
/// with no sample at the row timestamp is simply absent from the row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesValue {
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl SeriesValue {
    #[must_use]
    pub fn scalar(value: Option<f64>) -> Self {
        Self { value, range: None }
    }

    #[must_use]
    pub fn banded(value: Option<f64>, range: Option<[f64; 2]>) -> Self {
        Self { value, range }
    }
}

/// One chart row: a shared x-axis timestamp plus sparse per-series values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: f64,
    #[serde(default)]
    pub series: IndexMap<SeriesId, SeriesValue>,
}

impl DataPoint {
    #[must_use]
    pub fn new(date: f64) -> Self {
        Self {
            date,
            series: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, id: SeriesId, value: SeriesValue) -> Self {
        self.series.insert(id, value);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &SeriesId) -> bool {
        self.series.contains_key(id)
    }

    /// Scalar value for `id`, `None` when absent or null.
    #[must_use]
    pub fn value(&self, id: &SeriesId) -> Option<f64> {
        self.series.get(id).and_then(|entry| entry.value)
    }

    #[must_use]
    pub fn range(&self, id: &SeriesId) -> Option<[f64; 2]> {
        self.series.get(id).and_then(|entry| entry.range)
    }
}

/// Registry entry for a plotted series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    pub id: SeriesId,
    pub display_name: String,
    pub axis_side: AxisSide,
}

impl SeriesDescriptor {
    #[must_use]
    pub fn new(
        id: impl Into<SeriesId>,
        display_name: impl Into<String>,
        axis_side: AxisSide,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            axis_side,
        }
    }
}

/// Selectable feed as reported by the host feed catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedInfo {
    pub id: SeriesId,
    pub display_name: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl FeedInfo {
    #[must_use]
    pub fn new(
        id: impl Into<SeriesId>,
        display_name: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            start_time,
            end_time,
        }
    }
}
