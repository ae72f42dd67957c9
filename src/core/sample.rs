use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::primitives::finite_or_none;
use crate::error::{ChartError, ChartResult};

/// Raw feed sample, classified once when the fetch payload is parsed.
///
/// Downsampled buckets arrive as `[timestamp, min, representative, max]`;
/// plain samples as `[timestamp, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sample {
    Scalar {
        time: f64,
        value: Option<f64>,
    },
    Banded {
        time: f64,
        min: Option<f64>,
        value: Option<f64>,
        max: Option<f64>,
    },
}

impl Sample {
    #[must_use]
    pub fn scalar(time: f64, value: Option<f64>) -> Self {
        Self::Scalar { time, value }
    }

    #[must_use]
    pub fn banded(time: f64, min: Option<f64>, value: Option<f64>, max: Option<f64>) -> Self {
        Self::Banded {
            time,
            min,
            value,
            max,
        }
    }

    /// Classifies a positional tuple.
    ///
    /// Returns `None` for tuples of length 0, 1 or 3, and for tuples whose
    /// timestamp is null or non-finite. Tuples longer than four keep the
    /// first four fields. Non-finite values become null.
    #[must_use]
    pub fn from_tuple(tuple: &[Option<f64>]) -> Option<Self> {
        let time = finite_or_none(*tuple.first()?)?;
        match tuple.len() {
            2 => Some(Self::scalar(time, finite_or_none(tuple[1]))),
            n if n >= 4 => Some(Self::banded(
                time,
                finite_or_none(tuple[1]),
                finite_or_none(tuple[2]),
                finite_or_none(tuple[3]),
            )),
            _ => None,
        }
    }

    #[must_use]
    pub fn time(self) -> f64 {
        match self {
            Self::Scalar { time, .. } | Self::Banded { time, .. } => time,
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Scalar { value, .. } | Self::Banded { value, .. } => value,
        }
    }

    /// Envelope band, present only when both bounds are known.
    #[must_use]
    pub fn envelope(self) -> Option<[f64; 2]> {
        match self {
            Self::Scalar { .. } => None,
            Self::Banded { min, max, .. } => Some([min?, max?]),
        }
    }
}

/// Samples of a single feed together with the number of dropped tuples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedSamples {
    pub samples: Vec<Sample>,
    pub skipped: usize,
}

impl ParsedSamples {
    #[must_use]
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            skipped: 0,
        }
    }
}

/// Parses positional tuples, dropping malformed ones.
pub fn parse_tuples<T>(tuples: &[T]) -> ParsedSamples
where
    T: AsRef<[Option<f64>]>,
{
    let mut parsed = ParsedSamples {
        samples: Vec::with_capacity(tuples.len()),
        skipped: 0,
    };
    for tuple in tuples {
        match Sample::from_tuple(tuple.as_ref()) {
            Some(sample) => parsed.samples.push(sample),
            None => parsed.skipped += 1,
        }
    }
    trace!(
        accepted = parsed.samples.len(),
        skipped = parsed.skipped,
        "parsed sample tuples"
    );
    parsed
}

/// Parses a JSON fetch payload shaped as an array of sample arrays.
///
/// Non-numeric entries inside a row are read as null. Rows that are not arrays
/// count as skipped; a payload that is not an array at all is rejected.
pub fn parse_samples_json(payload: &Value) -> ChartResult<ParsedSamples> {
    let rows = payload.as_array().ok_or_else(|| {
        ChartError::InvalidData("sample payload must be a json array".to_owned())
    })?;

    let mut parsed = ParsedSamples {
        samples: Vec::with_capacity(rows.len()),
        skipped: 0,
    };
    for row in rows {
        let Some(items) = row.as_array() else {
            parsed.skipped += 1;
            continue;
        };
        let tuple: SmallVec<[Option<f64>; 4]> = items.iter().map(Value::as_f64).collect();
        match Sample::from_tuple(&tuple) {
            Some(sample) => parsed.samples.push(sample),
            None => parsed.skipped += 1,
        }
    }
    trace!(
        accepted = parsed.samples.len(),
        skipped = parsed.skipped,
        "parsed json sample payload"
    );
    Ok(parsed)
}
