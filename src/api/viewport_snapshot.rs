use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ZoomPreset;
use crate::error::{ChartError, ChartResult};
use crate::interaction::NavigationMode;

use super::viewport_machine::ActiveFeed;
use super::{ViewportState, ViewportStateMachine};

pub const VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the machine used by the rendering layer, regression
/// tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub mode: NavigationMode,
    pub state: ViewportState,
    pub active_preset: ZoomPreset,
    pub feeds: Vec<ActiveFeed>,
    pub pending_fetches: usize,
    pub loaded_rows: usize,
}

/// Versioned envelope around a [`ViewportSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ViewportSnapshot,
}

#[derive(Serialize)]
struct ContractV1Ref<'a> {
    schema_version: u32,
    snapshot: &'a ViewportSnapshot,
}

impl ViewportStateMachine {
    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            mode: self.mode,
            state: self.state.clone(),
            active_preset: self.active_preset.clone(),
            feeds: self.feeds.values().cloned().collect(),
            pending_fetches: self.pending_fetches().len(),
            loaded_rows: self.loaded.as_ref().map_or(0, |frame| frame.data.len()),
        }
    }
}

impl ViewportSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("viewport snapshot is not serializable: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let envelope = ContractV1Ref {
            schema_version: VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self,
        };
        serde_json::to_string_pretty(&envelope).map_err(|e| {
            ChartError::InvalidData(format!("viewport contract v1 is not serializable: {e}"))
        })
    }

    /// Reads either a bare snapshot or a versioned envelope.
    ///
    /// A top-level `schema_version` field selects the envelope; any version
    /// other than v1 is rejected.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("viewport json is malformed: {e}")))?;

        let Some(version) = value.get("schema_version") else {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("bare viewport snapshot is invalid: {e}"))
            });
        };
        if version.as_u64() != Some(u64::from(VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1)) {
            return Err(ChartError::InvalidData(format!(
                "viewport contract schema {version} is not supported"
            )));
        }

        let envelope: ViewportSnapshotJsonContractV1 = serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidData(format!("viewport contract v1 is invalid: {e}")))?;
        Ok(envelope.snapshot)
    }
}
