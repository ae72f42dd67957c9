mod axis_label_format;
mod feed_controller;
mod fetch_coordinator;
mod nav_capabilities_resolver;
mod navigation_controller;
mod reference_area_controller;
mod viewport_config;
mod viewport_machine;
mod viewport_snapshot;
mod viewport_state;

pub use axis_label_format::{TickLabelPattern, format_tick_label, resolve_tick_label_pattern};
pub use fetch_coordinator::{FetchKey, FetchOutcome, FetchRequest};
pub use viewport_config::{PanStep, ViewportConfig};
pub use viewport_machine::{ActiveFeed, ViewportStateMachine};
pub use viewport_snapshot::{
    VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1, ViewportSnapshot, ViewportSnapshotJsonContractV1,
};
pub use viewport_state::{NavCapabilities, SubRange, ViewportState};
