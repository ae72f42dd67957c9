pub mod axis_range;
pub mod primitives;
pub mod sample;
pub mod series_reshaper;
pub mod types;
pub mod windowing;
pub mod zoom_catalog;

pub use axis_range::{AxisDomain, AxisRangeTuning, domain_for, range_for_sides};
pub use sample::{ParsedSamples, Sample, parse_samples_json, parse_tuples};
pub use series_reshaper::{
    ReshapedSeries, SeriesFrame, empty_placeholder, merge, reshape, reshape_all, reshape_tuples,
};
pub use types::{AxisSide, DataPoint, FeedInfo, RangeBound, SeriesDescriptor, SeriesId, SeriesValue};
pub use windowing::{points_in_time_window, time_extent};
pub use zoom_catalog::{ZoomCatalog, ZoomPreset};
