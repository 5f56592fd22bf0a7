//! Evidence table transformer.
//!
//! This module turns the loaded study table into what the chart needs:
//! - Normalize: confidence text cleanup
//! - Filters: equality filters and dropdown options
//! - Axes: categorical axis ordering and group separators
//! - Pipeline: dataset lifecycle and per-selection maps

pub mod axes;
pub mod filters;
pub mod normalize;
pub mod pipeline;

pub use axes::{
    compute_group_boundaries, compute_horizontal_axis_order, compute_vertical_axis_order,
    vertical_labels,
};
pub use filters::{
    apply_filters, confidence_categories, filter_options, unique_title_count, FilterOptions,
};
pub use normalize::{normalize_confidence, title_case};
pub use pipeline::{build_map, EvidenceDataset, EvidenceMap};
