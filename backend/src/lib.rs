//! # Evidence Map - oncology evidence spreadsheet to interactive scatter map
//!
//! Loads a spreadsheet of studies, filters it by country, population,
//! adverse effect and intervention group, and draws outcomes × interventions
//! colored by confidence level.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ .xlsx/.csv  │────▶│   Parser    │────▶│  Transform  │────▶│    Chart    │
//! │ (once)      │     │ (typed rows)│     │ (filter+axes)│    │ (SVG)       │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evidence_map::{render, ChartOptions, EvidenceDataset, FilterSelection};
//!
//! let dataset = EvidenceDataset::load("mapa_de_evidencias_com_paises_e_bases.xlsx")?;
//! let map = dataset.build_map(&FilterSelection::default());
//! let chart = render(&map, &ChartOptions::default())?;
//! std::fs::write("map.svg", chart.svg)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`models`] - Study rows, confidence levels, filter selection
//! - [`parser`] - Spreadsheet loading
//! - [`transform`] - Filtering and axis ordering
//! - [`chart`] - SVG rendering
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Loading
pub mod parser;

// Transformation
pub mod transform;

// Rendering
pub mod chart;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppConfig;

pub use error::{LoadError, RenderError, ServerError};

pub use models::{confidence_color, AxisEntry, ConfidenceLevel, FilterSelection, StudyRow, ALL_OPTION};

pub use parser::{load_rows, rows_from_table, RawTable};

pub use transform::{
    apply_filters, build_map, compute_group_boundaries, compute_horizontal_axis_order,
    compute_vertical_axis_order, confidence_categories, filter_options, normalize_confidence,
    unique_title_count, vertical_labels, EvidenceDataset, EvidenceMap, FilterOptions,
};

pub use chart::{render, ChartOptions, RenderedChart};

pub use api::types::{error_response, MapQuery, MapResponse, OptionsResponse};

// Server
pub mod server {
    pub use crate::api::server::{start_server, AppState};
}
