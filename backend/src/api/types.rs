//! REST API types shared with the frontend.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::chart::RenderedChart;
use crate::models::{FilterSelection, StudyRow, ALL_OPTION};
use crate::transform::{EvidenceMap, FilterOptions};

/// Filter query string: `?country=Brazil&intervention_group=Drugs`.
///
/// Absent parameters, empty values and `All` mean no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapQuery {
    pub country: Option<String>,
    pub population: Option<String>,
    pub adverse_effect: Option<String>,
    pub intervention_group: Option<String>,
}

impl From<MapQuery> for FilterSelection {
    fn from(q: MapQuery) -> Self {
        FilterSelection::from_raw(q.country, q.population, q.adverse_effect, q.intervention_group)
    }
}

/// Dropdown contents for the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Value meaning "no constraint", listed first in every dropdown.
    pub all_option: String,
    #[serde(flatten)]
    pub filters: FilterOptions,
    /// Normalized confidence values found in the dataset.
    pub confidence_categories: Vec<String>,
    pub row_count: usize,
}

impl OptionsResponse {
    pub fn new(filters: FilterOptions, confidence_categories: Vec<String>, row_count: usize) -> Self {
        Self {
            all_option: ALL_OPTION.to_string(),
            filters,
            confidence_categories,
            row_count,
        }
    }
}

/// The filtered map sent to the frontend after every filter change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    /// "ready", or "warning" when some confidence values have no color
    pub status: String,
    pub selection: FilterSelection,
    /// Distinct study titles in the filtered set
    pub total_studies: usize,
    pub row_count: usize,
    pub vertical_order: Vec<String>,
    pub horizontal_order: Vec<String>,
    pub boundaries: Vec<String>,
    pub unmapped_confidence: Vec<String>,
    pub rows: Vec<StudyRow>,
    /// Rendered scatter chart
    pub svg: String,
}

impl MapResponse {
    pub fn new(map: EvidenceMap, chart: RenderedChart) -> Self {
        Self {
            status: if chart.unmapped.is_empty() { "ready" } else { "warning" }.to_string(),
            selection: map.selection,
            total_studies: map.unique_titles,
            row_count: map.rows.len(),
            vertical_order: map.vertical_order,
            horizontal_order: map.horizontal_order,
            boundaries: map.boundaries,
            unmapped_confidence: chart.unmapped,
            rows: map.rows,
            svg: chart.svg,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}
