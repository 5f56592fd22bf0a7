//! High-level pipeline: load the dataset once, derive a map per selection.
//!
//! # Example
//!
//! ```rust,ignore
//! use evidence_map::{EvidenceDataset, FilterSelection};
//!
//! let dataset = EvidenceDataset::load("mapa_de_evidencias_com_paises_e_bases.xlsx")?;
//! let map = dataset.build_map(&FilterSelection::default());
//! println!("{} unique studies", map.unique_titles);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::axes::{
    compute_group_boundaries, compute_horizontal_axis_order, compute_vertical_axis_order,
    vertical_labels,
};
use super::filters::{
    apply_filters, confidence_categories, filter_options, unique_title_count, FilterOptions,
};
use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::LoadResult;
use crate::models::{AxisEntry, ConfidenceLevel, FilterSelection, StudyRow};
use crate::parser::load_rows;

/// The study table, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceDataset {
    rows: Vec<StudyRow>,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl EvidenceDataset {
    /// Load and normalize the spreadsheet at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let path = path.as_ref();
        log_info(format!("Reading {}", path.display()));

        let rows = load_rows(path)?;
        log_success(format!("Loaded {} rows", rows.len()));

        let dataset = Self::from_rows(rows, path);
        let unmapped = dataset.unmapped_confidence();
        if !unmapped.is_empty() {
            log_warning(format!(
                "Confidence values without a color: {}",
                unmapped.join(", ")
            ));
        }

        Ok(dataset)
    }

    /// Wrap rows that are already normalized.
    pub fn from_rows(rows: Vec<StudyRow>, source: impl Into<PathBuf>) -> Self {
        Self {
            rows,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn rows(&self) -> &[StudyRow] {
        &self.rows
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dropdown values for the four filters.
    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.rows)
    }

    /// Normalized confidence values present in the dataset.
    pub fn confidence_categories(&self) -> Vec<String> {
        confidence_categories(&self.rows)
    }

    /// Confidence values outside the fixed vocabulary.
    pub fn unmapped_confidence(&self) -> Vec<String> {
        self.confidence_categories()
            .into_iter()
            .filter(|c| ConfidenceLevel::from_label(c).is_none())
            .collect()
    }

    /// Filter and derive both axis orderings for a selection.
    pub fn build_map(&self, selection: &FilterSelection) -> EvidenceMap {
        build_map(&self.rows, selection)
    }
}

/// Everything the chart and the table need for one selection.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceMap {
    pub selection: FilterSelection,
    pub rows: Vec<StudyRow>,
    /// Vertical axis, bottom to top, with the group of each label.
    pub vertical: Vec<AxisEntry>,
    pub vertical_order: Vec<String>,
    pub horizontal_order: Vec<String>,
    /// Labels where a new intervention group starts.
    pub boundaries: Vec<String>,
    pub unique_titles: usize,
}

/// Run filtering and axis computations on `rows`.
pub fn build_map(rows: &[StudyRow], selection: &FilterSelection) -> EvidenceMap {
    let filtered = apply_filters(rows, selection);
    let vertical = compute_vertical_axis_order(&filtered);

    EvidenceMap {
        selection: selection.clone(),
        vertical_order: vertical_labels(&vertical),
        horizontal_order: compute_horizontal_axis_order(&filtered),
        boundaries: compute_group_boundaries(&vertical),
        unique_titles: unique_title_count(&filtered),
        vertical,
        rows: filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(title: &str, country: &str, group: &str, label: &str, outcome: &str) -> StudyRow {
        StudyRow {
            title: Some(title.into()),
            year: Some(2020),
            country: Some(country.into()),
            intervention_group: Some(group.into()),
            ordered_intervention: Some(label.into()),
            outcome_group: Some("Symptoms".into()),
            outcome: Some(outcome.into()),
            confidence: "Moderado".into(),
            size: 1,
            ..Default::default()
        }
    }

    fn dataset() -> EvidenceDataset {
        EvidenceDataset::from_rows(
            vec![
                study("S1", "Brazil", "Drugs", "Ondansetron", "Nausea"),
                study("S1", "Brazil", "Drugs", "Aprepitant", "Vomiting"),
                study("S2", "Chile", "Exercise", "Walking", "Fatigue"),
                study("S3", "Chile", "Diet", "Ginger", "Nausea"),
                study("S4", "Spain", "Exercise", "Yoga", "Fatigue"),
            ],
            "test.csv",
        )
    }

    #[test]
    fn test_build_map_full() {
        let map = dataset().build_map(&FilterSelection::default());
        assert_eq!(map.rows.len(), 5);
        assert_eq!(map.unique_titles, 4);
        assert_eq!(
            map.vertical_order,
            vec!["Ginger", "Aprepitant", "Ondansetron", "Walking", "Yoga"]
        );
        assert_eq!(map.horizontal_order, vec!["Fatigue", "Nausea", "Vomiting"]);
        assert_eq!(map.boundaries, vec!["Aprepitant", "Walking"]);
    }

    #[test]
    fn test_build_map_filtered() {
        let selection = FilterSelection {
            country: Some("Brazil".into()),
            ..Default::default()
        };
        let map = dataset().build_map(&selection);
        assert_eq!(map.rows.len(), 2);
        assert_eq!(map.unique_titles, 1);
        assert!(map.boundaries.is_empty());
        assert_eq!(map.selection, selection);
    }

    #[test]
    fn test_build_map_empty_result() {
        let selection = FilterSelection {
            country: Some("Atlantis".into()),
            ..Default::default()
        };
        let map = dataset().build_map(&selection);
        assert!(map.rows.is_empty());
        assert_eq!(map.unique_titles, 0);
        assert!(map.vertical_order.is_empty());
        assert!(map.horizontal_order.is_empty());
        assert!(map.boundaries.is_empty());
    }

    #[test]
    fn test_unmapped_confidence() {
        let mut rows = dataset().rows().to_vec();
        rows[0].confidence = "Insufficient".into();
        let ds = EvidenceDataset::from_rows(rows, "test.csv");
        assert_eq!(ds.unmapped_confidence(), vec!["Insufficient"]);
        assert_eq!(ds.confidence_categories(), vec!["Insufficient", "Moderado"]);
    }
}
