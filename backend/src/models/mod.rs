//! Domain models for the evidence map.
//!
//! - [`StudyRow`] - One study/outcome pairing loaded from the spreadsheet
//! - [`ConfidenceLevel`] - Fixed five-level quality-of-evidence rating
//! - [`FilterSelection`] - The four optional dropdown constraints
//! - [`AxisEntry`] - A (group, label) pair on a categorical axis

use serde::{Deserialize, Serialize};

// =============================================================================
// Study Row
// =============================================================================

/// A single row of the evidence spreadsheet.
///
/// Text attributes are `None` when the cell is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyRow {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub country: Option<String>,
    pub population: Option<String>,
    pub adverse_effect: Option<String>,
    pub intervention_group: Option<String>,
    /// Raw intervention label, when the sheet carries one.
    pub intervention: Option<String>,
    /// Intervention label used on the vertical axis.
    pub ordered_intervention: Option<String>,
    pub outcome_group: Option<String>,
    pub outcome: Option<String>,
    pub effect_result: Option<String>,
    /// Normalized confidence text (see [`crate::transform::normalize_confidence`]).
    pub confidence: String,
    /// Marker size weight, always 1.
    pub size: u32,
}

// =============================================================================
// Confidence Level
// =============================================================================

/// Quality-of-evidence rating, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    /// All levels in ascending order.
    pub const ALL: [ConfidenceLevel; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Moderate,
        Self::High,
        Self::VeryHigh,
    ];

    /// Match a normalized (title-cased) label.
    ///
    /// Accepts the English labels and the Portuguese ones used by the
    /// source spreadsheets. Anything else is unmapped.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Very Low" | "Muito Baixo" => Some(Self::VeryLow),
            "Low" | "Baixo" => Some(Self::Low),
            "Moderate" | "Moderado" => Some(Self::Moderate),
            "High" | "Alto" => Some(Self::High),
            "Very High" | "Muito Alto" => Some(Self::VeryHigh),
            _ => None,
        }
    }

    /// English display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Fixed marker color as a hex string.
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::VeryLow => "#FF4D4D",
            Self::Low => "#FF9999",
            Self::Moderate => "#4D79FF",
            Self::High => "#3366FF",
            Self::VeryHigh => "#0033CC",
        }
    }

    /// Fixed marker color as RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::VeryLow => (0xFF, 0x4D, 0x4D),
            Self::Low => (0xFF, 0x99, 0x99),
            Self::Moderate => (0x4D, 0x79, 0xFF),
            Self::High => (0x33, 0x66, 0xFF),
            Self::VeryHigh => (0x00, 0x33, 0xCC),
        }
    }
}

/// Color lookup for a normalized confidence value.
///
/// Returns `None` for values outside the fixed vocabulary.
pub fn confidence_color(label: &str) -> Option<&'static str> {
    ConfidenceLevel::from_label(label).map(|level| level.hex_color())
}

// =============================================================================
// Filter Selection
// =============================================================================

/// Dropdown value meaning "no constraint".
pub const ALL_OPTION: &str = "All";

/// Four independent equality constraints chosen in the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    pub country: Option<String>,
    pub population: Option<String>,
    pub adverse_effect: Option<String>,
    pub intervention_group: Option<String>,
}

impl FilterSelection {
    /// Build a selection from raw dropdown values.
    ///
    /// Empty strings, `"All"` and `"Todos"` become "no constraint".
    pub fn from_raw(
        country: Option<String>,
        population: Option<String>,
        adverse_effect: Option<String>,
        intervention_group: Option<String>,
    ) -> Self {
        Self {
            country: constraint(country),
            population: constraint(population),
            adverse_effect: constraint(adverse_effect),
            intervention_group: constraint(intervention_group),
        }
    }

    /// Normalize every field through [`FilterSelection::from_raw`] rules.
    pub fn normalized(self) -> Self {
        Self::from_raw(
            self.country,
            self.population,
            self.adverse_effect,
            self.intervention_group,
        )
    }

    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.population.is_none()
            && self.adverse_effect.is_none()
            && self.intervention_group.is_none()
    }

    /// Check a row against every non-null constraint.
    pub fn matches(&self, row: &StudyRow) -> bool {
        matches_field(&self.country, &row.country)
            && matches_field(&self.population, &row.population)
            && matches_field(&self.adverse_effect, &row.adverse_effect)
            && matches_field(&self.intervention_group, &row.intervention_group)
    }
}

fn constraint(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != ALL_OPTION && v != "Todos")
}

fn matches_field(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.as_deref() == Some(w.as_str()),
    }
}

// =============================================================================
// Axis Entry
// =============================================================================

/// A category on the vertical axis together with its group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AxisEntry {
    pub group: String,
    pub label: String,
}

impl AxisEntry {
    pub fn new(group: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_labels_both_languages() {
        assert_eq!(ConfidenceLevel::from_label("Moderado"), Some(ConfidenceLevel::Moderate));
        assert_eq!(ConfidenceLevel::from_label("Very High"), Some(ConfidenceLevel::VeryHigh));
        assert_eq!(ConfidenceLevel::from_label("MODERADO"), None);
        assert_eq!(confidence_color("Moderado"), Some("#4D79FF"));
        assert_eq!(confidence_color("Muito Baixo"), Some("#FF4D4D"));
        assert_eq!(confidence_color("Unclear"), None);
    }

    #[test]
    fn test_rgb_matches_hex() {
        for level in ConfidenceLevel::ALL {
            let (r, g, b) = level.rgb();
            assert_eq!(format!("#{:02X}{:02X}{:02X}", r, g, b), level.hex_color());
        }
    }

    #[test]
    fn test_selection_from_raw() {
        let sel = FilterSelection::from_raw(
            Some("All".into()),
            Some("Todos".into()),
            Some(String::new()),
            Some("Chemotherapy".into()),
        );
        assert!(sel.country.is_none());
        assert!(sel.population.is_none());
        assert!(sel.adverse_effect.is_none());
        assert_eq!(sel.intervention_group.as_deref(), Some("Chemotherapy"));
        assert!(!sel.is_empty());
        assert!(FilterSelection::default().is_empty());
    }

    #[test]
    fn test_selection_null_attribute_never_matches() {
        let row = StudyRow {
            country: None,
            ..Default::default()
        };
        let sel = FilterSelection {
            country: Some("Brazil".into()),
            ..Default::default()
        };
        assert!(!sel.matches(&row));
        assert!(FilterSelection::default().matches(&row));
    }
}
