//! Common types used across the frontend application.
//!
//! These mirror the JSON payloads of the backend API.
//!
//! # Categories
//!
//! - **Filter Types** - Dropdown state and query string
//! - **API Types** - `/api/options` and `/api/map` responses
//! - **Log Types** - Real-time log streaming
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Filter Types
// =============================================================================

/// The four sidebar dropdowns.
///
/// `None` means "All".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub country: Option<String>,
    pub population: Option<String>,
    pub adverse_effect: Option<String>,
    pub intervention_group: Option<String>,
}

/// Which dropdown a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Country,
    Population,
    AdverseEffect,
    InterventionGroup,
}

impl FilterField {
    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Country => "Country",
            FilterField::Population => "Population",
            FilterField::AdverseEffect => "Adverse effect",
            FilterField::InterventionGroup => "Intervention group",
        }
    }

    /// Query parameter name understood by the backend.
    pub fn param(&self) -> &'static str {
        match self {
            FilterField::Country => "country",
            FilterField::Population => "population",
            FilterField::AdverseEffect => "adverse_effect",
            FilterField::InterventionGroup => "intervention_group",
        }
    }
}

impl FilterSelection {
    pub fn get(&self, field: FilterField) -> Option<&String> {
        match field {
            FilterField::Country => self.country.as_ref(),
            FilterField::Population => self.population.as_ref(),
            FilterField::AdverseEffect => self.adverse_effect.as_ref(),
            FilterField::InterventionGroup => self.intervention_group.as_ref(),
        }
    }

    /// Set a dropdown; `all_option` or an empty value clears it.
    pub fn set(&mut self, field: FilterField, value: String, all_option: &str) {
        let value = Some(value).filter(|v| !v.is_empty() && v != all_option);
        match field {
            FilterField::Country => self.country = value,
            FilterField::Population => self.population = value,
            FilterField::AdverseEffect => self.adverse_effect = value,
            FilterField::InterventionGroup => self.intervention_group = value,
        }
    }

    /// Query parameters for the set dropdowns.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            FilterField::Country,
            FilterField::Population,
            FilterField::AdverseEffect,
            FilterField::InterventionGroup,
        ]
        .into_iter()
        .filter_map(|field| self.get(field).map(|v| (field.param(), v.clone())))
        .collect()
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response from `/api/options`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub all_option: String,
    pub countries: Vec<String>,
    pub populations: Vec<String>,
    pub adverse_effects: Vec<String>,
    pub intervention_groups: Vec<String>,
    pub confidence_categories: Vec<String>,
    pub row_count: usize,
}

impl OptionsResponse {
    pub fn values(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Country => &self.countries,
            FilterField::Population => &self.populations,
            FilterField::AdverseEffect => &self.adverse_effects,
            FilterField::InterventionGroup => &self.intervention_groups,
        }
    }
}

/// One study row as shown in the data table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRow {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub country: Option<String>,
    pub population: Option<String>,
    pub adverse_effect: Option<String>,
    pub intervention_group: Option<String>,
    pub intervention: Option<String>,
    pub ordered_intervention: Option<String>,
    pub outcome_group: Option<String>,
    pub outcome: Option<String>,
    pub effect_result: Option<String>,
    pub confidence: String,
    pub size: u32,
}

/// Response from `/api/map`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    /// Status: "ready", "warning"
    pub status: String,
    pub selection: FilterSelection,
    pub total_studies: usize,
    pub row_count: usize,
    pub vertical_order: Vec<String>,
    pub horizontal_order: Vec<String>,
    pub boundaries: Vec<String>,
    pub unmapped_confidence: Vec<String>,
    pub rows: Vec<StudyRow>,
    /// Rendered chart, inlined as-is
    pub svg: String,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single log entry from the backend.
///
/// Received via SSE from `/api/logs` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// RFC 3339 timestamp (UTC)
    pub timestamp: String,
}

impl LogEntry {
    /// Local wall-clock time (HH:MM:SS), or the raw timestamp if unparsable.
    pub fn time(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| self.timestamp.clone())
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Network/HTTP error.
    Network(String),
    /// Backend answered with an error body.
    Server(String),
    /// Response did not match the expected shape.
    Decode(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server(msg) => write!(f, "Server error: {}", msg),
            AppError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
