//! Evidence spreadsheet loader.
//!
//! Reads the study table from an Excel/ODS workbook or a CSV export and
//! converts every line into a typed [`StudyRow`].
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ .xlsx / .csv │────▶│  RawTable    │────▶│  StudyRow[]  │
//! │              │     │ (cells)      │     │ (normalized) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

pub mod columns;
pub mod delimited;
pub mod workbook;

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::StudyRow;
use crate::transform::normalize_confidence;
use columns::{Column, ColumnMap};

pub use delimited::{decode_content, detect_delimiter, detect_encoding, read_csv_bytes};
pub use workbook::read_workbook;

/// Header row plus cell text, empty cells as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Load the spreadsheet at `path` into normalized study rows.
///
/// The format is picked from the file extension. Confidence levels are
/// normalized and the size weight is set to 1.
pub fn load_rows<P: AsRef<Path>>(path: P) -> LoadResult<Vec<StudyRow>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        "csv" | "tsv" | "txt" => read_csv_bytes(&std::fs::read(path)?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let mut rows = rows_from_table(&table)?;
    normalize_confidence(&mut rows);
    Ok(rows)
}

/// Convert a raw table into study rows.
///
/// Fails when a required column is missing. Lines where every cell is
/// empty are skipped.
pub fn rows_from_table(table: &RawTable) -> LoadResult<Vec<StudyRow>> {
    if table.headers.is_empty() {
        return Err(LoadError::EmptySheet);
    }
    let map = ColumnMap::resolve(&table.headers)?;

    let rows = table
        .rows
        .iter()
        .filter(|cells| cells.iter().any(Option::is_some))
        .map(|cells| {
            let text = |column: Column| -> Option<String> {
                map.index(column)
                    .and_then(|i| cells.get(i))
                    .cloned()
                    .flatten()
            };

            StudyRow {
                title: text(Column::Title),
                year: text(Column::Year).as_deref().and_then(parse_year),
                country: text(Column::Country),
                population: text(Column::Population),
                adverse_effect: text(Column::AdverseEffect),
                intervention_group: text(Column::InterventionGroup),
                intervention: text(Column::Intervention),
                ordered_intervention: text(Column::OrderedIntervention),
                outcome_group: text(Column::OutcomeGroup),
                outcome: text(Column::Outcome),
                effect_result: text(Column::EffectResult),
                confidence: text(Column::ConfidenceLevel).unwrap_or_default(),
                size: 1,
            }
        })
        .collect();

    Ok(rows)
}

/// Parse a year cell, accepting float renderings such as `2019.0`.
pub fn parse_year(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0)
            .map(|y| y as i64)
    })
}

/// Turn a trimmed cell into `None` when empty.
///
/// Every text cell goes through here, so `"Brazil "` and `"Brazil"` are
/// one filter value.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Title;Year;Country;Population;Adverse Effect;Intervention Group;\
Intervention (Ordered);Outcome Group;Outcome;Effect Result;Confidence Level";

    fn table(lines: &[&[&str]]) -> RawTable {
        RawTable {
            headers: HEADER.split(';').map(String::from).collect(),
            rows: lines
                .iter()
                .map(|cells| cells.iter().map(|c| non_empty(c)).collect())
                .collect(),
        }
    }

    #[test]
    fn test_rows_from_table() {
        let t = table(&[&[
            "Study A", "2019.0", "Brazil", "Adults", "Nausea", "Drugs", "Ondansetron",
            "Symptoms", "Vomiting", "Reduced", "moderado",
        ]]);
        let rows = rows_from_table(&t).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title.as_deref(), Some("Study A"));
        assert_eq!(rows[0].year, Some(2019));
        assert_eq!(rows[0].ordered_intervention.as_deref(), Some("Ondansetron"));
        assert_eq!(rows[0].intervention, None);
        assert_eq!(rows[0].size, 1);
        // normalization happens in load_rows, not here
        assert_eq!(rows[0].confidence, "moderado");
    }

    #[test]
    fn test_blank_lines_skipped_and_missing_cells_null() {
        let t = table(&[&["", "", ""], &["Study B", "", "Chile"]]);
        let rows = rows_from_table(&t).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country.as_deref(), Some("Chile"));
        assert_eq!(rows[0].year, None);
        assert_eq!(rows[0].outcome, None);
        assert_eq!(rows[0].confidence, "");
    }

    #[test]
    fn test_cells_are_trimmed_so_variants_merge() {
        let t = table(&[
            &["Study A", "2020", "Brazil "],
            &["Study B", "2021", " Brazil"],
        ]);
        let rows = rows_from_table(&t).unwrap();
        assert_eq!(rows[0].country, rows[1].country);
        assert_eq!(rows[0].country.as_deref(), Some("Brazil"));
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = rows_from_table(&RawTable::default()).unwrap_err();
        assert!(matches!(err, LoadError::EmptySheet));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year(" 2018.0 "), Some(2018));
        assert_eq!(parse_year("2018.5"), None);
        assert_eq!(parse_year("n/a"), None);
    }

    #[test]
    fn test_load_rows_from_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "Study A;2020;Brazil;Adults;Nausea;Drugs;Ondansetron;Symptoms;Vomiting;Reduced; MODERADO ").unwrap();
        writeln!(file, "Study B;2021;Chile;Children;Fatigue;Exercise;Walking;Quality of life;Fatigue score;Improved;baixo").unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].confidence, "Moderado");
        assert_eq!(rows[1].confidence, "Baixo");
        assert_eq!(rows[1].population.as_deref(), Some("Children"));
    }

    #[test]
    fn test_load_rows_missing_file() {
        let err = load_rows("/nonexistent/evidence.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_load_rows_unsupported_extension() {
        let err = load_rows("evidence.json").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "json"));
    }
}
