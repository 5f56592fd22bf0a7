//! Equality filters and dropdown option lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{FilterSelection, StudyRow};

/// Keep the rows matching every non-null constraint of `selection`.
///
/// An empty selection returns all rows.
pub fn apply_filters(rows: &[StudyRow], selection: &FilterSelection) -> Vec<StudyRow> {
    rows.iter()
        .filter(|row| selection.matches(row))
        .cloned()
        .collect()
}

/// Distinct non-null values offered by each dropdown, sorted ascending.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub populations: Vec<String>,
    pub adverse_effects: Vec<String>,
    pub intervention_groups: Vec<String>,
}

/// Compute the dropdown values from the full dataset.
pub fn filter_options(rows: &[StudyRow]) -> FilterOptions {
    FilterOptions {
        countries: distinct_sorted(rows, |r| r.country.as_deref()),
        populations: distinct_sorted(rows, |r| r.population.as_deref()),
        adverse_effects: distinct_sorted(rows, |r| r.adverse_effect.as_deref()),
        intervention_groups: distinct_sorted(rows, |r| r.intervention_group.as_deref()),
    }
}

fn distinct_sorted<F>(rows: &[StudyRow], field: F) -> Vec<String>
where
    F: Fn(&StudyRow) -> Option<&str>,
{
    rows.iter()
        .filter_map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Number of distinct non-null study titles.
pub fn unique_title_count(rows: &[StudyRow]) -> usize {
    rows.iter()
        .filter_map(|r| r.title.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Distinct confidence values in first-seen order.
pub fn confidence_categories(rows: &[StudyRow]) -> Vec<String> {
    let mut seen = Vec::new();
    for row in rows {
        if !seen.contains(&row.confidence) {
            seen.push(row.confidence.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(title: &str, country: &str, population: &str, group: &str) -> StudyRow {
        StudyRow {
            title: Some(title.into()),
            country: Some(country.into()),
            population: Some(population.into()),
            adverse_effect: Some("Nausea".into()),
            intervention_group: Some(group.into()),
            confidence: "Alto".into(),
            size: 1,
            ..Default::default()
        }
    }

    fn dataset() -> Vec<StudyRow> {
        vec![
            study("S1", "Brazil", "Adults", "Drugs"),
            study("S2", "Brazil", "Children", "Exercise"),
            study("S3", "Chile", "Adults", "Drugs"),
            study("S4", "Portugal", "Adults", "Diet"),
            study("S5", "Spain", "Children", "Drugs"),
        ]
    }

    #[test]
    fn test_filter_by_country() {
        let sel = FilterSelection {
            country: Some("Brazil".into()),
            ..Default::default()
        };
        let filtered = apply_filters(&dataset(), &sel);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.country.as_deref() == Some("Brazil")));
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let rows = dataset();
        assert_eq!(apply_filters(&rows, &FilterSelection::default()), rows);
    }

    #[test]
    fn test_filter_is_exact_intersection() {
        let rows = dataset();
        let sel = FilterSelection {
            population: Some("Adults".into()),
            intervention_group: Some("Drugs".into()),
            ..Default::default()
        };
        let filtered = apply_filters(&rows, &sel);
        let titles: Vec<_> = filtered.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, vec!["S1", "S3"]);

        // everything left out violates at least one constraint
        for row in rows.iter().filter(|r| !filtered.contains(*r)) {
            assert!(!sel.matches(row));
        }

        // constraint order does not matter
        let by_group = apply_filters(
            &rows,
            &FilterSelection { intervention_group: sel.intervention_group.clone(), ..Default::default() },
        );
        let then_population = apply_filters(
            &by_group,
            &FilterSelection { population: sel.population.clone(), ..Default::default() },
        );
        assert_eq!(then_population, filtered);
    }

    #[test]
    fn test_no_partial_matching() {
        let sel = FilterSelection {
            country: Some("Bra".into()),
            ..Default::default()
        };
        assert!(apply_filters(&dataset(), &sel).is_empty());
    }

    #[test]
    fn test_filter_options_sorted_and_distinct() {
        let mut rows = dataset();
        rows.push(StudyRow::default());
        let options = filter_options(&rows);
        assert_eq!(options.countries, vec!["Brazil", "Chile", "Portugal", "Spain"]);
        assert_eq!(options.populations, vec!["Adults", "Children"]);
        assert_eq!(options.adverse_effects, vec!["Nausea"]);
        assert_eq!(options.intervention_groups, vec!["Diet", "Drugs", "Exercise"]);
    }

    #[test]
    fn test_unique_title_count() {
        let mut rows = dataset();
        rows.push(study("S1", "Brazil", "Adults", "Diet"));
        assert_eq!(unique_title_count(&rows), 5);
        assert_eq!(unique_title_count(&[]), 0);
    }

    #[test]
    fn test_confidence_categories_first_seen() {
        let mut rows = dataset();
        rows[1].confidence = "Baixo".into();
        rows[3].confidence = "Unclear".into();
        assert_eq!(confidence_categories(&rows), vec!["Alto", "Baixo", "Unclear"]);
    }
}
