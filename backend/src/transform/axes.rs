//! Categorical axis ordering and group separators.
//!
//! The vertical axis lists interventions clustered by intervention group,
//! the horizontal axis lists outcomes clustered by outcome group.
//!
//! ```text
//!   group   label          boundary
//!   A       a1
//!   A       a2
//!   B       b1       ◀──── "b1"
//!   B       b2
//!   C       c1       ◀──── "c1"
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::{AxisEntry, StudyRow};

/// Ordered (group, label) pairs for the vertical axis.
///
/// Distinct pairs are ranked by the dense rank of their group in sorted
/// group order, then by label. Pairs with a null group or label are dropped.
pub fn compute_vertical_axis_order(rows: &[StudyRow]) -> Vec<AxisEntry> {
    let pairs: BTreeSet<(&str, &str)> = rows
        .iter()
        .filter_map(|r| {
            Some((
                r.intervention_group.as_deref()?,
                r.ordered_intervention.as_deref()?,
            ))
        })
        .collect();

    let ranks: BTreeMap<&str, usize> = pairs
        .iter()
        .map(|(group, _)| *group)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(rank, group)| (group, rank))
        .collect();

    let mut ordered: Vec<(usize, &str, &str)> = pairs
        .into_iter()
        .map(|(group, label)| (ranks[group], group, label))
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(b.2)));

    ordered
        .into_iter()
        .map(|(_, group, label)| AxisEntry::new(group, label))
        .collect()
}

/// The label sequence of a vertical axis ordering.
pub fn vertical_labels(entries: &[AxisEntry]) -> Vec<String> {
    entries.iter().map(|e| e.label.clone()).collect()
}

/// Distinct outcomes ordered by (outcome group, outcome).
///
/// Rows without an outcome are dropped; rows without an outcome group sort
/// after every named group. The first occurrence of an outcome decides its
/// position.
pub fn compute_horizontal_axis_order(rows: &[StudyRow]) -> Vec<String> {
    let mut keyed: Vec<(Option<&str>, &str)> = rows
        .iter()
        .filter_map(|r| Some((r.outcome_group.as_deref(), r.outcome.as_deref()?)))
        .collect();
    keyed.sort_by(|a, b| nulls_last(a.0, b.0).then_with(|| a.1.cmp(b.1)));

    let mut seen = HashSet::new();
    keyed
        .into_iter()
        .filter(|(_, outcome)| seen.insert(*outcome))
        .map(|(_, outcome)| outcome.to_string())
        .collect()
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Labels at which a new group starts, in axis order.
///
/// The first group never yields a boundary. Repeated labels are kept.
pub fn compute_group_boundaries(entries: &[AxisEntry]) -> Vec<String> {
    let mut boundaries = Vec::new();
    let mut previous: Option<&str> = None;

    for entry in entries {
        if let Some(prev) = previous {
            if prev != entry.group {
                boundaries.push(entry.label.clone());
            }
        }
        previous = Some(entry.group.as_str());
    }

    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervention(group: &str, label: &str) -> StudyRow {
        StudyRow {
            intervention_group: Some(group.into()),
            ordered_intervention: Some(label.into()),
            ..Default::default()
        }
    }

    fn outcome(group: Option<&str>, label: Option<&str>) -> StudyRow {
        StudyRow {
            outcome_group: group.map(String::from),
            outcome: label.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_vertical_order_scenario() {
        let rows = vec![
            intervention("A", "a2"),
            intervention("A", "a1"),
            intervention("B", "b1"),
        ];
        let entries = compute_vertical_axis_order(&rows);
        assert_eq!(vertical_labels(&entries), vec!["a1", "a2", "b1"]);
        assert_eq!(compute_group_boundaries(&entries), vec!["b1"]);
    }

    #[test]
    fn test_vertical_order_groups_contiguous() {
        let rows = vec![
            intervention("Surgery", "Laparoscopy"),
            intervention("Drugs", "Ondansetron"),
            intervention("Surgery", "Biopsy"),
            intervention("Drugs", "Aprepitant"),
            intervention("Drugs", "Ondansetron"),
            intervention("Diet", "Zinc"),
        ];
        let entries = compute_vertical_axis_order(&rows);
        let groups: Vec<&str> = entries.iter().map(|e| e.group.as_str()).collect();
        assert_eq!(groups, vec!["Diet", "Drugs", "Drugs", "Surgery", "Surgery"]);
        assert_eq!(
            vertical_labels(&entries),
            vec!["Zinc", "Aprepitant", "Ondansetron", "Biopsy", "Laparoscopy"]
        );

        // a group never reappears once left
        let mut closed = HashSet::new();
        for pair in entries.windows(2) {
            if pair[0].group != pair[1].group {
                closed.insert(pair[0].group.clone());
                assert!(!closed.contains(&pair[1].group));
            }
        }
    }

    #[test]
    fn test_vertical_order_drops_nulls() {
        let mut rows = vec![intervention("A", "a1")];
        rows.push(StudyRow {
            intervention_group: None,
            ordered_intervention: Some("orphan".into()),
            ..Default::default()
        });
        rows.push(StudyRow {
            intervention_group: Some("B".into()),
            ordered_intervention: None,
            ..Default::default()
        });
        let entries = compute_vertical_axis_order(&rows);
        assert_eq!(entries, vec![AxisEntry::new("A", "a1")]);
    }

    #[test]
    fn test_same_label_in_two_groups() {
        let rows = vec![intervention("B", "Other"), intervention("A", "Other")];
        let entries = compute_vertical_axis_order(&rows);
        assert_eq!(entries, vec![AxisEntry::new("A", "Other"), AxisEntry::new("B", "Other")]);
        assert_eq!(compute_group_boundaries(&entries), vec!["Other"]);
    }

    #[test]
    fn test_boundaries_count_and_position() {
        let entries = vec![
            AxisEntry::new("A", "a1"),
            AxisEntry::new("A", "a2"),
            AxisEntry::new("B", "b1"),
            AxisEntry::new("C", "c1"),
            AxisEntry::new("C", "c2"),
        ];
        let boundaries = compute_group_boundaries(&entries);
        assert_eq!(boundaries, vec!["b1", "c1"]);
        assert!(!boundaries.contains(&entries[0].label));
        assert!(compute_group_boundaries(&[]).is_empty());
        assert!(compute_group_boundaries(&entries[..2]).is_empty());
    }

    #[test]
    fn test_boundaries_follow_given_order() {
        // not re-sorted: a group that comes back yields another boundary
        let entries = vec![
            AxisEntry::new("B", "b1"),
            AxisEntry::new("A", "x"),
            AxisEntry::new("B", "x"),
        ];
        assert_eq!(compute_group_boundaries(&entries), vec!["x", "x"]);
    }

    #[test]
    fn test_horizontal_order() {
        let rows = vec![
            outcome(Some("Symptoms"), Some("Vomiting")),
            outcome(Some("Quality of life"), Some("Fatigue")),
            outcome(Some("Symptoms"), Some("Nausea")),
            outcome(Some("Symptoms"), Some("Vomiting")),
            outcome(None, Some("Unclassified")),
            outcome(Some("Symptoms"), None),
        ];
        assert_eq!(
            compute_horizontal_axis_order(&rows),
            vec!["Fatigue", "Nausea", "Vomiting", "Unclassified"]
        );
    }

    #[test]
    fn test_horizontal_first_occurrence_wins() {
        let rows = vec![
            outcome(Some("B"), Some("Pain")),
            outcome(Some("A"), Some("Pain")),
            outcome(Some("A"), Some("Sleep")),
        ];
        assert_eq!(compute_horizontal_axis_order(&rows), vec!["Pain", "Sleep"]);
    }

    #[test]
    fn test_empty_rows() {
        assert!(compute_vertical_axis_order(&[]).is_empty());
        assert!(compute_horizontal_axis_order(&[]).is_empty());
    }
}
