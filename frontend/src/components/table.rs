//! Collapsible raw data table.

use leptos::*;

use crate::types::StudyRow;

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[component]
pub fn DataTable(rows: Vec<StudyRow>) -> impl IntoView {
    let count = rows.len();

    let body = rows
        .into_iter()
        .map(|row| {
            view! {
                <tr>
                    <td>{cell(&row.title)}</td>
                    <td>{row.year.map(|y| y.to_string()).unwrap_or_default()}</td>
                    <td>{cell(&row.country)}</td>
                    <td>{cell(&row.population)}</td>
                    <td>{cell(&row.adverse_effect)}</td>
                    <td>{cell(&row.intervention_group)}</td>
                    <td>{cell(&row.ordered_intervention)}</td>
                    <td>{cell(&row.outcome_group)}</td>
                    <td>{cell(&row.outcome)}</td>
                    <td>{cell(&row.effect_result)}</td>
                    <td>{row.confidence.clone()}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <details class="data-table">
            <summary>"Show raw data (" {count} " rows)"</summary>
            <table>
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Year"</th>
                        <th>"Country"</th>
                        <th>"Population"</th>
                        <th>"Adverse effect"</th>
                        <th>"Intervention group"</th>
                        <th>"Intervention"</th>
                        <th>"Outcome group"</th>
                        <th>"Outcome"</th>
                        <th>"Effect"</th>
                        <th>"Confidence"</th>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </details>
    }
}
