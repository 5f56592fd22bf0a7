//! Rendered scatter chart.

use leptos::*;

/// Inline the SVG produced by the backend; its markers carry hover titles.
#[component]
pub fn ChartView(svg: String, unmapped: Vec<String>) -> impl IntoView {
    let warning = (!unmapped.is_empty()).then(|| {
        view! {
            <div class="chart-warning">
                "⚠️ No color for confidence values: " {unmapped.join(", ")}
            </div>
        }
    });

    view! {
        <div class="chart-section">
            {warning}
            <div class="chart" inner_html=svg></div>
        </div>
    }
}
