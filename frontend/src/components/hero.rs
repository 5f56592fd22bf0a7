//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Evidence Map"</h1>
            <p class="subtitle">
                "Interventions for the adverse effects of cancer treatment, by outcome. "
                "Each point is a study; its color is the confidence of the evidence. "
                "Hover a point for the study details."
            </p>
        </div>
    }
}
