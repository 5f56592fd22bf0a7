use leptos::*;

use crate::APP_TITLE;

/// Top bar with the number of distinct studies in the current view.
#[component]
pub fn Header(total_studies: Signal<Option<usize>>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <span class="logo">{APP_TITLE}</span>
            </div>
            <div class="header-right">
                <span class="badge">
                    {move || match total_studies.get() {
                        Some(n) => format!("Total unique studies: {}", n),
                        None => "Total unique studies: --".to_string(),
                    }}
                </span>
            </div>
        </header>
    }
}
