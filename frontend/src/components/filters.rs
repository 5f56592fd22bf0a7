//! Sidebar with the four filter dropdowns.

use leptos::*;

use crate::types::{FilterField, FilterSelection, OptionsResponse};

const FIELDS: [FilterField; 4] = [
    FilterField::Country,
    FilterField::Population,
    FilterField::AdverseEffect,
    FilterField::InterventionGroup,
];

#[component]
pub fn FilterPanel(
    options: OptionsResponse,
    selection: ReadSignal<FilterSelection>,
    set_selection: WriteSignal<FilterSelection>,
) -> impl IntoView {
    let categories = options.confidence_categories.join(", ");

    let dropdowns = FIELDS
        .into_iter()
        .map(|field| {
            view! {
                <FilterSelect
                    field=field
                    all_option=options.all_option.clone()
                    values=options.values(field).to_vec()
                    selection=selection
                    set_selection=set_selection
                />
            }
        })
        .collect_view();

    view! {
        <aside class="sidebar">
            <div class="sidebar-title">"Filters"</div>
            {dropdowns}
            <div class="categories">
                <span class="categories-label">"Confidence categories found: "</span>
                {categories}
            </div>
        </aside>
    }
}

#[component]
fn FilterSelect(
    field: FilterField,
    all_option: String,
    values: Vec<String>,
    selection: ReadSignal<FilterSelection>,
    set_selection: WriteSignal<FilterSelection>,
) -> impl IntoView {
    let all_for_change = all_option.clone();
    let on_change = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        log::info!("🔎 {} = {}", field.label(), value);
        set_selection.update(|s| s.set(field, value, &all_for_change));
    };

    let all_for_value = all_option.clone();
    let current = move || {
        selection
            .get()
            .get(field)
            .cloned()
            .unwrap_or_else(|| all_for_value.clone())
    };

    view! {
        <label class="filter">
            <span class="filter-label">{field.label()}</span>
            <select class="filter-select" on:change=on_change prop:value=current>
                <option value=all_option.clone()>{all_option.clone()}</option>
                {values
                    .into_iter()
                    .map(|v| view! { <option value=v.clone()>{v}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}
