//! Evidence Map - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for browsing the oncology evidence map served
//! by the backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (unique-study count)                                 │
//! ├──────────────────┬──────────────────────────────────────────┤
//! │  FilterPanel     │  Hero                                     │
//! │  (4 dropdowns,   │  ChartView (SVG from /api/map)            │
//! │   categories)    │  DataTable (collapsible)                  │
//! │                  │  LogsPanel (SSE)                          │
//! ├──────────────────┴──────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every dropdown change updates the selection signal, which refetches
//! `/api/map`.
//!
//! # Modules
//!
//! - [`types`] - API payloads, filter selection, logs
//! - [`components`] - UI components
//! - [`services`] - Backend communication

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Filters
    FilterField, FilterSelection,
    // API
    MapResponse, OptionsResponse, StudyRow,
    // Logs
    LogEntry, LogLevel,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Evidence Map - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_TITLE/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (selection, set_selection) = create_signal(FilterSelection::default());
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    init_sse_logs(set_logs);

    let options = create_local_resource(|| (), |_| async move {
        fetch_options(BACKEND_URL).await
    });

    let map = create_local_resource(
        move || selection.get(),
        |selection| async move {
            log::info!("🗺️ Fetching map for {:?}", selection);
            fetch_map(BACKEND_URL, &selection).await
        },
    );

    let total_studies = Signal::derive(move || {
        map.get()
            .and_then(|result| result.ok())
            .map(|m| m.total_studies)
    });

    view! {
        <Header total_studies=total_studies/>

        <div class="layout">
            <Suspense fallback=|| view! { <aside class="sidebar">"Loading filters..."</aside> }>
                {move || options.get().map(|result| match result {
                    Ok(opts) => view! {
                        <FilterPanel options=opts selection=selection set_selection=set_selection/>
                    }.into_view(),
                    Err(e) => view! { <aside class="sidebar error">{e.to_string()}</aside> }.into_view(),
                })}
            </Suspense>

            <div class="container">
                <Hero/>

                <Suspense fallback=|| view! { <div class="loading">"Rendering map..."</div> }>
                    {move || map.get().map(|result| match result {
                        Ok(m) => view! {
                            <ChartView svg=m.svg unmapped=m.unmapped_confidence/>
                            <DataTable rows=m.rows/>
                        }.into_view(),
                        Err(e) => {
                            log::error!("❌ {}", e);
                            view! { <div class="error">{e.to_string()}</div> }.into_view()
                        }
                    })}
                </Suspense>

                <LogsPanel logs=logs set_logs=set_logs/>
            </div>
        </div>

        <Footer/>
    }
}
