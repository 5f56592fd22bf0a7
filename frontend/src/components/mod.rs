//! UI Components for the evidence map.
//!
//! # Layout Components
//! - [`Header`] - Title bar with the unique-study count
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`FilterPanel`] - Sidebar dropdowns and confidence categories found
//! - [`ChartView`] - Rendered scatter chart
//! - [`DataTable`] - Collapsible raw data
//! - [`LogsPanel`] - Real-time server logs (SSE)

mod header;
mod hero;
mod filters;
mod chart;
mod table;
mod footer;
mod logs;

pub use header::*;
pub use hero::*;
pub use filters::*;
pub use chart::*;
pub use table::*;
pub use footer::*;
pub use logs::*;
