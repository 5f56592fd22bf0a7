//! Application configuration.
//!
//! Frontend constants. The backend URL matches the default
//! `EVIDENCE_MAP_PORT` of the server.

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Page title.
pub const APP_TITLE: &str = "Interactive Evidence Map in Oncology";

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;
