//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first by the
//! binary) and can be overridden by CLI flags.

use std::path::PathBuf;

use crate::chart::ChartOptions;

/// Spreadsheet loaded when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "mapa_de_evidencias_com_paises_e_bases.xlsx";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable naming the spreadsheet.
pub const DATA_ENV: &str = "EVIDENCE_MAP_DATA";

/// Environment variable naming the HTTP port.
pub const PORT_ENV: &str = "EVIDENCE_MAP_PORT";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub chart: ChartOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            port: DEFAULT_PORT,
            chart: ChartOptions::default(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unparsable values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }
        if let Some(port) = lookup(PORT_ENV).and_then(|p| p.trim().parse().ok()) {
            config.port = port;
        }
        config
    }

    /// Apply CLI overrides.
    pub fn with_overrides(mut self, data: Option<PathBuf>, port: Option<u16>) -> Self {
        if let Some(data) = data {
            self.data_path = data;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
