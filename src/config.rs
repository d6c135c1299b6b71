use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming the filter configuration file.
pub const CONFIG_ENV_VAR: &str = "OLIGO_VIEWER_CONFIG";

/// Fallback config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "filters.json";

// ---------------------------------------------------------------------------
// FilterConfig – which column ids get which filter widget
// ---------------------------------------------------------------------------

/// Identifier sets driving column classification.
///
/// ```json
/// {
///   "search": ["id", "sequence"],
///   "numeric": ["gc_content"],
///   "date": ["created_at"],
///   "non_filterable": ["notes"]
/// }
/// ```
///
/// Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Columns filtered by free-text search.
    pub search: Vec<String>,
    /// Columns filtered by an inclusive numeric range.
    pub numeric: Vec<String>,
    /// Columns filtered by an inclusive date range.
    pub date: Vec<String>,
    /// Columns never offered in the filter panel.
    pub non_filterable: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        fn ids(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            search: ids(&["id", "email_address", "surname", "given_name"]),
            numeric: ids(&["risk_score"]),
            date: ids(&[
                "created_at",
                "updated_at",
                "date_of_birth",
                "date_of_incorporation",
                "time_of_posting",
                "time_of_transaction",
            ]),
            non_filterable: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing filter config")
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading filter config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Resolve the config the way `main` does: the env var path, else
    /// `filters.json` if present, else defaults. Errors are logged and
    /// replaced by defaults.
    pub fn discover() -> Self {
        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    log::info!("No {DEFAULT_CONFIG_FILE} found, using built-in identifier sets");
                    return Self::default();
                }
                local
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded filter config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load filter config: {e:#}");
                Self::default()
            }
        }
    }
}
