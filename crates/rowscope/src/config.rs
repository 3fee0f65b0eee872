//! Table options.
//!
//! Options deserialize from JSON or YAML with camelCase keys; every key is
//! optional.
//!
//! ```rust
//! use rowscope::{Density, TableOptions};
//!
//! let opts = TableOptions::from_yaml("pageSize: 25\ndensity: sm\nenableExport: false\n").unwrap();
//! assert_eq!(opts.page_size, 25);
//! assert_eq!(opts.density, Density::Sm);
//! assert!(!opts.enable_export);
//! assert!(opts.enable_filters);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};

/// Search box placeholder used by tables and card lists.
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

/// Row spacing hint passed through to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Sm,
    #[default]
    Md,
    Lg,
}

/// Feature toggles and presentation defaults for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    pub enable_global_search: bool,
    pub enable_filters: bool,
    pub enable_column_visibility: bool,
    pub enable_export: bool,
    /// Initial page size for table-owned pagination.
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub density: Density,
    /// Shown when the derived row set is empty.
    pub empty_message: String,
    pub search_placeholder: String,
    /// Base name of exported files.
    pub export_name: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            enable_global_search: true,
            enable_filters: true,
            enable_column_visibility: true,
            enable_export: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            density: Density::default(),
            empty_message: "No data to display.".to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            export_name: None,
        }
    }
}

impl TableOptions {
    /// Parses options from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses options from YAML.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = TableOptions::default();
        assert_eq!(opts.page_size, 10);
        assert_eq!(opts.page_size_options, vec![5, 10, 25, 50, 100]);
        assert_eq!(opts.empty_message, "No data to display.");
        assert_eq!(opts.search_placeholder, "Search...");
        assert!(opts.enable_global_search && opts.enable_column_visibility);
    }

    #[test]
    fn json_with_partial_keys() {
        let opts = TableOptions::from_json(
            r#"{"enableGlobalSearch": false, "exportName": "attendance", "pageSizeOptions": [2, 4]}"#,
        )
        .unwrap();
        assert!(!opts.enable_global_search);
        assert_eq!(opts.export_name.as_deref(), Some("attendance"));
        assert_eq!(opts.page_size_options, vec![2, 4]);
        assert_eq!(opts.page_size, 10);
    }

    #[test]
    fn empty_yaml_mapping_is_default() {
        let opts = TableOptions::from_yaml("{}").unwrap();
        assert_eq!(opts, TableOptions::default());
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(TableOptions::from_json("{not json").is_err());
        assert!(TableOptions::from_yaml("density: huge").is_err());
    }
}
