//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::table::UNDEFINED_GROUP_KEY;

/// Defaults shared by table views.
///
/// # Example
///
/// ```
/// use ledger_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_default_page_size(Some(50))
///     .with_page_size_options(vec![25, 50, 100]);
/// assert!(config.validate().is_ok());
///
/// let config = TableConfig::from_json(r#"{ "default_page_size": null }"#).unwrap();
/// assert_eq!(config.default_page_size, None);
/// assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Page size for uncontrolled pagination when a table sets none.
    ///
    /// `None` disables pagination for such tables.
    ///
    /// Default: 25
    pub default_page_size: Option<usize>,

    /// Choices offered by page-size pickers.
    ///
    /// Default: 10, 25, 50, 100
    pub page_size_options: Vec<usize>,

    /// Group key for rows whose key cannot be derived.
    ///
    /// Default: `"undefined"`
    pub undefined_group_key: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: Some(25),
            page_size_options: vec![10, 25, 50, 100],
            undefined_group_key: UNDEFINED_GROUP_KEY.to_string(),
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config with pagination turned off.
    pub fn unpaginated() -> Self {
        Self {
            default_page_size: None,
            ..Self::default()
        }
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, page_size: Option<usize>) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Sets the page-size options.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the key used for rows without a group key.
    pub fn with_undefined_group_key(mut self, key: impl Into<String>) -> Self {
        self.undefined_group_key = key.into();
        self
    }

    /// Rejects zero page sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == Some(0) {
            return Err(ConfigError::invalid_page_size(0));
        }
        if let Some(&size) = self.page_size_options.iter().find(|&&s| s == 0) {
            return Err(ConfigError::InvalidPageSizeOption { size });
        }
        Ok(())
    }
}
