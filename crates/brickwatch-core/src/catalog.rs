use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{Category, ConfigError};

/// The storefront being watched: its base URL and the relative path of each
/// polled category page.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Keyed by [`Category`]; iteration follows poll order.
    pub categories: BTreeMap<Category, String>,
}

impl CatalogConfig {
    /// Categories configured for polling, in poll order.
    pub fn configured_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Absolute URL of a category page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCategory`] if the category has no
    /// configured path, or [`ConfigError::Validation`] if the base URL and
    /// path cannot be joined.
    pub fn category_url(&self, category: Category) -> Result<String, ConfigError> {
        let path = self
            .categories
            .get(&category)
            .ok_or_else(|| ConfigError::UnknownCategory(category.as_key().to_string()))?;
        let base = self.site_url()?;
        base.join(path.trim_start_matches('/'))
            .map(String::from)
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "cannot join base_url '{}' with path '{path}': {e}",
                    self.base_url
                ))
            })
    }

    /// The storefront's base URL, with a trailing slash so relative joins
    /// append rather than replace the last path segment. Product links and
    /// images found on any category page resolve against this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `base_url` is not a valid URL.
    pub fn site_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| {
            ConfigError::Validation(format!("base_url '{}' is not a valid URL: {e}", self.base_url))
        })
    }
}

/// Load and validate the catalog configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
/// Unknown category keys fail at parse time.
pub fn load_catalog(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse and validate catalog YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_catalog(content: &str) -> Result<CatalogConfig, ConfigError> {
    let catalog: CatalogConfig =
        serde_yaml::from_str(content).map_err(ConfigError::CatalogFileParse)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    let base = catalog.site_url()?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use http or https",
            catalog.base_url
        )));
    }

    if catalog.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category must be configured".to_string(),
        ));
    }

    for (category, path) in &catalog.categories {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{category}' has an empty path"
            )));
        }
    }

    Ok(())
}
