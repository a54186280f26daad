//! `[validate]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [validate]
//! nav_paths = ["/", "/diensten", "/over-ons", "/contact", "/winkel"]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Core navigation paths every rendered page must link to.
    pub nav_paths: Vec<String>,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            nav_paths: ["/", "/diensten", "/over-ons", "/contact", "/winkel"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_validate_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.validate.nav_paths.len(), 5);
        assert!(config.validate.nav_paths.contains(&"/winkel".to_string()));
    }

    #[test]
    fn test_validate_custom() {
        let config = test_parse_config("[validate]\nnav_paths = [\"/\"]");
        assert_eq!(config.validate.nav_paths, vec!["/".to_string()]);
    }
}
