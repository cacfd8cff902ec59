//! Catalog loading - built-in product list or a YAML override

use std::path::Path;

use crate::application::errors::ConfigError;
use crate::domain::entities::{Catalog, Product};

/// Parse a YAML list of products
pub fn parse_catalog(yaml: &str) -> Result<Catalog, ConfigError> {
    let products: Vec<Product> = serde_yaml::from_str(yaml)
        .map_err(|e| ConfigError::Parse(format!("Failed to parse catalog: {}", e)))?;
    Catalog::new(products).map_err(|e| ConfigError::InvalidValue("CATALOG_PATH".to_string(), e.to_string()))
}

/// Load the catalog from `path`, or the built-in one when no path is set
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, ConfigError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Parse(format!("Failed to read catalog {}: {}", path.display(), e)))?;
    parse_catalog(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
- id: 10
  name: Uludağ Gazoz 250 мл
  price: 7000
  description: Лимонад.
- id: 11
  name: Uludağ Limonata
  price: 7500
"#;
        let catalog = parse_catalog(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_id(11).unwrap().description, "");
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let yaml = "- {id: 1, name: a, price: 1}\n- {id: 1, name: b, price: 2}\n";
        match parse_catalog(yaml) {
            Err(ConfigError::InvalidValue(name, reason)) => {
                assert_eq!(name, "CATALOG_PATH");
                assert_eq!(reason, "duplicate product id 1");
            }
            other => panic!("expected InvalidValue, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_catalog("not: [a, list"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }
}
