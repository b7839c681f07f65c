pub mod schema;

use crate::error::CatalogError;
use crate::model::IngredientRecord;
use schema::SchemaVariant;
use std::path::Path;

/// Catalog location used when none is given.
pub const DEFAULT_CATALOG_PATH: &str = "data/ingredients.json";

const UTF8_BOM: char = '\u{feff}';

/// A loaded catalog. Records keep the order of the file and are never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    variant: SchemaVariant,
    records: Vec<IngredientRecord>,
}

impl Catalog {
    pub fn new(variant: SchemaVariant, records: Vec<IngredientRecord>) -> Self {
        Catalog { variant, records }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn records(&self) -> &[IngredientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a catalog from a JSON file.
///
/// Every failure is reported as `CatalogError::CatalogLoad` carrying the path
/// and a readable reason.
pub fn load_catalog(path: &Path, variant: SchemaVariant) -> Result<Catalog, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let text = String::from_utf8(bytes).map_err(|e| CatalogError::CatalogLoad {
        path: path.to_path_buf(),
        reason: format!("file is not valid UTF-8: {e}"),
    })?;
    let catalog = parse_catalog(&text, variant).map_err(|e| CatalogError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!(
        path = %path.display(),
        records = catalog.len(),
        schema = %variant,
        name_key = variant.name_key(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse catalog JSON text. A leading byte-order mark is ignored.
pub fn parse_catalog(json: &str, variant: SchemaVariant) -> Result<Catalog, CatalogError> {
    let json = json.strip_prefix(UTF8_BOM).unwrap_or(json);
    let records: Vec<IngredientRecord> = serde_json::from_str(json)?;
    Ok(Catalog::new(variant, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_file_order() {
        let json = r#"[{"INCI": "Aqua"}, {"INCI": "Glycerin"}, {"INCI": "Niacinamide"}]"#;
        let catalog = parse_catalog(json, SchemaVariant::Inci).unwrap();
        let names: Vec<_> = catalog
            .records()
            .iter()
            .map(|r| r.inci.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["Aqua", "Glycerin", "Niacinamide"]);
    }

    #[test]
    fn test_parse_strips_bom() {
        let json = "\u{feff}[{\"INCI\": \"Aqua\"}]";
        let catalog = parse_catalog(json, SchemaVariant::Inci).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_non_array_root_rejected() {
        assert!(parse_catalog(r#"{"INCI": "Aqua"}"#, SchemaVariant::Inci).is_err());
    }

    #[test]
    fn test_empty_array_is_valid() {
        let catalog = parse_catalog("[]", SchemaVariant::Inci).unwrap();
        assert!(catalog.is_empty());
    }
}
