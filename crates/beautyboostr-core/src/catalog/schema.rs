use crate::error::CatalogError;
use crate::model::IngredientRecord;
use std::fmt;
use std::str::FromStr;

/// Which key a catalog file uses for the ingredient name.
///
/// A deployment picks one variant at startup; a file never mixes them.
/// `InciName` is the legacy layout and is only supported for browsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaVariant {
    #[default]
    Inci,
    InciName,
}

impl SchemaVariant {
    /// JSON key holding the record name.
    pub fn name_key(self) -> &'static str {
        match self {
            SchemaVariant::Inci => "INCI",
            SchemaVariant::InciName => "INCI Name",
        }
    }

    /// The record's name under this variant, if present.
    pub fn name_of(self, record: &IngredientRecord) -> Option<&str> {
        match self {
            SchemaVariant::Inci => record.inci.as_deref(),
            SchemaVariant::InciName => record.inci_name.as_deref(),
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVariant::Inci => write!(f, "inci"),
            SchemaVariant::InciName => write!(f, "inci-name"),
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inci" => Ok(SchemaVariant::Inci),
            "inci-name" | "inci_name" | "inci name" | "legacy" => Ok(SchemaVariant::InciName),
            _ => Err(CatalogError::InvalidChoice {
                field: "schema",
                value: s.to_string(),
                expected: "inci, inci-name".into(),
            }),
        }
    }
}
