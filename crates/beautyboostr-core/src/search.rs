use crate::catalog::schema::SchemaVariant;
use crate::catalog::{load_catalog, Catalog};
use crate::model::{FunctionRule, IngredientRecord};
use serde::Serialize;
use std::path::Path;

/// Shown in place of any missing field.
pub const NOT_SPECIFIED: &str = "not specified";

/// Shown in a record heading when the name or localized name is missing.
pub const NAME_MISSING: &str = "N/A";

/// The browse view: one catalog load, then any number of searches.
///
/// A failed load is kept as its message; searches on it report
/// `SearchOutcome::Unavailable` instead of failing.
#[derive(Debug)]
pub struct BrowseView {
    catalog: Result<Catalog, String>,
}

impl BrowseView {
    pub fn open(path: &Path, variant: SchemaVariant) -> Self {
        let catalog = load_catalog(path, variant).map_err(|e| {
            tracing::warn!(error = %e, "catalog unavailable");
            e.to_string()
        });
        BrowseView { catalog }
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        BrowseView {
            catalog: Ok(catalog),
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref().ok()
    }

    pub fn search(&self, term: &str) -> SearchOutcome<'_> {
        let catalog = match &self.catalog {
            Ok(c) => c,
            Err(message) => return SearchOutcome::Unavailable { message },
        };
        let matches = filter_records(catalog.records(), catalog.variant(), term);
        tracing::debug!(term, matched = matches.len(), total = catalog.len(), "search");
        if matches.is_empty() {
            SearchOutcome::NoMatches {
                total: catalog.len(),
            }
        } else {
            SearchOutcome::Matches {
                total: catalog.len(),
                records: matches,
            }
        }
    }
}

#[derive(Debug)]
pub enum SearchOutcome<'a> {
    /// The catalog could not be loaded; nothing else is rendered.
    Unavailable { message: &'a str },
    /// The catalog loaded but no record name contains the search term.
    NoMatches { total: usize },
    Matches {
        total: usize,
        records: Vec<&'a IngredientRecord>,
    },
}

/// Records whose name contains `term`, ignoring case, in catalog order.
///
/// An empty term matches every record. A record without a name only
/// matches the empty term.
pub fn filter_records<'a>(
    records: &'a [IngredientRecord],
    variant: SchemaVariant,
    term: &str,
) -> Vec<&'a IngredientRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            variant
                .name_of(r)
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Display form of one record with every placeholder resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub name: String,
    pub localized_name: String,
    pub origin: String,
    pub nature: String,
    pub restrictions: String,
    pub rules: Vec<String>,
}

impl RecordSummary {
    /// Heading line, e.g. `Aqua (Вода)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.name, self.localized_name)
    }
}

pub fn summarize(record: &IngredientRecord, variant: SchemaVariant) -> RecordSummary {
    RecordSummary {
        name: or_placeholder(variant.name_of(record), NAME_MISSING),
        localized_name: or_placeholder(record.name_ua.as_deref(), NAME_MISSING),
        origin: or_placeholder(record.origin.as_deref(), NOT_SPECIFIED),
        nature: or_placeholder(record.nature.as_deref(), NOT_SPECIFIED),
        restrictions: or_placeholder(record.restrictions.as_deref(), NOT_SPECIFIED),
        rules: record.functions.iter().map(describe_rule).collect(),
    }
}

/// One rule as a sentence: effect first, then its conditions.
pub fn describe_rule(rule: &FunctionRule) -> String {
    format!(
        "{} for {} (if % = [{}] and pH = [{}])",
        or_placeholder(rule.function.as_deref(), NOT_SPECIFIED),
        or_placeholder(rule.target.as_deref(), NOT_SPECIFIED),
        or_placeholder(rule.if_percent.as_deref(), NOT_SPECIFIED),
        or_placeholder(rule.if_ph.as_deref(), NOT_SPECIFIED),
    )
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}
