use beautyboostr_core::error::CatalogError;
use beautyboostr_core::SearchOutcome;
use std::io::Write;

/// Write matching records as a JSON array. An unavailable catalog writes
/// nothing to `out`; its message goes to stderr.
pub fn print_outcome<W: Write>(
    out: &mut W,
    outcome: &SearchOutcome<'_>,
) -> Result<(), CatalogError> {
    match outcome {
        SearchOutcome::Unavailable { message } => {
            eprintln!("Error loading the catalog: {message}");
        }
        SearchOutcome::NoMatches { .. } => writeln!(out, "[]")?,
        SearchOutcome::Matches { records, .. } => {
            let json = serde_json::to_string_pretty(records)?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beautyboostr_core::catalog::parse_catalog;
    use beautyboostr_core::{BrowseView, SchemaVariant};
    use serde_json::Value;

    fn render(view: &BrowseView, term: &str) -> String {
        let mut out = Vec::new();
        print_outcome(&mut out, &view.search(term)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_matches_are_written_as_stored() {
        let catalog = parse_catalog(
            r#"[
                {"INCI": "Aqua", "Name_UA": "Вода"},
                {"INCI": "Glycerin", "Functions": [{"Target": "Skin", "IF_pH": 5.5}]}
            ]"#,
            SchemaVariant::Inci,
        )
        .unwrap();
        let view = BrowseView::from_catalog(catalog);

        let text = render(&view, "");
        let value: Value = serde_json::from_str(&text).unwrap();
        let expected: Value = serde_json::from_str(
            r#"[
                {"INCI": "Aqua", "Name_UA": "Вода"},
                {"INCI": "Glycerin", "Functions": [{"Target": "Skin", "IF_pH": "5.5"}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(value, expected);
        assert!(text.contains("Вода"));
    }

    #[test]
    fn test_no_matches_is_empty_array() {
        let catalog = parse_catalog(r#"[{"INCI": "Aqua"}]"#, SchemaVariant::Inci).unwrap();
        let view = BrowseView::from_catalog(catalog);
        assert_eq!(render(&view, "retinol"), "[]\n");
    }

    #[test]
    fn test_unavailable_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let view = BrowseView::open(&dir.path().join("missing.json"), SchemaVariant::Inci);
        assert_eq!(render(&view, ""), "");
    }
}
