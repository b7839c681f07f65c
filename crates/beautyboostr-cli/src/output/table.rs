use beautyboostr_core::search::{summarize, RecordSummary};
use beautyboostr_core::{SchemaVariant, SearchOutcome};
use std::io::{self, Write};

pub fn print_outcome<W: Write>(
    out: &mut W,
    outcome: &SearchOutcome<'_>,
    schema: SchemaVariant,
) -> io::Result<()> {
    match outcome {
        SearchOutcome::Unavailable { message } => {
            eprintln!("Error loading the catalog: {message}");
        }
        SearchOutcome::NoMatches { .. } => {
            writeln!(out, "No ingredients match your search.")?;
        }
        SearchOutcome::Matches { total, records } => {
            writeln!(out, "Showing {} of {} ingredients.\n", records.len(), total)?;
            for record in records {
                writeln!(out, "{}", format_summary(&summarize(record, schema)))?;
            }
        }
    }
    Ok(())
}

pub fn format_summary(summary: &RecordSummary) -> String {
    let mut out = String::new();
    out.push_str(&summary.heading());
    out.push('\n');
    out.push_str(&format!("  Origin:       {}\n", summary.origin));
    out.push_str(&format!("  Nature:       {}\n", summary.nature));
    out.push_str(&format!("  Restrictions: {}\n", summary.restrictions));
    if summary.rules.is_empty() {
        out.push_str("  Functions:    none\n");
    } else {
        out.push_str("  Functions:\n");
        for rule in &summary.rules {
            out.push_str(&format!("    - {rule}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use beautyboostr_core::catalog::parse_catalog;
    use beautyboostr_core::BrowseView;

    fn summary(rules: Vec<String>) -> RecordSummary {
        RecordSummary {
            name: "Aqua".into(),
            localized_name: "Вода".into(),
            origin: "Natural".into(),
            nature: "Inorganic".into(),
            restrictions: "not specified".into(),
            rules,
        }
    }

    fn render(term: &str) -> String {
        let catalog = parse_catalog(
            r#"[
                {"INCI": "Aqua", "Name_UA": "Вода"},
                {"INCI": "Glycerin", "Name_UA": "Гліцерин"},
                {"INCI": "Aloe Barbadensis Leaf Juice"}
            ]"#,
            SchemaVariant::Inci,
        )
        .unwrap();
        let view = BrowseView::from_catalog(catalog);
        let mut out = Vec::new();
        print_outcome(&mut out, &view.search(term), SchemaVariant::Inci).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_summary_line_counts_matches_and_total() {
        let text = render("a");
        assert!(text.starts_with("Showing 2 of 3 ingredients.\n\n"));
        assert!(text.contains("Aqua (Вода)\n"));
        assert!(text.contains("Aloe Barbadensis Leaf Juice (N/A)\n"));
        assert!(!text.contains("Glycerin"));
    }

    #[test]
    fn test_no_matches_message() {
        assert_eq!(render("retinol"), "No ingredients match your search.\n");
    }

    #[test]
    fn test_format_without_functions() {
        let text = format_summary(&summary(vec![]));
        assert!(text.starts_with("Aqua (Вода)\n"));
        assert!(text.contains("  Restrictions: not specified\n"));
        assert!(text.ends_with("  Functions:    none\n"));
    }

    #[test]
    fn test_format_lists_functions_in_order() {
        let text = format_summary(&summary(vec!["Solvent for Skin".into(), "Base for Gel".into()]));
        let first = text.find("    - Solvent for Skin").unwrap();
        let second = text.find("    - Base for Gel").unwrap();
        assert!(first < second);
    }
}
