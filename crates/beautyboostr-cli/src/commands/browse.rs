use beautyboostr_core::error::CatalogError;
use beautyboostr_core::{BrowseView, SchemaVariant};
use std::io;
use std::path::Path;

use crate::output;

pub fn run(
    catalog: &Path,
    schema: SchemaVariant,
    search: &str,
    output_format: &str,
) -> Result<(), CatalogError> {
    let view = BrowseView::open(catalog, schema);
    let outcome = view.search(search);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output_format {
        "json" => output::json::print_outcome(&mut out, &outcome)?,
        _ => output::table::print_outcome(&mut out, &outcome, schema)?,
    }

    Ok(())
}
