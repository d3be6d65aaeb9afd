use crate::output::print_json;
use folio_core::filter::Facet;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, source) = super::open(root)?;
    let rt = super::runtime()?;
    let available = rt.block_on(source.fetch_available_filters())?;

    if json {
        return print_json(&available);
    }
    for &facet in Facet::all() {
        let values = available.values(facet);
        let shown = if values.is_empty() {
            "-".to_string()
        } else {
            values.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        println!("{}: {shown}", facet.label());
    }
    Ok(())
}
