use crate::output::{print_json, print_table, tags};
use folio_core::filter::{self, Facet, FilterState};
use folio_core::loader::PaginatedLoader;
use std::path::Path;

pub fn run(root: &Path, tech: &[String], industry: &[String], json: bool) -> anyhow::Result<()> {
    let (config, source) = super::open(root)?;
    let filters = build_filters(tech, industry);

    let rt = super::runtime()?;
    let records = rt.block_on(async {
        let loader = PaginatedLoader::new(source, config.page_size())?;
        while loader.load_more().await {}
        anyhow::Ok(loader.records().await)
    })?;
    let shown = filter::apply(&records, &filters);

    if json {
        return print_json(&*shown);
    }
    if shown.is_empty() {
        if filters.is_empty() {
            println!("No case studies yet.");
        } else {
            println!("No case studies match these filters.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|r| {
            vec![
                r.slug.clone(),
                r.title.clone(),
                tags(&r.tech_stack),
                tags(&r.industry),
            ]
        })
        .collect();
    print_table(&["SLUG", "TITLE", "TECHNOLOGY", "INDUSTRY"], &rows);
    Ok(())
}

fn build_filters(tech: &[String], industry: &[String]) -> FilterState {
    let mut filters = FilterState::new();
    for raw in tech {
        filters.insert(Facet::TechStack, raw);
    }
    for raw in industry {
        filters.insert(Facet::Industry, raw);
    }
    filters
}
