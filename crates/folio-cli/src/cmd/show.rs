use crate::output::{print_json, tags};
use folio_core::paths::validate_slug;
use std::path::Path;

pub fn run(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    validate_slug(slug)?;
    let (_, source) = super::open(root)?;
    let rt = super::runtime()?;
    let Some(record) = rt.block_on(source.fetch_by_slug(slug))? else {
        anyhow::bail!("case study '{slug}' not found");
    };

    if json {
        return print_json(&record);
    }

    println!("{}", record.title);
    println!("slug:       {}", record.slug);
    println!("priority:   {}", record.priority);
    println!("technology: {}", tags(&record.tech_stack));
    println!("industry:   {}", tags(&record.industry));
    let description = record.description();
    if !description.is_empty() {
        println!("\n{description}");
    }
    let sections: Vec<&str> = record.sections.present().map(|(kind, _)| kind.title()).collect();
    if !sections.is_empty() {
        println!("\nsections: {}", sections.join(", "));
    }
    for link in &record.links {
        println!("link: {} <{}>", link.label, link.url);
    }
    if let Some(doc) = &record.document {
        println!("document: {}", doc.url);
    }
    Ok(())
}
