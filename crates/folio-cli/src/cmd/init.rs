use anyhow::Context;
use folio_core::blocks::ContentBlock;
use folio_core::config::Config;
use folio_core::types::{CaseStudy, ExternalLink};
use folio_core::{io, local, paths};
use std::path::Path;

pub const SAMPLE_SLUG: &str = "sample-project";

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let site_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "My portfolio".to_string())
    });

    println!("Initializing folio in: {}", root.display());
    io::ensure_dir(root).with_context(|| format!("failed to create {}", root.display()))?;

    // 1. folio.yaml
    let config = if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to read existing folio.yaml")?
    } else {
        let config = Config::new(site_name);
        config.save(root).context("failed to write folio.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        config
    };

    // 2. Content directory with one sample record
    let dir = config.content_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let sample_path = paths::case_study_file(&dir, SAMPLE_SLUG);
    let display = sample_path
        .strip_prefix(root)
        .unwrap_or(&sample_path)
        .display()
        .to_string();
    if local::write_case_study(&dir, &sample_record())? {
        println!("  created: {display}");
    } else {
        println!("  exists:  {display}");
    }

    println!("\nNext: edit the sample, then run `folio serve`.");
    Ok(())
}

fn sample_record() -> CaseStudy {
    let mut record = CaseStudy::new(SAMPLE_SLUG, "Sample project")
        .with_priority(1.0)
        .with_tech(["Rust"])
        .with_industry(["Software"]);
    record.summary = "A one-paragraph summary shown on cards and in link previews.".to_string();
    record.sections.overview = vec![ContentBlock::paragraph(
        "Describe the client, the context and what you were asked to do.",
    )];
    record.sections.problem = vec![ContentBlock::paragraph(
        "What was broken, slow or missing before the project started?",
    )];
    record.sections.result = vec![ContentBlock::paragraph(
        "What changed afterwards? Numbers help.",
    )];
    record.links = vec![ExternalLink {
        label: "Live site".to_string(),
        url: "https://example.com".to_string(),
    }];
    record
}
