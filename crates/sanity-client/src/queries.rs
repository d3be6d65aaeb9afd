//! GROQ queries issued by [`crate::SanityClient`].
//!
//! Every list query orders by `priority asc, _id asc` so equal priorities
//! come back in a stable order and page slices never overlap.

const CARD_FIELDS: &str = r#"_id, "slug": slug.current, title, summary, priority, techStack, industry, thumbnail, dashboardUrl, _updatedAt"#;

const DETAIL_FIELDS: &str = r#"gallery, overview, problem, approach, solution, result, links[]{label, url}, "document": document.asset->{url, originalFilename}"#;

fn base_filter(doc_type: &str) -> String {
    format!(r#"*[_type == "{doc_type}" && defined(slug.current)]"#)
}

/// Every record, card fields only.
pub fn all(doc_type: &str) -> String {
    format!(
        "{} | order(priority asc, _id asc) {{ {CARD_FIELDS} }}",
        base_filter(doc_type)
    )
}

/// Records `[offset, offset + limit]`: one more than asked for, so the caller
/// can tell whether another page exists.
pub fn page(doc_type: &str, offset: usize, limit: usize) -> String {
    let end = offset.saturating_add(limit).saturating_add(1);
    format!(
        "{} | order(priority asc, _id asc) [{offset}...{end}] {{ {CARD_FIELDS} }}",
        base_filter(doc_type)
    )
}

/// One record by `$slug`, with full section content.
pub fn by_slug(doc_type: &str) -> String {
    format!(
        r#"*[_type == "{doc_type}" && slug.current == $slug][0] {{ {CARD_FIELDS}, {DETAIL_FIELDS} }}"#
    )
}

/// Distinct tag values per facet.
pub fn facets(doc_type: &str) -> String {
    let filter = base_filter(doc_type);
    format!(
        r#"{{ "techStack": array::unique({filter}.techStack[]), "industry": array::unique({filter}.industry[]) }}"#
    )
}
