//! Sanity image asset references.
//!
//! An asset reference looks like `image-<hash>-<width>x<height>-<format>`.
//! The pixel dimensions and the CDN URL are both derivable from it, so no
//! extra request is needed to size or load an image.

use folio_core::types::ImageRef;
use serde::Deserialize;

const CDN_HOST: &str = "https://cdn.sanity.io/images";

/// Parsed form of an image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef<'a> {
    pub hash: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: &'a str,
}

/// Split an `image-<hash>-<w>x<h>-<format>` reference. Returns `None` for
/// anything that is not an image reference.
pub fn parse_asset_ref(reference: &str) -> Option<AssetRef<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let (rest, format) = rest.rsplit_once('-')?;
    let (hash, dims) = rest.rsplit_once('-')?;
    let (w, h) = dims.split_once('x')?;
    if hash.is_empty() || format.is_empty() {
        return None;
    }
    Some(AssetRef {
        hash,
        width: w.parse().ok()?,
        height: h.parse().ok()?,
        format,
    })
}

/// Canonical CDN URL for an asset in `project`/`dataset`.
pub fn asset_url(project_id: &str, dataset: &str, asset: &AssetRef<'_>) -> String {
    format!(
        "{CDN_HOST}/{project_id}/{dataset}/{}-{}x{}.{}",
        asset.hash, asset.width, asset.height, asset.format
    )
}

/// Image field as it comes back from the query API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub asset: Option<RawAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAsset {
    #[serde(rename = "_ref")]
    pub reference: String,
}

impl RawImage {
    /// Resolve to an [`ImageRef`]. Images without an asset are dropped;
    /// references that do not parse keep the id but carry no URL or size.
    pub fn resolve(&self, project_id: &str, dataset: &str) -> Option<ImageRef> {
        let reference = &self.asset.as_ref()?.reference;
        let mut image = ImageRef::new(reference.clone());
        image.alt = self.alt.clone().filter(|a| !a.trim().is_empty());
        match parse_asset_ref(reference) {
            Some(asset) => {
                image.url = Some(asset_url(project_id, dataset, &asset));
                image.width = Some(asset.width);
                image.height = Some(asset.height);
            }
            None => {
                tracing::debug!(reference = %reference, "unrecognised image asset reference");
            }
        }
        Some(image)
    }
}
