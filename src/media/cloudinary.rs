// src/media/cloudinary.rs

use crate::config::{CategoryConfig, GalleryConfig};
use crate::fetch::fetch_json;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

const LIST_ENDPOINT: &str = "/.netlify/functions/cloudinary-list";

/// Raster formats worth showing in the gallery; everything else the
/// account holds (PDFs, raw uploads) is skipped.
pub const IMAGE_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// One uploaded image, as returned by the proxy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub public_id: String,
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Deserialize)]
struct PhotoListing {
    #[serde(default)]
    resources: Vec<Photo>,
}

impl Photo {
    pub fn is_image(&self) -> bool {
        IMAGE_FORMATS.contains(&self.format.to_lowercase().as_str())
    }
}

/// Delivery URL for a stored image, center-cropped to `width`×`height`.
/// `None` when the account or image id is missing.
pub fn image_url(cloud_name: &str, public_id: &str, width: u32, height: u32) -> Option<String> {
    if cloud_name.is_empty() || public_id.is_empty() {
        return None;
    }
    Some(format!(
        "https://res.cloudinary.com/{}/image/upload/w_{},h_{},c_fill/{}",
        cloud_name, width, height, public_id
    ))
}

/// Folder paths to probe for a category, most specific first: the
/// category subfolder, then the root folder, then the whole account.
fn folder_candidates(gallery: &GalleryConfig, category: &CategoryConfig) -> Vec<String> {
    let base = gallery.cloudinary_folder.as_str();
    let full = match (base.is_empty(), category.folder.is_empty()) {
        (true, _) => category.folder.clone(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, category.folder),
    };

    let mut candidates = vec![full];
    if !base.is_empty() {
        candidates.push(base.to_string());
    }
    candidates.push(String::new());
    candidates.dedup();
    candidates
}

/// List a category's photos through the proxy endpoint, walking the
/// folder candidates until one returns images. A failing probe is logged
/// and skipped; no images anywhere is an empty listing, not an error.
pub async fn fetch_photos(
    client: &Client,
    gallery: &GalleryConfig,
    category: &CategoryConfig,
) -> Result<Vec<Photo>> {
    let base = Url::parse(&gallery.proxy_base_url)
        .and_then(|base| base.join(LIST_ENDPOINT))
        .context("photo listing endpoint URL")?;

    for folder in folder_candidates(gallery, category) {
        let mut url = base.clone();
        if !folder.is_empty() {
            url.query_pairs_mut().append_pair("folder", &folder);
        }

        let listing: PhotoListing = match fetch_json(client, &url).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(folder = %folder, error = %e, "photo listing probe failed");
                continue;
            }
        };

        let photos: Vec<Photo> = listing.resources.into_iter().filter(Photo::is_image).collect();
        if !photos.is_empty() {
            debug!(category = %category.slug, folder = %folder, photos = photos.len(), "listed photos");
            return Ok(photos);
        }
    }

    Ok(Vec::new())
}
