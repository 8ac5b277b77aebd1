// src/config.rs

use crate::shows::schedule::CutoffPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything the site's data layer needs, passed in at construction
/// time. Defaults carry the production values; a YAML file overrides
/// them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub sheet: SheetConfig,
    pub gallery: GalleryConfig,
    pub cutoff: CutoffPolicy,
}

impl SiteConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading site config {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing site config {}", path.display()))
    }
}

/// The published Google Sheet holding the show schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Published document id (the `2PACX-…` token in the pub URL).
    pub doc_id: String,
    /// Full CSV URL override; wins over `doc_id` when set.
    pub url: Option<String>,
}

impl SheetConfig {
    pub fn csv_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "https://docs.google.com/spreadsheets/d/e/{}/pub?output=csv",
                self.doc_id
            ),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            doc_id: "2PACX-1vSIwspp_P8-nqaWd2HM6u0Dkh7_XcO_Hrc6E4-QDqFDUABZQpUvQ1NdzJEkTFazripJxfTT7D3w6yuX"
                .to_string(),
            url: None,
        }
    }
}

/// One gallery category: a slug used in URLs and tab ids, the Cloudinary
/// subfolder it maps to, and an optional YouTube playlist override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub slug: String,
    pub folder: String,
    #[serde(default)]
    pub playlist_id: Option<String>,
}

impl CategoryConfig {
    pub fn new(slug: &str, folder: &str) -> Self {
        Self {
            slug: slug.to_string(),
            folder: folder.to_string(),
            playlist_id: None,
        }
    }
}

/// Media gallery sources: the proxy host serving the two JSON endpoints,
/// the Cloudinary account layout, and the YouTube channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Host serving the two proxy functions. Needed whenever the site
    /// itself runs on a different host.
    pub proxy_base_url: String,
    pub cloudinary_cloud_name: String,
    /// Root folder; empty means the account root.
    pub cloudinary_folder: String,
    /// Ordered: the first category is the landing tab.
    pub categories: Vec<CategoryConfig>,
    /// Slugs forced unavailable until content is ready.
    pub disabled_categories: Vec<String>,
    pub youtube_channel_id: String,
    pub youtube_channel_url: String,
}

impl GalleryConfig {
    pub fn category(&self, slug: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn is_disabled(&self, slug: &str) -> bool {
        self.disabled_categories.iter().any(|s| s == slug)
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: "https://funny-cendol-31d47d.netlify.app".to_string(),
            cloudinary_cloud_name: "dhvetz6qg".to_string(),
            cloudinary_folder: "FracturePoint_Photos".to_string(),
            categories: vec![
                CategoryConfig::new("live-shows", "Live Shows"),
                CategoryConfig::new("the-band", "The Band"),
                CategoryConfig::new("behind-the-scenes", "Behind the Scenes"),
            ],
            disabled_categories: vec!["the-band".to_string(), "behind-the-scenes".to_string()],
            youtube_channel_id: "UCam1SbBcBmBG7Siruznfdhw".to_string(),
            youtube_channel_url: "https://www.youtube.com/channel/UCam1SbBcBmBG7Siruznfdhw"
                .to_string(),
        }
    }
}
