// src/media/youtube.rs

use crate::config::{CategoryConfig, GalleryConfig};
use crate::fetch::fetch_json;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const VIDEOS_ENDPOINT: &str = "/.netlify/functions/youtube-videos";

/// One channel or playlist video, as returned by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct VideoListing {
    #[serde(default)]
    videos: Vec<Video>,
}

impl Video {
    /// Thumbnail served straight by YouTube; no proxy involved.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.id)
    }

    pub fn embed_url(&self) -> String {
        format!(
            "https://www.youtube.com/embed/{}?autoplay=1&rel=0&modestbranding=1",
            self.id
        )
    }
}

/// List a category's videos through the proxy endpoint. A configured
/// playlist id wins; otherwise the whole channel's uploads are listed.
pub async fn fetch_videos(
    client: &Client,
    gallery: &GalleryConfig,
    category: &CategoryConfig,
) -> Result<Vec<Video>> {
    let mut url = Url::parse(&gallery.proxy_base_url)
        .and_then(|base| base.join(VIDEOS_ENDPOINT))
        .context("videos endpoint URL")?;

    match category.playlist_id.as_deref() {
        Some(playlist) if !playlist.is_empty() => {
            url.query_pairs_mut().append_pair("playlistId", playlist);
        }
        _ => {
            url.query_pairs_mut()
                .append_pair("channelId", &gallery.youtube_channel_id);
        }
    }

    let listing: VideoListing = fetch_json(client, &url).await?;
    debug!(category = %category.slug, videos = listing.videos.len(), "listed videos");
    Ok(listing.videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_payload_decodes() {
        let raw = r#"{"videos":[{"id":"dQw4w9WgXcQ","title":"Live at The Vault"},{"id":"abc123defg"}]}"#;
        let listing: VideoListing = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.videos.len(), 2);
        assert_eq!(listing.videos[0].title, "Live at The Vault");
        assert_eq!(listing.videos[1].title, "");
    }

    #[test]
    fn empty_payload_decodes_to_no_videos() {
        let listing: VideoListing = serde_json::from_str("{}").unwrap();
        assert!(listing.videos.is_empty());
    }

    #[test]
    fn derived_urls() {
        let video = Video {
            id: "dQw4w9WgXcQ".to_string(),
            title: String::new(),
        };
        assert_eq!(
            video.thumbnail_url(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
        );
        assert!(video.embed_url().starts_with("https://www.youtube.com/embed/dQw4w9WgXcQ?"));
    }
}
