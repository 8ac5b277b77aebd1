// src/media/gallery.rs

use crate::config::{CategoryConfig, GalleryConfig, SiteConfig};
use crate::media::cloudinary::{self, Photo};
use crate::media::youtube::{self, Video};
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

const MAX_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Photo,
}

/// Whether a category's tab can be offered to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryState {
    /// Configured off until content is ready.
    Disabled,
    /// Nothing cached for it.
    Empty,
    Ready,
}

/// In-memory cache of everything the gallery fetched, keyed per kind by
/// category slug. Rebuilt by [`preload`]; no persistence.
#[derive(Debug, Default)]
pub struct GalleryStore {
    videos: HashMap<String, Vec<Video>>,
    photos: HashMap<String, Vec<Photo>>,
}

impl GalleryStore {
    pub fn insert_videos(&mut self, slug: &str, items: Vec<Video>) {
        self.videos.insert(slug.to_string(), items);
    }

    pub fn insert_photos(&mut self, slug: &str, items: Vec<Photo>) {
        self.photos.insert(slug.to_string(), items);
    }

    pub fn videos(&self, slug: &str) -> &[Video] {
        self.videos.get(slug).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn photos(&self, slug: &str) -> &[Photo] {
        self.photos.get(slug).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn count(&self, kind: MediaKind, slug: &str) -> usize {
        match kind {
            MediaKind::Video => self.videos(slug).len(),
            MediaKind::Photo => self.photos(slug).len(),
        }
    }

    /// Disabled beats cached content: a category forced off stays off
    /// even when items were fetched for it.
    pub fn category_state(&self, gallery: &GalleryConfig, kind: MediaKind, slug: &str) -> CategoryState {
        if gallery.is_disabled(slug) {
            CategoryState::Disabled
        } else if self.count(kind, slug) == 0 {
            CategoryState::Empty
        } else {
            CategoryState::Ready
        }
    }

    /// First configured category that is ready for `kind`: the tab the
    /// gallery should land on.
    pub fn first_available<'a>(&self, gallery: &'a GalleryConfig, kind: MediaKind) -> Option<&'a str> {
        gallery
            .categories
            .iter()
            .map(|c| c.slug.as_str())
            .find(|slug| self.category_state(gallery, kind, slug) == CategoryState::Ready)
    }
}

enum Loaded {
    Videos(String, Vec<Video>),
    Photos(String, Vec<Photo>),
}

/// One fetch branch. Failures degrade to an empty listing with a
/// warning, so a dead proxy disables tabs instead of breaking the page.
async fn load_category(
    client: &Client,
    gallery: &GalleryConfig,
    category: &CategoryConfig,
    kind: MediaKind,
) -> Loaded {
    match kind {
        MediaKind::Video => {
            let items = youtube::fetch_videos(client, gallery, category)
                .await
                .unwrap_or_else(|e| {
                    warn!(category = %category.slug, error = %e, "video listing failed");
                    Vec::new()
                });
            Loaded::Videos(category.slug.clone(), items)
        }
        MediaKind::Photo => {
            let items = cloudinary::fetch_photos(client, gallery, category)
                .await
                .unwrap_or_else(|e| {
                    warn!(category = %category.slug, error = %e, "photo listing failed");
                    Vec::new()
                });
            Loaded::Photos(category.slug.clone(), items)
        }
    }
}

/// Fan out one fetch per category and kind, bounded, and fan the results
/// into a fresh store.
#[instrument(level = "info", skip(client, config))]
pub async fn preload(client: &Client, config: &SiteConfig) -> GalleryStore {
    let gallery = &config.gallery;
    let mut store = GalleryStore::default();
    let mut tasks = FuturesUnordered::new();

    for category in &gallery.categories {
        for kind in [MediaKind::Video, MediaKind::Photo] {
            tasks.push(load_category(client, gallery, category, kind));

            // throttle concurrency
            if tasks.len() >= MAX_CONCURRENCY {
                if let Some(loaded) = tasks.next().await {
                    apply(&mut store, loaded);
                }
            }
        }
    }

    // drain remaining tasks
    while let Some(loaded) = tasks.next().await {
        apply(&mut store, loaded);
    }

    info!(
        video_categories = store.videos.len(),
        photo_categories = store.photos.len(),
        "gallery preloaded"
    );
    store
}

fn apply(store: &mut GalleryStore, loaded: Loaded) {
    match loaded {
        Loaded::Videos(slug, items) => store.insert_videos(&slug, items),
        Loaded::Photos(slug, items) => store.insert_photos(&slug, items),
    }
}
