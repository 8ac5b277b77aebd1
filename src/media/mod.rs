// src/media/mod.rs

pub mod cloudinary;
pub mod gallery;
pub mod youtube;

pub use cloudinary::{image_url, Photo};
pub use gallery::{preload, CategoryState, GalleryStore, MediaKind};
pub use youtube::Video;
