//! URL handling module for webmirror
//!
//! This module provides the canonical URL representation used for
//! deduplication, resolution of hrefs against a base, and derivation of
//! file names and extensions from URL paths.

mod canonical;
mod filename;

pub use canonical::CanonicalUrl;
pub use filename::{extension_of, file_name_from_path, is_html_extension};
