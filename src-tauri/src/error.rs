//! Error types shared by the projects page and asset loading

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the bundled project catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON document could not be parsed
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same category appears twice
    #[error("Duplicate category in catalog: {0}")]
    DuplicateCategory(String),

    /// A category of the fixed set has no entry
    #[error("Catalog is missing category: {0}")]
    MissingCategory(String),
}

/// Rejected navigation panel operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// Category name outside the fixed set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// An item was selected before any category
    #[error("No category selected")]
    NoCategorySelected,

    /// Item index beyond the selected category's list
    #[error("Item {index} out of range ({len} items)")]
    ItemOutOfRange { index: usize, len: usize },
}

/// Failures while loading a visual asset
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read or decoded
    #[error("Failed to load texture {path:?}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
