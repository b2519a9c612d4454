//! Project catalog: fixed categories, each with an ordered list of records.
//!
//! The catalog is read-only once loaded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, NavigationError};

/// Catalog bundled into the binary
const BUNDLED_CATALOG: &str = include_str!("../../data/projects.json");

/// Project categories shown in the left column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    School,
    Web,
    Mobile,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::School, Category::Web, Category::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::School => "school",
            Category::Web => "web",
            Category::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NavigationError::UnknownCategory(s.to_string()))
    }
}

/// A single project entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub subtitle: String,
    pub role: String,
    pub date: String,
    pub description: String,
}

/// One category with its display label and items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: Category,
    pub label: String,
    pub items: Vec<ProjectRecord>,
}

/// Ordered categories and their items
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CategoryEntry>,
}

impl Catalog {
    /// Parses and validates a catalog. Order in the document is display order.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CategoryEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<CategoryEntry>) -> Result<Self, CatalogError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.category == entry.category) {
                return Err(CatalogError::DuplicateCategory(entry.category.to_string()));
            }
        }
        if let Some(missing) = Category::ALL
            .into_iter()
            .find(|c| !entries.iter().any(|e| e.category == *c))
        {
            return Err(CatalogError::MissingCategory(missing.to_string()));
        }
        Ok(Self { entries })
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Display row of a category.
    pub fn position(&self, category: Category) -> Option<usize> {
        self.entries.iter().position(|e| e.category == category)
    }

    pub fn items(&self, category: Category) -> &[ProjectRecord] {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.items.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads_in_order() {
        let catalog = Catalog::bundled().expect("bundled catalog must parse");
        let order: Vec<_> = catalog.entries().iter().map(|e| e.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert_eq!(catalog.items(Category::School).len(), 3);
        assert_eq!(catalog.items(Category::Web)[0].title, "Curiocity");
        assert_eq!(catalog.items(Category::Mobile).len(), 1);
    }

    #[test]
    fn rejects_duplicate_category() {
        let json = r#"[
            {"category": "web", "label": "Web", "items": []},
            {"category": "web", "label": "Web again", "items": []}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateCategory(name)) if name == "web"
        ));
    }

    #[test]
    fn rejects_missing_category() {
        let json = r#"[
            {"category": "school", "label": "School", "items": []},
            {"category": "web", "label": "Web", "items": []}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::MissingCategory(name)) if name == "mobile"
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn category_names_parse() {
        assert_eq!("web".parse::<Category>(), Ok(Category::Web));
        assert_eq!("School".parse::<Category>(), Ok(Category::School));
        assert_eq!(
            "desktop".parse::<Category>(),
            Err(NavigationError::UnknownCategory("desktop".into()))
        );
    }
}
