//! Two-level category/item selector with sliding highlights.
//!
//! `idle -> category-selected -> item-selected`. Selecting a category always
//! clears the item. Highlights are derived: after every selection change the
//! rows are laid out for the new state first, then the highlights are read
//! from the selected rows' bounds.

use log::debug;
use serde::Serialize;

use super::catalog::{Catalog, Category, ProjectRecord};
use super::layout::{Rect, RowLayout, StackLayout};
use crate::error::NavigationError;

/// Active category and item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    pub category: Option<Category>,
    pub item: Option<usize>,
}

/// Panel state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    CategorySelected(Category),
    ItemSelected(Category, usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub key: Category,
    pub label: String,
    pub active: bool,
    pub bounds: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub title: String,
    pub subtitle: String,
    pub active: bool,
    pub bounds: Option<Rect>,
}

/// Everything the page needs to render the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub selection: Selection,
    pub breadcrumb: Vec<String>,
    pub categories: Vec<CategoryRow>,
    pub items: Vec<ItemRow>,
    pub detail: Option<ProjectRecord>,
    pub category_highlight: Option<Rect>,
    pub item_highlight: Option<Rect>,
}

pub struct NavigationPanel<L = StackLayout> {
    catalog: Catalog,
    layout: L,
    selection: Selection,
    category_bounds: Vec<Rect>,
    item_bounds: Vec<Rect>,
    category_highlight: Option<Rect>,
    item_highlight: Option<Rect>,
}

impl NavigationPanel<StackLayout> {
    pub fn with_default_layout(catalog: Catalog) -> Self {
        Self::new(catalog, StackLayout::default())
    }
}

impl<L: RowLayout> NavigationPanel<L> {
    pub fn new(catalog: Catalog, layout: L) -> Self {
        let category_bounds = layout.category_rows(catalog.entries().len());
        Self {
            catalog,
            layout,
            selection: Selection::default(),
            category_bounds,
            item_bounds: Vec::new(),
            category_highlight: None,
            item_highlight: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn state(&self) -> PanelState {
        match self.selection {
            Selection {
                category: Some(c),
                item: Some(i),
            } => PanelState::ItemSelected(c, i),
            Selection {
                category: Some(c),
                item: None,
            } => PanelState::CategorySelected(c),
            _ => PanelState::Idle,
        }
    }

    pub fn category_bounds(&self) -> &[Rect] {
        &self.category_bounds
    }

    pub fn item_bounds(&self) -> &[Rect] {
        &self.item_bounds
    }

    pub fn category_highlight(&self) -> Option<Rect> {
        self.category_highlight
    }

    pub fn item_highlight(&self) -> Option<Rect> {
        self.item_highlight
    }

    /// Selects a category and clears the item selection.
    pub fn select_category(&mut self, category: Category) {
        self.selection = Selection {
            category: Some(category),
            item: None,
        };
        debug!("[Projects] Category {category}");
        self.relayout();
    }

    pub fn select_category_named(&mut self, name: &str) -> Result<(), NavigationError> {
        let category = name.parse()?;
        self.select_category(category);
        Ok(())
    }

    pub fn select_item(&mut self, index: usize) -> Result<(), NavigationError> {
        let category = self
            .selection
            .category
            .ok_or(NavigationError::NoCategorySelected)?;
        let len = self.catalog.items(category).len();
        if index >= len {
            return Err(NavigationError::ItemOutOfRange { index, len });
        }
        self.selection.item = Some(index);
        debug!("[Projects] Item {index} of {category}");
        self.refresh_highlights();
        Ok(())
    }

    pub fn clear_item(&mut self) {
        self.selection.item = None;
        self.refresh_highlights();
    }

    pub fn clear_category(&mut self) {
        self.selection = Selection::default();
        self.relayout();
    }

    /// Replaces computed bounds with bounds measured by the page.
    ///
    /// Item bounds are only taken when they were measured for the category
    /// that is still selected.
    pub fn report_bounds(
        &mut self,
        measured_for: Option<Category>,
        categories: Vec<Rect>,
        items: Vec<Rect>,
    ) {
        if !categories.is_empty() {
            self.category_bounds = categories;
        }
        if measured_for.is_some() && measured_for == self.selection.category {
            self.item_bounds = items;
        }
        self.refresh_highlights();
    }

    pub fn selected_record(&self) -> Option<&ProjectRecord> {
        let category = self.selection.category?;
        self.catalog.items(category).get(self.selection.item?)
    }

    /// `PROJECTS > WEB > <title>` segments for the current selection.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut crumbs = vec!["PROJECTS".to_string()];
        if let Some(category) = self.selection.category {
            crumbs.push(category.as_str().to_uppercase());
            if let Some(record) = self.selected_record() {
                crumbs.push(record.title.clone());
            }
        }
        crumbs
    }

    pub fn view(&self) -> PanelView {
        let categories = self
            .catalog
            .entries()
            .iter()
            .enumerate()
            .map(|(row, entry)| CategoryRow {
                key: entry.category,
                label: entry.label.clone(),
                active: self.selection.category == Some(entry.category),
                bounds: self.category_bounds.get(row).copied(),
            })
            .collect();

        let items = self
            .selection
            .category
            .map(|category| {
                self.catalog
                    .items(category)
                    .iter()
                    .enumerate()
                    .map(|(row, record)| ItemRow {
                        title: record.title.clone(),
                        subtitle: record.subtitle.clone(),
                        active: self.selection.item == Some(row),
                        bounds: self.item_bounds.get(row).copied(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        PanelView {
            selection: self.selection,
            breadcrumb: self.breadcrumb(),
            categories,
            items,
            detail: self.selected_record().cloned(),
            category_highlight: self.category_highlight,
            item_highlight: self.item_highlight,
        }
    }

    /// Lays out the rows the new selection renders, then re-derives highlights.
    fn relayout(&mut self) {
        self.item_bounds = match self.selection.category {
            Some(category) => self.layout.item_rows(self.catalog.items(category)),
            None => Vec::new(),
        };
        self.refresh_highlights();
    }

    fn refresh_highlights(&mut self) {
        self.category_highlight = self
            .selection
            .category
            .and_then(|c| self.catalog.position(c))
            .and_then(|row| self.category_bounds.get(row).copied());
        self.item_highlight = self
            .selection
            .item
            .and_then(|row| self.item_bounds.get(row).copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> NavigationPanel {
        let catalog = Catalog::bundled().expect("bundled catalog must parse");
        NavigationPanel::with_default_layout(catalog)
    }

    #[test]
    fn starts_idle() {
        let panel = panel();
        assert_eq!(panel.state(), PanelState::Idle);
        assert_eq!(panel.category_highlight(), None);
        assert_eq!(panel.item_highlight(), None);
        assert!(panel.view().items.is_empty());
    }

    #[test]
    fn category_change_resets_item() {
        let mut panel = panel();
        panel.select_category(Category::Web);
        panel.select_item(2).expect("web has three or more items");
        assert_eq!(panel.state(), PanelState::ItemSelected(Category::Web, 2));

        panel.select_category(Category::Mobile);
        assert_eq!(
            panel.selection(),
            Selection {
                category: Some(Category::Mobile),
                item: None
            }
        );
        assert_eq!(panel.item_highlight(), None);
    }

    #[test]
    fn reselecting_same_category_clears_item() {
        let mut panel = panel();
        panel.select_category(Category::School);
        panel.select_item(0).expect("school has items");
        panel.select_category(Category::School);
        assert_eq!(panel.state(), PanelState::CategorySelected(Category::School));
    }

    #[test]
    fn item_requires_category() {
        let mut panel = panel();
        assert_eq!(panel.select_item(0), Err(NavigationError::NoCategorySelected));
    }

    #[test]
    fn item_index_is_bounds_checked() {
        let mut panel = panel();
        panel.select_category(Category::Mobile);
        assert_eq!(
            panel.select_item(1),
            Err(NavigationError::ItemOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(panel.selection().item, None);
    }

    #[test]
    fn unknown_category_name_is_rejected() {
        let mut panel = panel();
        assert!(panel.select_category_named("games").is_err());
        assert_eq!(panel.state(), PanelState::Idle);
    }

    #[test]
    fn highlights_follow_selected_rows() {
        let mut panel = panel();
        panel.select_category(Category::Mobile);
        assert_eq!(panel.category_highlight(), Some(panel.category_bounds()[2]));

        panel.select_item(0).expect("mobile has one item");
        assert_eq!(panel.item_highlight(), Some(panel.item_bounds()[0]));
    }

    #[test]
    fn measured_bounds_replace_layout() {
        let mut panel = panel();
        panel.select_category(Category::School);
        panel.select_item(1).expect("school has items");

        let categories = vec![
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Rect::new(0.0, 50.0, 100.0, 40.0),
            Rect::new(0.0, 100.0, 100.0, 40.0),
        ];
        let items = vec![
            Rect::new(200.0, 0.0, 300.0, 60.0),
            Rect::new(200.0, 75.0, 300.0, 64.0),
            Rect::new(200.0, 150.0, 300.0, 60.0),
        ];
        panel.report_bounds(Some(Category::School), categories.clone(), items.clone());

        assert_eq!(panel.category_highlight(), Some(categories[0]));
        assert_eq!(panel.item_highlight(), Some(items[1]));
    }

    #[test]
    fn stale_item_measurements_are_ignored() {
        let mut panel = panel();
        panel.select_category(Category::Web);
        let computed = panel.item_bounds().to_vec();
        panel.report_bounds(Some(Category::School), Vec::new(), vec![Rect::default()]);
        assert_eq!(panel.item_bounds(), computed.as_slice());
    }

    #[test]
    fn breadcrumb_and_detail() {
        let mut panel = panel();
        panel.select_category(Category::Web);
        panel.select_item(0).expect("web has items");
        let view = panel.view();
        assert_eq!(view.breadcrumb, vec!["PROJECTS", "WEB", "Curiocity"]);
        let detail = view.detail.expect("an item is selected");
        assert_eq!(detail.role, "Lead Fullstack Software Engineer");
        assert!(view.items[0].active);
        assert!(view.categories[1].active);
    }

    #[test]
    fn clearing_returns_to_previous_states() {
        let mut panel = panel();
        panel.select_category(Category::Web);
        panel.select_item(1).expect("web has items");
        panel.clear_item();
        assert_eq!(panel.state(), PanelState::CategorySelected(Category::Web));
        panel.clear_category();
        assert_eq!(panel.state(), PanelState::Idle);
        assert_eq!(panel.category_highlight(), None);
    }
}
