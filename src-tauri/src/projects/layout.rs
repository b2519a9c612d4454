//! Row geometry for the projects panel.
//!
//! The panel asks a [`RowLayout`] for row bounds after every change to the
//! rendered rows; the webview may override them with measured DOM bounds.

use serde::{Deserialize, Serialize};

use super::catalog::ProjectRecord;
use crate::config::projects as cfg;

/// Axis-aligned rectangle in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Produces row bounds for the rows currently rendered
pub trait RowLayout {
    fn category_rows(&self, count: usize) -> Vec<Rect>;
    fn item_rows(&self, items: &[ProjectRecord]) -> Vec<Rect>;
}

/// Fixed-height vertical stacks, matching the page stylesheet
#[derive(Debug, Clone, Copy)]
pub struct StackLayout {
    pub origin: [f32; 2],
    pub padding: f32,
    pub category_width: f32,
    pub category_height: f32,
    pub item_offset: f32,
    pub item_width: f32,
    pub item_height: f32,
    pub gap: f32,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            origin: cfg::PANEL_ORIGIN,
            padding: cfg::PANEL_PADDING,
            category_width: cfg::CATEGORY_ROW_WIDTH,
            category_height: cfg::CATEGORY_ROW_HEIGHT,
            item_offset: cfg::ITEM_COLUMN_OFFSET,
            item_width: cfg::ITEM_ROW_WIDTH,
            item_height: cfg::ITEM_ROW_HEIGHT,
            gap: cfg::ROW_GAP,
        }
    }
}

impl StackLayout {
    fn stack(&self, x: f32, width: f32, height: f32, count: usize) -> Vec<Rect> {
        let top = self.origin[1] + self.padding;
        (0..count)
            .map(|i| Rect::new(x, top + i as f32 * (height + self.gap), width, height))
            .collect()
    }
}

impl RowLayout for StackLayout {
    fn category_rows(&self, count: usize) -> Vec<Rect> {
        let x = self.origin[0] + self.padding;
        self.stack(x, self.category_width, self.category_height, count)
    }

    fn item_rows(&self, items: &[ProjectRecord]) -> Vec<Rect> {
        let x = self.origin[0] + self.item_offset + self.padding;
        self.stack(x, self.item_width, self.item_height, items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_stack_without_overlap() {
        let layout = StackLayout::default();
        let rows = layout.category_rows(3);
        assert_eq!(rows.len(), 3);
        for pair in rows.windows(2) {
            assert!(pair[0].bottom() <= pair[1].y);
            assert_eq!(pair[0].x, pair[1].x);
        }
    }

    #[test]
    fn item_column_sits_right_of_categories() {
        let layout = StackLayout::default();
        let category = layout.category_rows(1)[0];
        let record = ProjectRecord {
            title: "t".into(),
            subtitle: "s".into(),
            role: "r".into(),
            date: "d".into(),
            description: "x".into(),
        };
        let item = layout.item_rows(&[record])[0];
        assert!(item.x >= category.x + category.width);
    }
}
