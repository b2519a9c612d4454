//! Projects page state
//!
//! Owned by Rust and rendered by the webview:
//! - `catalog`: bundled project records
//! - `layout`: row geometry
//! - `navigation`: category/item selection and highlights
//! - `loading`: entry counter
//! - `page`: everything above behind one handle

pub mod catalog;
pub mod layout;
pub mod loading;
pub mod navigation;
pub mod page;

pub use catalog::{Catalog, Category, ProjectRecord};
pub use layout::{Rect, RowLayout, StackLayout};
pub use navigation::{NavigationPanel, PanelState, PanelView, Selection};
pub use page::{PageView, ProjectsPage};
