//! Projects page: loading counter followed by the navigation panel

use log::info;
use serde::Serialize;

use super::catalog::Catalog;
use super::loading::{LoadingGate, LoadingView};
use super::navigation::{NavigationPanel, PanelView};

/// Snapshot returned to the webview on every poll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub loading: LoadingView,
    /// Absent while the loading counter runs
    pub panel: Option<PanelView>,
}

pub struct ProjectsPage {
    panel: NavigationPanel,
    loading: LoadingGate,
}

impl ProjectsPage {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            panel: NavigationPanel::with_default_layout(catalog),
            loading: LoadingGate::default(),
        }
    }

    /// Fresh visit: restart the counter and clear any previous selection.
    pub fn enter(&mut self) {
        self.loading.restart();
        self.panel.clear_category();
        info!("[Projects] Page entered");
    }

    pub fn advance(&mut self, dt: f32) {
        self.loading.advance(dt);
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn panel(&self) -> &NavigationPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut NavigationPanel {
        &mut self.panel
    }

    pub fn view(&self) -> PageView {
        PageView {
            loading: LoadingView::from(&self.loading),
            panel: (!self.loading.is_loading()).then(|| self.panel.view()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::catalog::Category;

    #[test]
    fn panel_hidden_until_loaded() {
        let mut page = ProjectsPage::new(Catalog::bundled().expect("bundled catalog"));
        assert!(page.view().panel.is_none());
        page.advance(0.5);
        assert_eq!(page.view().loading.percent, 50);
        page.advance(0.5);
        assert!(page.view().panel.is_some());
    }

    #[test]
    fn entering_clears_selection() {
        let mut page = ProjectsPage::new(Catalog::bundled().expect("bundled catalog"));
        page.panel_mut().select_category(Category::Web);
        page.enter();
        assert_eq!(page.panel().selection().category, None);
        assert!(page.is_loading());
    }
}
