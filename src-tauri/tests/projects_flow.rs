use desk_portfolio_lib::error::NavigationError;
use desk_portfolio_lib::projects::{
    Catalog, Category, NavigationPanel, PanelState, ProjectsPage, Rect,
};

fn panel() -> NavigationPanel {
    NavigationPanel::with_default_layout(Catalog::bundled().expect("bundled catalog"))
}

#[test]
fn browse_web_projects() {
    let mut panel = panel();
    assert_eq!(panel.state(), PanelState::Idle);
    assert_eq!(panel.category_highlight(), None);

    panel.select_category(Category::Web);
    assert_eq!(panel.state(), PanelState::CategorySelected(Category::Web));
    assert_eq!(panel.category_highlight(), Some(panel.category_bounds()[1]));
    assert_eq!(panel.item_bounds().len(), 6);
    assert_eq!(panel.item_highlight(), None);

    panel.select_item(1).expect("second web project");
    assert_eq!(panel.state(), PanelState::ItemSelected(Category::Web, 1));
    assert_eq!(panel.item_highlight(), Some(panel.item_bounds()[1]));

    let view = panel.view();
    assert_eq!(view.breadcrumb, vec!["PROJECTS", "WEB", "BlackPrint"]);
    assert_eq!(view.detail.map(|d| d.title), Some("BlackPrint".to_string()));
    assert!(view.items[1].active);
    assert!(view.categories[1].active);

    panel.select_category(Category::School);
    assert_eq!(panel.state(), PanelState::CategorySelected(Category::School));
    assert_eq!(panel.category_highlight(), Some(panel.category_bounds()[0]));
    assert_eq!(panel.item_highlight(), None);
}

#[test]
fn switching_category_drops_item() {
    let mut panel = panel();
    panel.select_category(Category::Web);
    panel.select_item(4).expect("fifth web project");

    panel.select_category(Category::Mobile);
    assert_eq!(panel.state(), PanelState::CategorySelected(Category::Mobile));
    assert_eq!(panel.item_highlight(), None);
    assert_eq!(panel.item_bounds().len(), 1);
    assert_eq!(panel.view().breadcrumb, vec!["PROJECTS", "MOBILE"]);
}

#[test]
fn invalid_selections_are_rejected() {
    let mut panel = panel();
    assert_eq!(panel.select_item(0), Err(NavigationError::NoCategorySelected));
    assert_eq!(
        panel.select_category_named("games"),
        Err(NavigationError::UnknownCategory("games".to_string()))
    );

    panel.select_category_named("School").expect("case-insensitive name");
    assert_eq!(
        panel.select_item(3),
        Err(NavigationError::ItemOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(panel.state(), PanelState::CategorySelected(Category::School));
}

#[test]
fn measured_bounds_move_the_highlights() {
    let mut panel = panel();
    panel.select_category(Category::School);
    panel.select_item(2).expect("third school project");

    let categories = vec![
        Rect::new(10.0, 100.0, 150.0, 40.0),
        Rect::new(10.0, 150.0, 150.0, 40.0),
        Rect::new(10.0, 200.0, 150.0, 40.0),
    ];
    let items = vec![
        Rect::new(250.0, 100.0, 300.0, 60.0),
        Rect::new(250.0, 170.0, 300.0, 60.0),
        Rect::new(250.0, 240.0, 300.0, 60.0),
    ];
    panel.report_bounds(Some(Category::School), categories.clone(), items.clone());

    assert_eq!(panel.category_highlight(), Some(categories[0]));
    assert_eq!(panel.item_highlight(), Some(items[2]));

    // Measured for a category that is no longer selected
    panel.select_category(Category::Web);
    let computed = panel.item_bounds().to_vec();
    panel.report_bounds(Some(Category::School), Vec::new(), items);
    assert_eq!(panel.item_bounds(), computed.as_slice());
    assert_eq!(panel.category_highlight(), Some(categories[1]));
}

#[test]
fn page_reveals_panel_after_loading_and_resets_on_entry() {
    let mut page = ProjectsPage::new(Catalog::bundled().expect("bundled catalog"));
    page.advance(0.25);
    let view = page.view();
    assert!(view.loading.loading);
    assert_eq!(view.loading.percent, 25);
    assert!(view.panel.is_none());

    page.advance(1.0);
    assert!(!page.is_loading());
    page.panel_mut().select_category(Category::Web);
    assert!(page.view().panel.is_some());

    page.enter();
    assert!(page.is_loading());
    assert_eq!(page.view().loading.percent, 0);
    assert_eq!(page.panel().state(), PanelState::Idle);
}
