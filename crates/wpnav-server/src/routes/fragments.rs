//! Server-rendered HTML fragments for sites that embed the header directly.

use axum::extract::{Query, State};
use axum::response::Html;
use wpnav_core::drawer::DrawerController;
use wpnav_core::html;
use wpnav_core::model::MegaMenuData;
use wpnav_core::panel::{InteractionMode, Panel, PanelPhase};
use wpnav_core::scroll_lock::ScrollLock;

use crate::state::AppState;

#[derive(Debug, Default, serde::Deserialize)]
pub struct HeaderParams {
    /// Id of a mega menu to render open.
    pub open: Option<String>,
    pub category: Option<usize>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct DrawerParams {
    #[serde(default)]
    pub open: bool,
    /// Comma-separated ids of expanded accordion items.
    pub expanded: Option<String>,
    /// Id of the mega menu shown in the overlay layer.
    pub mega: Option<String>,
    pub category: Option<usize>,
}

/// GET /fragments/header.html
pub async fn header_fragment(
    State(app): State<AppState>,
    Query(params): Query<HeaderParams>,
) -> Html<String> {
    let data = app.client.load_header().await;
    let view = data.compose(&app.config);

    let open = params.open.as_deref().and_then(|id| view.find_mega(id));
    let phase = open.map(|mega| {
        let mut panel = Panel::new(InteractionMode::Tap, mega.categories.len());
        panel.open();
        if let Some(i) = params.category {
            panel.select_category(i);
        }
        panel.phase()
    });
    let panels = |mega: &MegaMenuData| match (open, phase) {
        (Some(o), Some(p)) if o.id == mega.id => p,
        _ => PanelPhase::Closed,
    };

    Html(html::render_header(&view, &panels, &app.urls))
}

/// GET /fragments/drawer.html
pub async fn drawer_fragment(
    State(app): State<AppState>,
    Query(params): Query<DrawerParams>,
) -> Html<String> {
    let data = app.client.load_header().await;
    let view = data.compose(&app.config);

    // Server renders have no document to lock.
    let (scroll, _) = ScrollLock::detached();
    let mut drawer = DrawerController::new(scroll);
    if params.open {
        drawer.open_drawer();
        let expanded = params.expanded.as_deref().unwrap_or("");
        for id in expanded.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !drawer.is_item_open(id) {
                drawer.toggle_item(id);
            }
        }
        // Only mega menus the drawer actually links to can be opened.
        if let Some(mega) = params.mega.as_deref().and_then(|id| view.find_mobile_mega(id)) {
            drawer.activate_mega(mega);
            if let Some(i) = params.category {
                drawer.select_mega_category(i);
            }
        }
    }

    Html(html::render_drawer(
        &drawer.state(),
        &view.mobile,
        view.mega_menus,
        &app.urls,
    ))
}
