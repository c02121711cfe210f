//! Mobile navigation drawer.
//!
//! A full-screen overlay listing the menu. Items with children expand in
//! place (accordion style, several may be open at once); items matching a
//! mega menu open a second overlay layer instead. The page is scroll-locked
//! for as long as the drawer is open.

use crate::model::{MegaMenuData, MenuItem};
use crate::panel::{InteractionMode, Panel};
use crate::scroll_lock::{ScrollLock, ScrollLockGuard};
use serde::Serialize;
use std::collections::BTreeSet;

/// Items the drawer lists: the secondary menu, or the primary one when the
/// site only configured a single location.
pub fn drawer_items<'m>(primary: &'m [MenuItem], secondary: &'m [MenuItem]) -> &'m [MenuItem] {
    if secondary.is_empty() {
        primary
    } else {
        secondary
    }
}

/// Serializable view of the drawer for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawerState {
    pub open: bool,
    pub active_mega_menu: Option<String>,
    pub active_mega_category: Option<usize>,
    pub open_items: Vec<String>,
}

#[derive(Debug)]
pub struct DrawerController {
    open: bool,
    active_mega: Option<String>,
    mega_panel: Panel,
    open_items: BTreeSet<String>,
    scroll: ScrollLock,
    scroll_guard: Option<ScrollLockGuard>,
}

impl DrawerController {
    pub fn new(scroll: ScrollLock) -> Self {
        Self {
            open: false,
            active_mega: None,
            mega_panel: Panel::new(InteractionMode::Tap, 0),
            open_items: BTreeSet::new(),
            scroll,
            scroll_guard: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Id of the mega menu shown in the overlay layer.
    pub fn active_mega_id(&self) -> Option<&str> {
        self.active_mega.as_deref()
    }

    pub fn active_mega_category(&self) -> Option<usize> {
        self.active_mega
            .as_ref()
            .and_then(|_| self.mega_panel.active_category())
    }

    pub fn is_item_open(&self, id: &str) -> bool {
        self.open_items.contains(id)
    }

    pub fn state(&self) -> DrawerState {
        DrawerState {
            open: self.open,
            active_mega_menu: self.active_mega.clone(),
            active_mega_category: self.active_mega_category(),
            open_items: self.open_items.iter().cloned().collect(),
        }
    }

    pub fn open_drawer(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.scroll_guard = Some(self.scroll.acquire());
        tracing::trace!("drawer opened");
    }

    /// Close the drawer and forget every bit of mega menu and accordion state.
    pub fn close_drawer(&mut self) {
        self.clear_mega();
        self.open_items.clear();
        self.open = false;
        self.scroll_guard = None;
    }

    pub fn toggle_drawer(&mut self) {
        if self.open {
            self.close_drawer();
        } else {
            self.open_drawer();
        }
    }

    /// Show `mega` in the overlay layer, starting on its first category.
    /// Ignored while the drawer is closed.
    pub fn activate_mega(&mut self, mega: &MegaMenuData) -> bool {
        if !self.open {
            return false;
        }
        self.active_mega = Some(mega.id.clone());
        self.mega_panel.reset(mega.categories.len());
        self.mega_panel.open();
        true
    }

    pub fn select_mega_category(&mut self, index: usize) -> bool {
        self.active_mega.is_some() && self.mega_panel.select_category(index)
    }

    /// The pointer or focus left the mega-eligible part of the drawer.
    pub fn leave_mega_region(&mut self) {
        self.clear_mega();
    }

    /// Flip one accordion item. Returns whether it is now expanded.
    pub fn toggle_item(&mut self, id: &str) -> bool {
        if self.open_items.remove(id) {
            false
        } else {
            self.open_items.insert(id.to_string());
            true
        }
    }

    /// A leaf link was followed: the whole drawer goes away.
    pub fn select_leaf(&mut self) {
        self.close_drawer();
    }

    fn clear_mega(&mut self) {
        self.active_mega = None;
        self.mega_panel.reset(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::mega;
    use crate::scroll_lock::DocumentScroll;
    use std::sync::Arc;

    fn drawer() -> (DrawerController, Arc<DocumentScroll>) {
        let (lock, doc) = ScrollLock::detached();
        (DrawerController::new(lock), doc)
    }

    #[test]
    fn falls_back_to_primary_items() {
        let primary = vec![MenuItem::new("1", "Home", "/")];
        let secondary = vec![MenuItem::new("9", "Blog", "/blog")];
        assert_eq!(drawer_items(&primary, &[])[0].id, "1");
        assert_eq!(drawer_items(&primary, &secondary)[0].id, "9");
    }

    #[test]
    fn opening_locks_scroll_and_closing_releases() {
        let (mut d, doc) = drawer();
        d.open_drawer();
        assert!(doc.is_locked());
        d.open_drawer();
        d.close_drawer();
        assert!(!doc.is_locked());
        assert_eq!(doc.toggles(), 2);
    }

    #[test]
    fn drop_releases_scroll_lock() {
        let (mut d, doc) = drawer();
        d.open_drawer();
        drop(d);
        assert!(!doc.is_locked());
    }

    #[test]
    fn two_drawers_share_one_lock() {
        let (lock, doc) = ScrollLock::detached();
        let mut a = DrawerController::new(lock.clone());
        let mut b = DrawerController::new(lock);
        a.open_drawer();
        b.open_drawer();
        a.close_drawer();
        assert!(doc.is_locked());
        drop(b);
        assert!(!doc.is_locked());
    }

    #[test]
    fn activating_mega_starts_on_first_category() {
        let (mut d, _doc) = drawer();
        let services = mega("m1", "Services");
        d.open_drawer();
        assert!(d.activate_mega(&services));
        assert_eq!(d.active_mega_id(), Some("m1"));
        assert_eq!(d.active_mega_category(), Some(0));
        assert!(d.select_mega_category(1));
        assert_eq!(d.active_mega_category(), Some(1));

        // Re-activating resets the category.
        d.activate_mega(&services);
        assert_eq!(d.active_mega_category(), Some(0));
    }

    #[test]
    fn activation_ignored_while_closed() {
        let (mut d, _doc) = drawer();
        assert!(!d.activate_mega(&mega("m1", "Services")));
        assert_eq!(d.active_mega_id(), None);
    }

    #[test]
    fn leaving_mega_region_clears_selection() {
        let (mut d, _doc) = drawer();
        d.open_drawer();
        d.activate_mega(&mega("m1", "Services"));
        d.leave_mega_region();
        assert_eq!(d.active_mega_id(), None);
        assert_eq!(d.active_mega_category(), None);
        assert!(!d.select_mega_category(0));
        assert!(d.is_open(), "drawer itself stays open");
    }

    #[test]
    fn accordion_items_toggle_independently() {
        let (mut d, _doc) = drawer();
        d.open_drawer();
        assert!(d.toggle_item("4"));
        assert!(d.toggle_item("6"));
        assert!(d.is_item_open("4") && d.is_item_open("6"));
        assert!(!d.toggle_item("4"));
        assert!(!d.is_item_open("4"));
        assert!(d.is_item_open("6"));
    }

    #[test]
    fn selecting_leaf_resets_everything() {
        let (mut d, doc) = drawer();
        d.open_drawer();
        d.toggle_item("4");
        d.activate_mega(&mega("m1", "Services"));
        d.select_leaf();
        assert_eq!(
            d.state(),
            DrawerState {
                open: false,
                active_mega_menu: None,
                active_mega_category: None,
                open_items: vec![],
            }
        );
        assert!(!doc.is_locked());
    }
}
