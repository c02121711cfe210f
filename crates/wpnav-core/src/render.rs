//! Turns a menu tree plus a title index into a render tree.
//!
//! Every item becomes exactly one of three node kinds: a mega menu trigger
//! (when the index knows its title and matching is not suppressed), a link
//! with a nested submenu (when it has children), or a plain link.

use crate::index::{title_key, TitleIndex};
use crate::links::UrlNormalizer;
use crate::model::{LinkTarget, MegaMenuData, MenuItem};
use serde::Serialize;

/// A resolved link, URL already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub href: String,
    pub target: LinkTarget,
    pub classes: String,
}

impl Link {
    fn from_item(item: &MenuItem, urls: &UrlNormalizer) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            href: urls.normalize(&item.url),
            target: item.target,
            classes: item.classes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavNode<'a> {
    /// The item's own children are not rendered; the mega panel replaces them.
    MegaTrigger {
        link: Link,
        mega: &'a MegaMenuData,
    },
    Submenu {
        link: Link,
        children: Vec<NavNode<'a>>,
    },
    Link {
        link: Link,
    },
}

impl<'a> NavNode<'a> {
    pub fn link(&self) -> &Link {
        match self {
            NavNode::MegaTrigger { link, .. }
            | NavNode::Submenu { link, .. }
            | NavNode::Link { link } => link,
        }
    }

    pub fn children(&self) -> &[NavNode<'a>] {
        match self {
            NavNode::Submenu { children, .. } => children,
            _ => &[],
        }
    }

    pub fn mega(&self) -> Option<&'a MegaMenuData> {
        match self {
            NavNode::MegaTrigger { mega, .. } => Some(*mega),
            _ => None,
        }
    }

    pub fn is_mega_trigger(&self) -> bool {
        matches!(self, NavNode::MegaTrigger { .. })
    }
}

/// Renderer configuration for one call site.
#[derive(Debug, Clone, Copy)]
pub struct MenuRenderer<'i, 'a> {
    index: &'i TitleIndex<'a>,
    urls: &'i UrlNormalizer,
    suppress_mega_menu: bool,
}

impl<'i, 'a> MenuRenderer<'i, 'a> {
    pub fn new(index: &'i TitleIndex<'a>, urls: &'i UrlNormalizer) -> Self {
        Self {
            index,
            urls,
            suppress_mega_menu: false,
        }
    }

    /// Never pick the mega menu path, even for titles the index knows.
    pub fn suppress_mega_menu(mut self, suppress: bool) -> Self {
        self.suppress_mega_menu = suppress;
        self
    }

    pub fn render(&self, items: &[MenuItem]) -> Vec<NavNode<'a>> {
        items.iter().map(|item| self.render_item(item)).collect()
    }

    fn render_item(&self, item: &MenuItem) -> NavNode<'a> {
        let link = Link::from_item(item, self.urls);

        if !self.suppress_mega_menu {
            if let Some(mega) = self.index.get_key(&title_key(&item.title)) {
                tracing::trace!(item = %item.title, mega = %mega.id, "mega menu trigger");
                return NavNode::MegaTrigger { link, mega };
            }
        }

        if item.has_children() {
            NavNode::Submenu {
                link,
                children: self.render(&item.children),
            }
        } else {
            NavNode::Link { link }
        }
    }
}

/// Render `items` against `index` in one call.
pub fn render_items<'a>(
    items: &[MenuItem],
    index: &TitleIndex<'a>,
    urls: &UrlNormalizer,
    suppress_mega_menu: bool,
) -> Vec<NavNode<'a>> {
    MenuRenderer::new(index, urls)
        .suppress_mega_menu(suppress_mega_menu)
        .render(items)
}

/// Pre-order walk over a render tree.
pub fn flatten<'n, 'a>(nodes: &'n [NavNode<'a>]) -> Vec<&'n NavNode<'a>> {
    let mut out = Vec::new();
    let mut stack: Vec<&NavNode<'a>> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().iter().rev());
    }
    out
}
