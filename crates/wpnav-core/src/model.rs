use crate::payload;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// LinkTarget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    SameTab,
    #[serde(rename = "_blank")]
    Blank,
}

impl LinkTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkTarget::SameTab => "_self",
            LinkTarget::Blank => "_blank",
        }
    }

    pub fn is_external(self) -> bool {
        self == LinkTarget::Blank
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// WordPress sends "", null, "_self", "_blank" (and occasionally other frame
// names); anything but "_blank" opens in the same tab.
impl<'de> Deserialize<'de> for LinkTarget {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = payload::raw_text(d)?;
        Ok(if raw == "_blank" {
            LinkTarget::Blank
        } else {
            LinkTarget::SameTab
        })
    }
}

// ---------------------------------------------------------------------------
// MenuItem
// ---------------------------------------------------------------------------

/// A node of a WordPress navigation menu, with its subtree already attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, deserialize_with = "payload::id")]
    pub id: String,
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::raw_text")]
    pub url: String,
    #[serde(default)]
    pub target: LinkTarget,
    #[serde(default, deserialize_with = "payload::classes")]
    pub classes: String,
    #[serde(default, alias = "child_items", deserialize_with = "payload::list")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            target: LinkTarget::SameTab,
            classes: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Pre-order walk over a menu forest.
pub fn preorder(items: &[MenuItem]) -> Vec<&MenuItem> {
    let mut out = Vec::new();
    let mut stack: Vec<&MenuItem> = items.iter().rev().collect();
    while let Some(item) = stack.pop() {
        out.push(item);
        stack.extend(item.children.iter().rev());
    }
    out
}

// ---------------------------------------------------------------------------
// Mega menus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub alt: String,
}

/// Leaf link inside a mega menu item. Deeper nesting from the CMS is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaMenuLink {
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::raw_text")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaMenuItem {
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::raw_text")]
    pub url: String,
    #[serde(
        default,
        alias = "children",
        alias = "sub_menu",
        deserialize_with = "payload::list"
    )]
    pub sub_items: Vec<MegaMenuLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaMenuCategory {
    #[serde(default, deserialize_with = "payload::image")]
    pub icon: Option<Image>,
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::list")]
    pub items: Vec<MegaMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedContent {
    #[serde(default, deserialize_with = "payload::flag")]
    pub enable: bool,
    #[serde(default, deserialize_with = "payload::image")]
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::text")]
    pub description: String,
}

/// A rich navigation panel, matched to menu items by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaMenuData {
    #[serde(default, deserialize_with = "payload::id")]
    pub id: String,
    #[serde(default, deserialize_with = "payload::raw_text")]
    pub slug: String,
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::raw_text")]
    pub menu_type: String,
    #[serde(default, deserialize_with = "payload::text")]
    pub main_heading: String,
    #[serde(default, deserialize_with = "payload::list")]
    pub categories: Vec<MegaMenuCategory>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "payload::acf_object"
    )]
    pub featured_content: Option<FeaturedContent>,
}

impl MegaMenuData {
    /// The category a freshly opened panel shows: the first one, if any.
    pub fn default_category(&self) -> Option<usize> {
        if self.categories.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn category(&self, index: usize) -> Option<&MegaMenuCategory> {
        self.categories.get(index)
    }

    /// Featured panel, only when the editor switched it on.
    pub fn featured(&self) -> Option<&FeaturedContent> {
        self.featured_content.as_ref().filter(|f| f.enable)
    }
}

// ---------------------------------------------------------------------------
// SiteSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default, deserialize_with = "payload::text")]
    pub title: String,
    #[serde(default, deserialize_with = "payload::image")]
    pub logo: Option<Image>,
}
