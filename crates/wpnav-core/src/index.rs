use crate::model::MegaMenuData;
use std::collections::HashMap;

/// Key used to match menu item titles against mega menu titles.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// The second key a mega menu is reachable under: the singular form when
/// the key ends in `s`, otherwise the plural.
pub fn number_variant(key: &str) -> String {
    match key.strip_suffix('s') {
        Some(singular) => singular.to_string(),
        None => format!("{key}s"),
    }
}

/// Lookup from normalized menu titles to mega menus.
///
/// Each mega menu is registered under its own key and under the
/// singular/plural variant of it. When two mega menus produce the same key
/// the one registered later wins; there is no tie-breaking beyond order.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex<'a> {
    entries: HashMap<String, &'a MegaMenuData>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(mega_menus: &'a [MegaMenuData]) -> Self {
        let mut entries = HashMap::with_capacity(mega_menus.len() * 2);
        for mega in mega_menus {
            let key = title_key(&mega.title);
            if key.is_empty() {
                tracing::debug!(id = %mega.id, "skipping mega menu with empty title");
                continue;
            }
            let variant = number_variant(&key);
            for k in [key, variant] {
                if k.is_empty() {
                    continue;
                }
                if let Some(prev) = entries.insert(k, mega) {
                    if prev.id != mega.id {
                        tracing::debug!(kept = %mega.id, replaced = %prev.id, "mega menu key collision");
                    }
                }
            }
        }
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Find the mega menu for a menu item title.
    pub fn lookup(&self, title: &str) -> Option<&'a MegaMenuData> {
        self.get_key(&title_key(title))
    }

    /// Find by an already normalized key.
    pub fn get_key(&self, key: &str) -> Option<&'a MegaMenuData> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.lookup(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) fn mega(id: &str, title: &str) -> MegaMenuData {
    use crate::model::{MegaMenuCategory, MegaMenuItem};
    MegaMenuData {
        id: id.to_string(),
        slug: title_key(title).replace(' ', "-"),
        title: title.to_string(),
        menu_type: "mega".to_string(),
        main_heading: format!("{title} heading"),
        categories: vec![
            MegaMenuCategory {
                icon: None,
                title: "First".to_string(),
                items: vec![MegaMenuItem {
                    title: "One".to_string(),
                    url: "https://site.com/moreyeahs-new/one/".to_string(),
                    sub_items: vec![],
                }],
            },
            MegaMenuCategory {
                icon: None,
                title: "Second".to_string(),
                items: vec![],
            },
        ],
        featured_content: None,
    }
}
