use crate::config::Config;
use crate::drawer::drawer_items;
use crate::index::TitleIndex;
use crate::links::UrlNormalizer;
use crate::model::{Image, LinkTarget, MegaMenuData, MenuItem, SiteSettings};
use crate::render::{flatten, Link, MenuRenderer, NavNode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One of the independent requests that feed the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchSource {
    PrimaryMenu,
    SecondaryMenu,
    MegaMenus,
    SiteSettings,
}

impl FetchSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchSource::PrimaryMenu => "primary_menu",
            FetchSource::SecondaryMenu => "secondary_menu",
            FetchSource::MegaMenus => "mega_menus",
            FetchSource::SiteSettings => "site_settings",
        }
    }
}

/// Everything fetched for one page render.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderData {
    pub settings: Option<SiteSettings>,
    pub primary: Vec<MenuItem>,
    pub secondary: Vec<MenuItem>,
    pub mega_menus: Vec<MegaMenuData>,
    pub fetched_at: DateTime<Utc>,
    /// Sources that failed and were replaced by empty defaults.
    pub degraded: Vec<FetchSource>,
}

impl HeaderData {
    pub fn empty() -> Self {
        Self {
            settings: None,
            primary: Vec::new(),
            secondary: Vec::new(),
            mega_menus: Vec::new(),
            fetched_at: Utc::now(),
            degraded: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Resolve the fetched data into the three navigation surfaces.
    pub fn compose(&self, config: &Config) -> HeaderView<'_> {
        let urls = UrlNormalizer::from_config(&config.urls);
        let index = TitleIndex::build(&self.mega_menus);
        let renderer = MenuRenderer::new(&index, &urls);

        let desktop = if self.primary.is_empty() {
            vec![home_link()]
        } else {
            renderer
                .suppress_mega_menu(config.menus.suppress_mega_on_primary)
                .render(&self.primary)
        };

        HeaderView {
            brand: Brand {
                title: self.settings.as_ref().map_or("", |s| s.title.as_str()),
                logo: self.settings.as_ref().and_then(|s| s.logo.as_ref()),
            },
            desktop,
            secondary: renderer.render(&self.secondary),
            mobile: renderer.render(drawer_items(&self.primary, &self.secondary)),
            mega_menus: &self.mega_menus,
            degraded: &self.degraded,
        }
    }
}

fn home_link() -> NavNode<'static> {
    NavNode::Link {
        link: Link {
            id: "home".to_string(),
            title: "Home".to_string(),
            href: "/".to_string(),
            target: LinkTarget::SameTab,
            classes: String::new(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Brand<'a> {
    pub title: &'a str,
    pub logo: Option<&'a Image>,
}

/// Render trees for every header surface, borrowing from [`HeaderData`].
#[derive(Debug, Clone, Serialize)]
pub struct HeaderView<'a> {
    pub brand: Brand<'a>,
    pub desktop: Vec<NavNode<'a>>,
    pub secondary: Vec<NavNode<'a>>,
    pub mobile: Vec<NavNode<'a>>,
    #[serde(skip)]
    pub mega_menus: &'a [MegaMenuData],
    pub degraded: &'a [FetchSource],
}

impl<'a> HeaderView<'a> {
    pub fn find_mega(&self, id: &str) -> Option<&'a MegaMenuData> {
        self.mega_menus.iter().find(|m| m.id == id)
    }

    /// A mega menu that some drawer item, at any depth, opens.
    pub fn find_mobile_mega(&self, id: &str) -> Option<&'a MegaMenuData> {
        flatten(&self.mobile)
            .into_iter()
            .find_map(|node| node.mega().filter(|m| m.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::mega;

    fn data() -> HeaderData {
        let mut d = HeaderData::empty();
        d.primary = vec![
            MenuItem::new("1", "Home", "https://cms.example.com/moreyeahs-new/home/"),
            MenuItem::new("2", "Services", "https://cms.example.com/moreyeahs-new/services/"),
        ];
        d.mega_menus = vec![mega("m1", "Services")];
        d
    }

    #[test]
    fn desktop_suppresses_mega_menus_by_default() {
        let d = data();
        let view = d.compose(&Config::new("https://cms.example.com"));
        assert!(view.desktop.iter().all(|n| !n.is_mega_trigger()));
        assert_eq!(view.desktop[0].link().href, "/");
        assert_eq!(view.desktop[1].link().href, "/services");
    }

    #[test]
    fn desktop_uses_mega_menus_when_not_suppressed() {
        let d = data();
        let mut cfg = Config::new("https://cms.example.com");
        cfg.menus.suppress_mega_on_primary = false;
        let view = d.compose(&cfg);
        assert_eq!(view.desktop[1].mega().map(|m| m.id.as_str()), Some("m1"));
    }

    #[test]
    fn mobile_falls_back_to_primary_and_consults_index() {
        let d = data();
        let view = d.compose(&Config::new("https://cms.example.com"));
        assert!(view.secondary.is_empty());
        assert_eq!(view.mobile.len(), 2);
        assert!(view.mobile[1].is_mega_trigger());
        assert_eq!(view.find_mega("m1").map(|m| m.title.as_str()), Some("Services"));
    }

    #[test]
    fn mobile_mega_lookup_requires_a_drawer_trigger() {
        let mut d = data();
        d.mega_menus.push(mega("m2", "Pricing"));
        let view = d.compose(&Config::new("https://cms.example.com"));
        assert_eq!(view.find_mobile_mega("m1").map(|m| m.id.as_str()), Some("m1"));
        assert!(view.find_mega("m2").is_some());
        assert!(view.find_mobile_mega("m2").is_none());
    }

    #[test]
    fn mobile_prefers_secondary_menu() {
        let mut d = data();
        d.secondary = vec![MenuItem::new("9", "Blog", "/blog")];
        let view = d.compose(&Config::new("https://cms.example.com"));
        assert_eq!(view.mobile.len(), 1);
        assert_eq!(view.mobile[0].link().title, "Blog");
        assert_eq!(view.secondary.len(), 1);
    }

    #[test]
    fn empty_primary_renders_home_link() {
        let d = HeaderData::empty();
        let view = d.compose(&Config::new("https://cms.example.com"));
        assert_eq!(view.desktop, vec![home_link()]);
        assert!(view.mobile.is_empty());
        assert_eq!(view.brand.title, "");
        assert!(view.brand.logo.is_none());
    }

    #[test]
    fn brand_comes_from_site_settings() {
        let mut d = HeaderData::empty();
        d.settings = Some(SiteSettings {
            title: "MoreYeahs".into(),
            logo: Some(Image {
                url: "https://cms.example.com/logo.svg".into(),
                width: None,
                height: None,
                alt: "MoreYeahs".into(),
            }),
        });
        let view = d.compose(&Config::new("https://cms.example.com"));
        assert_eq!(view.brand.title, "MoreYeahs");
        assert_eq!(view.brand.logo.unwrap().url, "https://cms.example.com/logo.svg");
    }

    #[test]
    fn view_serializes_without_mega_dataset() {
        let mut d = data();
        d.degraded.push(FetchSource::SiteSettings);
        let view = d.compose(&Config::new("https://cms.example.com"));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("mega_menus").is_none());
        assert_eq!(json["degraded"][0], "site_settings");
        assert_eq!(json["mobile"][1]["kind"], "mega_trigger");
    }
}
