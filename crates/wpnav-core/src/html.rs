//! Server-side HTML for the navigation surfaces.
//!
//! Markup only: styling and client behavior hang off the class names and
//! `data-*` attributes. Every piece of CMS text goes through `html-escape`.

use crate::drawer::DrawerState;
use crate::header::HeaderView;
use crate::links::UrlNormalizer;
use crate::model::{Image, LinkTarget, MegaMenuData};
use crate::panel::PanelPhase;
use crate::render::{Link, NavNode};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Phase of each mega panel at render time.
pub type PanelLookup<'p> = &'p dyn Fn(&MegaMenuData) -> PanelPhase;

/// Every panel closed, the state of a fresh page load.
pub fn all_closed(_: &MegaMenuData) -> PanelPhase {
    PanelPhase::Closed
}

// ---------------------------------------------------------------------------
// Desktop navigation
// ---------------------------------------------------------------------------

pub fn render_nav(nodes: &[NavNode<'_>], panels: PanelLookup<'_>, urls: &UrlNormalizer) -> String {
    let mut out = String::new();
    write_nav_list(&mut out, nodes, "menu", "nav", panels, urls);
    out
}

/// Element id of a mega panel. Item ids are only unique within one menu,
/// and one mega menu can hang off several items, so both are part of it.
fn mega_panel_id(scope: &str, link: &Link, mega: &MegaMenuData) -> String {
    format!("mega-panel-{scope}-{}-{}", link.id, mega.id)
}

fn write_nav_list(
    out: &mut String,
    nodes: &[NavNode<'_>],
    class: &str,
    scope: &str,
    panels: PanelLookup<'_>,
    urls: &UrlNormalizer,
) {
    out.push_str(&format!("<ul class=\"{class}\">"));
    for node in nodes {
        let link = node.link();
        match node {
            NavNode::Link { .. } => {
                open_item(out, link, "menu-item");
                write_anchor(out, link);
            }
            NavNode::Submenu { children, .. } => {
                open_item(out, link, "menu-item has-children");
                write_anchor(out, link);
                write_nav_list(out, children, "sub-menu", scope, panels, urls);
            }
            NavNode::MegaTrigger { mega, .. } => {
                let phase = panels(mega);
                let open = phase.is_open();
                let panel_id = mega_panel_id(scope, link, mega);
                open_item(
                    out,
                    link,
                    if open {
                        "menu-item mega-trigger is-open"
                    } else {
                        "menu-item mega-trigger"
                    },
                );
                out.push_str(&format!(
                    "<button type=\"button\" class=\"mega-toggle\" aria-haspopup=\"true\" aria-expanded=\"{open}\" aria-controls=\"{}\">{}</button>",
                    attr(&panel_id),
                    text(&link.title),
                ));
                out.push_str(&format!(
                    "<div class=\"mega-panel\" id=\"{}\"{}>",
                    attr(&panel_id),
                    if open { "" } else { " hidden" },
                ));
                // A closed panel is pre-rendered on the category it would open on.
                let active = if open {
                    phase.active_category()
                } else {
                    mega.default_category()
                };
                write_mega_panel(out, mega, active, urls);
                out.push_str("</div>");
            }
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

fn open_item(out: &mut String, link: &Link, base_class: &str) {
    let classes = if link.classes.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {}", link.classes)
    };
    out.push_str(&format!(
        "<li class=\"{}\" data-item-id=\"{}\">",
        attr(&classes),
        attr(&link.id),
    ));
}

fn write_anchor(out: &mut String, link: &Link) {
    write_href(out, &link.href, &link.title, link.target);
}

fn write_href(out: &mut String, href: &str, title: &str, target: LinkTarget) {
    out.push_str(&format!("<a href=\"{}\"", attr(href)));
    if target.is_external() {
        out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
    }
    out.push_str(&format!(">{}</a>", text(title)));
}

fn write_image(out: &mut String, image: &Image, class: &str) {
    out.push_str(&format!(
        "<img class=\"{class}\" src=\"{}\" alt=\"{}\"",
        attr(&image.url),
        attr(&image.alt),
    ));
    if let Some(w) = image.width {
        out.push_str(&format!(" width=\"{w}\""));
    }
    if let Some(h) = image.height {
        out.push_str(&format!(" height=\"{h}\""));
    }
    out.push_str(" loading=\"lazy\">");
}

// ---------------------------------------------------------------------------
// Mega panel
// ---------------------------------------------------------------------------

/// Category tabs, the active category's items, and the featured block.
/// `active_category` out of range renders an empty content area.
pub fn render_mega_panel(
    mega: &MegaMenuData,
    active_category: Option<usize>,
    urls: &UrlNormalizer,
) -> String {
    let mut out = String::new();
    write_mega_panel(&mut out, mega, active_category, urls);
    out
}

fn write_mega_panel(
    out: &mut String,
    mega: &MegaMenuData,
    active_category: Option<usize>,
    urls: &UrlNormalizer,
) {
    out.push_str(&format!(
        "<div class=\"mega-menu\" data-mega-id=\"{}\" data-menu-type=\"{}\">",
        attr(&mega.id),
        attr(&mega.menu_type),
    ));
    if !mega.main_heading.is_empty() {
        out.push_str(&format!(
            "<p class=\"mega-heading\">{}</p>",
            text(&mega.main_heading)
        ));
    }

    out.push_str("<ul class=\"mega-categories\" role=\"tablist\">");
    for (i, category) in mega.categories.iter().enumerate() {
        let selected = active_category == Some(i);
        out.push_str(&format!(
            "<li class=\"mega-category{}\" role=\"tab\" aria-selected=\"{selected}\" data-index=\"{i}\">",
            if selected { " is-active" } else { "" },
        ));
        if let Some(icon) = &category.icon {
            write_image(out, icon, "mega-category-icon");
        }
        out.push_str(&format!("<span>{}</span></li>", text(&category.title)));
    }
    out.push_str("</ul>");

    out.push_str("<div class=\"mega-content\" role=\"tabpanel\">");
    if let Some(category) = active_category.and_then(|i| mega.category(i)) {
        if !category.items.is_empty() {
            out.push_str("<ul class=\"mega-items\">");
            for item in &category.items {
                out.push_str("<li class=\"mega-item\">");
                write_href(out, &urls.normalize(&item.url), &item.title, LinkTarget::SameTab);
                if !item.sub_items.is_empty() {
                    out.push_str("<ul class=\"mega-sub-items\">");
                    for sub in &item.sub_items {
                        out.push_str("<li>");
                        write_href(out, &urls.normalize(&sub.url), &sub.title, LinkTarget::SameTab);
                        out.push_str("</li>");
                    }
                    out.push_str("</ul>");
                }
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
    }
    out.push_str("</div>");

    if let Some(featured) = mega.featured() {
        out.push_str("<aside class=\"mega-featured\">");
        if let Some(image) = &featured.image {
            write_image(out, image, "mega-featured-image");
        }
        if !featured.title.is_empty() {
            out.push_str(&format!("<h3>{}</h3>", text(&featured.title)));
        }
        if !featured.description.is_empty() {
            out.push_str(&format!("<p>{}</p>", text(&featured.description)));
        }
        out.push_str("</aside>");
    }
    out.push_str("</div>");
}

// ---------------------------------------------------------------------------
// Mobile drawer
// ---------------------------------------------------------------------------

pub fn render_drawer(
    drawer: &DrawerState,
    nodes: &[NavNode<'_>],
    mega_menus: &[MegaMenuData],
    urls: &UrlNormalizer,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<div class=\"mobile-drawer{}\" aria-hidden=\"{}\">",
        if drawer.open { " is-open" } else { "" },
        !drawer.open,
    ));
    out.push_str(
        "<button type=\"button\" class=\"drawer-close\" aria-label=\"Close menu\">Close</button>",
    );
    out.push_str("<nav aria-label=\"Mobile\">");
    write_drawer_list(&mut out, nodes, "drawer-menu", drawer);
    out.push_str("</nav>");

    let active = drawer
        .active_mega_menu
        .as_deref()
        .and_then(|id| mega_menus.iter().find(|m| m.id == id));
    if let Some(mega) = active {
        out.push_str(&format!(
            "<div class=\"drawer-mega\" data-mega-id=\"{}\">",
            attr(&mega.id)
        ));
        out.push_str(&format!(
            "<button type=\"button\" class=\"drawer-mega-back\">{}</button>",
            text(&mega.title)
        ));
        write_mega_panel(&mut out, mega, drawer.active_mega_category, urls);
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

fn write_drawer_list(out: &mut String, nodes: &[NavNode<'_>], class: &str, drawer: &DrawerState) {
    out.push_str(&format!("<ul class=\"{class}\">"));
    for node in nodes {
        let link = node.link();
        match node {
            NavNode::Link { .. } => {
                open_item(out, link, "drawer-item");
                write_anchor(out, link);
            }
            NavNode::Submenu { children, .. } => {
                let expanded = drawer.open_items.iter().any(|id| *id == link.id);
                let sub_id = format!("drawer-sub-{}", link.id);
                open_item(
                    out,
                    link,
                    if expanded {
                        "drawer-item has-children is-expanded"
                    } else {
                        "drawer-item has-children"
                    },
                );
                write_anchor(out, link);
                out.push_str(&format!(
                    "<button type=\"button\" class=\"accordion-toggle\" aria-expanded=\"{expanded}\" aria-controls=\"{}\" aria-label=\"Toggle {}\"></button>",
                    attr(&sub_id),
                    attr(&link.title),
                ));
                out.push_str(&format!(
                    "<div id=\"{}\"{}>",
                    attr(&sub_id),
                    if expanded { "" } else { " hidden" }
                ));
                write_drawer_list(out, children, "sub-menu", drawer);
                out.push_str("</div>");
            }
            NavNode::MegaTrigger { mega, .. } => {
                let active = drawer.active_mega_menu.as_deref() == Some(mega.id.as_str());
                open_item(
                    out,
                    link,
                    if active {
                        "drawer-item has-mega is-active"
                    } else {
                        "drawer-item has-mega"
                    },
                );
                out.push_str(&format!(
                    "<button type=\"button\" class=\"drawer-mega-toggle\" data-mega-id=\"{}\" aria-expanded=\"{active}\">{}</button>",
                    attr(&mega.id),
                    text(&link.title),
                ));
            }
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Brand, desktop and secondary navigation, and the drawer toggle.
pub fn render_header(view: &HeaderView<'_>, panels: PanelLookup<'_>, urls: &UrlNormalizer) -> String {
    let mut out = String::from("<header class=\"site-header\">");
    out.push_str("<a class=\"site-brand\" href=\"/\">");
    match view.brand.logo {
        Some(logo) => write_image(&mut out, logo, "site-logo"),
        None => out.push_str(&format!(
            "<span class=\"site-title\">{}</span>",
            text(view.brand.title)
        )),
    }
    out.push_str("</a>");

    out.push_str("<nav class=\"primary-nav\" aria-label=\"Primary\">");
    write_nav_list(&mut out, &view.desktop, "menu", "primary", panels, urls);
    out.push_str("</nav>");

    if !view.secondary.is_empty() {
        out.push_str("<nav class=\"secondary-nav\" aria-label=\"Secondary\">");
        write_nav_list(&mut out, &view.secondary, "menu", "secondary", panels, urls);
        out.push_str("</nav>");
    }

    out.push_str(
        "<button type=\"button\" class=\"drawer-toggle\" aria-label=\"Open menu\" aria-expanded=\"false\">Menu</button>",
    );
    out.push_str("</header>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::header::HeaderData;
    use crate::index::{mega, TitleIndex};
    use crate::model::{FeaturedContent, MenuItem};
    use crate::render::render_items;

    fn urls() -> UrlNormalizer {
        UrlNormalizer::default()
    }

    #[test]
    fn nav_escapes_titles_and_attributes() {
        let items = vec![MenuItem::new("1", "R&D <lab>", "/a\"b")];
        let nodes = render_items(&items, &TitleIndex::empty(), &urls(), false);
        let html = render_nav(&nodes, &all_closed, &urls());
        assert!(html.contains(">R&amp;D &lt;lab&gt;</a>"), "{html}");
        assert!(html.contains("href=\"/a&quot;b\""), "{html}");
    }

    #[test]
    fn blank_targets_get_noopener() {
        let mut item = MenuItem::new("1", "Docs", "https://docs.example.org/");
        item.target = LinkTarget::Blank;
        let nodes = render_items(&[item], &TitleIndex::empty(), &urls(), false);
        let html = render_nav(&nodes, &all_closed, &urls());
        assert!(html.contains("target=\"_blank\" rel=\"noopener noreferrer\""));
    }

    #[test]
    fn submenus_nest() {
        let items = vec![MenuItem::new("1", "About", "/about")
            .with_children(vec![MenuItem::new("2", "Team", "/team")])];
        let nodes = render_items(&items, &TitleIndex::empty(), &urls(), false);
        let html = render_nav(&nodes, &all_closed, &urls());
        assert!(html.contains("class=\"menu-item has-children\""));
        assert!(html.contains("<ul class=\"sub-menu\"><li class=\"menu-item\" data-item-id=\"2\">"));
    }

    #[test]
    fn mega_trigger_renders_hidden_panel_until_open() {
        let megas = vec![mega("7", "Services")];
        let index = TitleIndex::build(&megas);
        let items = vec![MenuItem::new("1", "Services", "/services")];
        let nodes = render_items(&items, &index, &urls(), false);

        let closed = render_nav(&nodes, &all_closed, &urls());
        assert!(closed.contains("aria-expanded=\"false\""));
        assert!(closed.contains("id=\"mega-panel-nav-1-7\" hidden"));

        let open = |_: &MegaMenuData| PanelPhase::Open {
            active_category: Some(1),
        };
        let html = render_nav(&nodes, &open, &urls());
        assert!(html.contains("mega-trigger is-open"));
        assert!(html.contains("aria-selected=\"true\" data-index=\"1\""));
    }

    #[test]
    fn items_sharing_a_mega_menu_get_distinct_panel_ids() {
        let megas = vec![mega("7", "Services")];
        let index = TitleIndex::build(&megas);
        let items = vec![
            MenuItem::new("1", "Service", "/service"),
            MenuItem::new("2", "Services", "/services"),
        ];
        let nodes = render_items(&items, &index, &urls(), false);
        let html = render_nav(&nodes, &all_closed, &urls());
        assert!(html.contains("aria-controls=\"mega-panel-nav-1-7\""));
        assert!(html.contains("id=\"mega-panel-nav-1-7\""));
        assert!(html.contains("aria-controls=\"mega-panel-nav-2-7\""));
        assert!(html.contains("id=\"mega-panel-nav-2-7\""));
    }

    #[test]
    fn header_scopes_panel_ids_per_nav() {
        let mut cfg = Config::new("https://cms.example.com");
        cfg.menus.suppress_mega_on_primary = false;
        let mut data = HeaderData::empty();
        data.primary = vec![MenuItem::new("1", "Services", "/services")];
        data.secondary = vec![MenuItem::new("1", "Services", "/services")];
        data.mega_menus = vec![mega("7", "Services")];
        let view = data.compose(&cfg);
        let html = render_header(&view, &all_closed, &urls());
        assert!(html.contains("id=\"mega-panel-primary-1-7\""));
        assert!(html.contains("id=\"mega-panel-secondary-1-7\""));
        assert_eq!(html.matches("id=\"mega-panel-").count(), 2);
    }

    #[test]
    fn mega_panel_marks_active_tab_and_normalizes_links() {
        let m = mega("7", "Services");
        let html = render_mega_panel(&m, Some(0), &urls());
        assert!(html.contains("aria-selected=\"true\" data-index=\"0\""));
        assert!(html.contains("aria-selected=\"false\" data-index=\"1\""));
        assert!(html.contains("<a href=\"/one\">One</a>"), "{html}");
        assert!(!html.contains("mega-featured"));
    }

    #[test]
    fn empty_category_renders_empty_content() {
        let m = mega("7", "Services");
        let html = render_mega_panel(&m, Some(1), &urls());
        assert!(html.contains("<div class=\"mega-content\" role=\"tabpanel\"></div>"));

        let mut bare = mega("8", "Bare");
        bare.categories.clear();
        let html = render_mega_panel(&bare, bare.default_category(), &urls());
        assert!(html.contains("<ul class=\"mega-categories\" role=\"tablist\"></ul>"));
    }

    #[test]
    fn featured_block_only_when_enabled() {
        let mut m = mega("7", "Services");
        m.featured_content = Some(FeaturedContent {
            enable: false,
            image: None,
            title: "Case study".into(),
            description: "Read it".into(),
        });
        assert!(!render_mega_panel(&m, Some(0), &urls()).contains("Case study"));

        if let Some(f) = m.featured_content.as_mut() {
            f.enable = true;
        }
        let html = render_mega_panel(&m, Some(0), &urls());
        assert!(html.contains("<aside class=\"mega-featured\"><h3>Case study</h3><p>Read it</p></aside>"));
    }

    #[test]
    fn drawer_reflects_controller_state() {
        let megas = vec![mega("7", "Services")];
        let index = TitleIndex::build(&megas);
        let items = vec![
            MenuItem::new("4", "About", "/about")
                .with_children(vec![MenuItem::new("5", "Team", "/team")]),
            MenuItem::new("6", "Services", "/services"),
        ];
        let nodes = render_items(&items, &index, &urls(), false);
        let state = DrawerState {
            open: true,
            active_mega_menu: Some("7".into()),
            active_mega_category: Some(0),
            open_items: vec!["4".into()],
        };

        let html = render_drawer(&state, &nodes, &megas, &urls());
        assert!(html.starts_with("<div class=\"mobile-drawer is-open\" aria-hidden=\"false\">"));
        assert!(html.contains("has-children is-expanded"));
        assert!(html.contains("aria-expanded=\"true\" aria-controls=\"drawer-sub-4\""));
        assert!(html.contains("<div id=\"drawer-sub-4\">"));
        assert!(html.contains("has-mega is-active"));
        assert!(html.contains("<div class=\"drawer-mega\" data-mega-id=\"7\">"));
    }

    #[test]
    fn closed_drawer_has_no_overlay() {
        let state = DrawerState {
            open: false,
            active_mega_menu: None,
            active_mega_category: None,
            open_items: vec![],
        };
        let html = render_drawer(&state, &[], &[], &urls());
        assert!(html.contains("aria-hidden=\"true\""));
        assert!(!html.contains("drawer-mega\""));
    }

    #[test]
    fn header_falls_back_to_title_and_home() {
        let data = HeaderData::empty();
        let view = data.compose(&Config::new("https://cms.example.com"));
        let html = render_header(&view, &all_closed, &urls());
        assert!(html.contains("<span class=\"site-title\"></span>"));
        assert!(html.contains("<a href=\"/\">Home</a>"));
        assert!(!html.contains("secondary-nav"));
    }
}
