use crate::output::{print_json, print_nav_tree};
use std::path::{Path, PathBuf};
use wpnav_core::drawer::DrawerController;
use wpnav_core::html;
use wpnav_core::index::TitleIndex;
use wpnav_core::model::MegaMenuData;
use wpnav_core::payload;
use wpnav_core::render::MenuRenderer;
use wpnav_core::scroll_lock::ScrollLock;

pub struct RenderArgs {
    pub menu: Option<PathBuf>,
    pub mega_menus: Option<PathBuf>,
    pub suppress_mega: bool,
    pub html: bool,
}

pub fn run(root: &Path, args: RenderArgs, json: bool) -> anyhow::Result<()> {
    match &args.menu {
        Some(menu) => render_file(root, menu, &args, json),
        None => render_backend(root, &args, json),
    }
}

fn render_file(root: &Path, menu: &Path, args: &RenderArgs, json: bool) -> anyhow::Result<()> {
    let config = super::load_optional_config(root)?;
    let urls = super::url_normalizer(config.as_ref());

    let items = super::read_payload(menu, payload::menu_items)?;
    let mega_menus: Vec<MegaMenuData> = match &args.mega_menus {
        Some(path) => super::read_payload(path, payload::mega_menus)?,
        None => Vec::new(),
    };
    let index = TitleIndex::build(&mega_menus);
    let nodes = MenuRenderer::new(&index, &urls)
        .suppress_mega_menu(args.suppress_mega)
        .render(&items);
    tracing::debug!(items = items.len(), mega_menus = index.len(), "rendered menu file");

    if args.html {
        println!("{}", html::render_nav(&nodes, &html::all_closed, &urls));
    } else if json {
        print_json(&nodes)?;
    } else {
        print_nav_tree(&nodes);
    }
    Ok(())
}

fn render_backend(root: &Path, args: &RenderArgs, json: bool) -> anyhow::Result<()> {
    let client = super::content_client(root)?;
    let data = super::runtime()?.block_on(client.load_header());
    for source in &data.degraded {
        eprintln!("warning: {} unavailable, rendered empty", source.as_str());
    }

    let config = client.config();
    let view = data.compose(config);

    if args.html {
        let urls = super::url_normalizer(Some(config));
        let (scroll, _) = ScrollLock::detached();
        let drawer = DrawerController::new(scroll);
        println!("{}", html::render_header(&view, &html::all_closed, &urls));
        println!(
            "{}",
            html::render_drawer(&drawer.state(), &view.mobile, view.mega_menus, &urls)
        );
    } else if json {
        print_json(&view)?;
    } else {
        println!("desktop:");
        print_nav_tree(&view.desktop);
        if !view.secondary.is_empty() {
            println!("secondary:");
            print_nav_tree(&view.secondary);
        }
        println!("mobile:");
        print_nav_tree(&view.mobile);
    }
    Ok(())
}
