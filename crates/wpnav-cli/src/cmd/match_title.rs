use crate::output::print_json;
use std::path::Path;
use wpnav_core::index::{title_key, TitleIndex};
use wpnav_core::model::MegaMenuData;
use wpnav_core::{payload, NavError};

pub fn run(root: &Path, title: &str, mega_menus: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let dataset: Vec<MegaMenuData> = match mega_menus {
        Some(path) => super::read_payload(path, payload::mega_menus)?,
        None => {
            let client = super::content_client(root)?;
            super::runtime()?.block_on(client.fetch_mega_menus())?
        }
    };

    let index = TitleIndex::build(&dataset);
    let Some(mega) = index.lookup(title) else {
        return Err(NavError::MegaMenuNotFound(title.to_string()).into());
    };

    if json {
        print_json(&serde_json::json!({
            "title": title,
            "key": title_key(title),
            "mega_menu": mega,
        }))?;
    } else {
        println!("{} -> mega menu {} ({})", title, mega.id, mega.title);
        for (i, category) in mega.categories.iter().enumerate() {
            println!("  [{i}] {} ({} items)", category.title, category.items.len());
        }
        if let Some(featured) = mega.featured() {
            println!("  featured: {}", featured.title);
        }
    }
    Ok(())
}
