use crate::output::{print_json, print_table};
use std::path::Path;
use wpnav_core::header::FetchSource;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let client = super::content_client(root)?;
    let data = super::runtime()?.block_on(client.load_header());

    if json {
        print_json(&data)?;
        return Ok(());
    }

    let status = |source: FetchSource| {
        if data.degraded.contains(&source) {
            "unavailable".to_string()
        } else {
            "ok".to_string()
        }
    };
    let settings = data
        .settings
        .as_ref()
        .map(|s| s.title.clone())
        .unwrap_or_default();

    println!("backend: {}", client.config().backend.api_url);
    print_table(
        &["SOURCE", "STATUS", "LOADED"],
        vec![
            vec![
                format!("menu:{}", client.config().menus.primary),
                status(FetchSource::PrimaryMenu),
                format!("{} items", data.primary.len()),
            ],
            vec![
                format!("menu:{}", client.config().menus.secondary),
                status(FetchSource::SecondaryMenu),
                format!("{} items", data.secondary.len()),
            ],
            vec![
                "mega-menus".to_string(),
                status(FetchSource::MegaMenus),
                format!("{} mega menus", data.mega_menus.len()),
            ],
            vec![
                "site-settings".to_string(),
                status(FetchSource::SiteSettings),
                settings,
            ],
        ],
    );
    Ok(())
}
