use crate::output::{print_json, print_table};
use std::path::Path;
use wpnav_core::links::UrlNormalizer;

pub fn run(root: &Path, urls: &[String], base_path: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = super::load_optional_config(root)?;
    let mut normalizer = super::url_normalizer(config.as_ref());
    if let Some(base) = base_path {
        let hosts = config
            .as_ref()
            .map(|c| c.urls.site_hosts.clone())
            .unwrap_or_default();
        normalizer = UrlNormalizer::new(base).with_site_hosts(hosts);
    }

    let pairs: Vec<(String, String)> = urls
        .iter()
        .map(|u| (u.clone(), normalizer.normalize(u)))
        .collect();

    if json {
        let out: Vec<serde_json::Value> = pairs
            .iter()
            .map(|(input, url)| serde_json::json!({ "input": input, "url": url }))
            .collect();
        print_json(&out)?;
    } else if pairs.len() == 1 {
        println!("{}", pairs[0].1);
    } else {
        print_table(
            &["INPUT", "URL"],
            pairs.into_iter().map(|(i, u)| vec![i, u]).collect(),
        );
    }
    Ok(())
}
