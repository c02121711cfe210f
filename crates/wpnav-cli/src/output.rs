use serde::Serialize;
use wpnav_core::render::NavNode;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{cell:w$}")
            })
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    line(headers.iter().map(|h| h.to_string()).collect());
    line(widths.iter().map(|&w| "-".repeat(w)).collect());
    for row in rows {
        line(row);
    }
}

/// One line per node, indented by depth:
///
/// ```text
/// Services -> /services  [mega: 7]
/// About -> /about
///   Team -> /team
/// ```
pub fn nav_tree_lines(nodes: &[NavNode<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    push_lines(&mut lines, nodes, 0);
    lines
}

fn push_lines(lines: &mut Vec<String>, nodes: &[NavNode<'_>], depth: usize) {
    for node in nodes {
        let link = node.link();
        let mut line = format!("{}{} -> {}", "  ".repeat(depth), link.title, link.href);
        if link.target.is_external() {
            line.push_str("  (new tab)");
        }
        if let Some(mega) = node.mega() {
            line.push_str(&format!("  [mega: {}]", mega.id));
        }
        lines.push(line);
        push_lines(lines, node.children(), depth + 1);
    }
}

pub fn print_nav_tree(nodes: &[NavNode<'_>]) {
    for line in nav_tree_lines(nodes) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpnav_core::index::TitleIndex;
    use wpnav_core::links::UrlNormalizer;
    use wpnav_core::model::MenuItem;
    use wpnav_core::render::render_items;

    #[test]
    fn tree_lines_indent_children() {
        let items = vec![MenuItem::new("1", "About", "/about")
            .with_children(vec![MenuItem::new("2", "Team", "/team")])];
        let nodes = render_items(&items, &TitleIndex::empty(), &UrlNormalizer::default(), false);
        assert_eq!(nav_tree_lines(&nodes), vec!["About -> /about", "  Team -> /team"]);
    }
}
