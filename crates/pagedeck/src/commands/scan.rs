use anyhow::Result;
use colored::Colorize;
use pagedeck::locate::{self, ScrollTarget};
use pagedeck::{Fixture, HostDocument, boundary, scroll, tree};
use std::path::Path;

use crate::config::Config;

pub fn run(file: &Path) -> Result<()> {
    let page = Fixture::load(file)?.build();
    let classifier = Config::load_or_default().settings().classifier;

    let root = locate::content_root(&page, &classifier);
    let target = locate::scroll_target(&page, &classifier);
    let boundaries = boundary::scan(&page, &classifier, &root);

    let scroller = match &target {
        ScrollTarget::Viewport => "viewport".to_string(),
        ScrollTarget::Element(el) => format!("container {el:?}"),
    };
    let chrome = tree::descendants(&page, &page.document_element())
        .iter()
        .filter(|n| classifier.is_chrome(&page, n))
        .count();
    println!(
        "{} {} slide(s), scrolling in {}, viewport {:.0}px, {} chrome element(s) hidden while presenting",
        file.display().to_string().bold(),
        boundaries.len(),
        scroller,
        page.viewport_height(),
        chrome
    );

    for (i, b) in boundaries.iter().enumerate() {
        let top = boundary::resolve(&page, &classifier, &root, b)
            .map(|el| format!("{:>7.0}", scroll::element_top(&page, &target, &el)))
            .unwrap_or_else(|| format!("{:>7}", "-"));
        println!(
            "  {:>3}  {:<8} {}  {}",
            i + 1,
            b.kind.to_string().yellow(),
            top,
            b.stable_id.as_deref().unwrap_or("(no id)").cyan()
        );
    }
    Ok(())
}
