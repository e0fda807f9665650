use anyhow::Result;
use colored::Colorize;
use pagedeck::host::ScrollBehavior;
use pagedeck::{Fixture, KeyInput, Presenter, handle_key, locate, scroll};
use std::path::Path;

use crate::config::Config;

pub fn run(file: &Path, start_offset: f64, keys: &[String], quiet: bool) -> Result<()> {
    let page = Fixture::load(file)?.build();
    let settings = Config::load_or_default().settings();
    let mut presenter = Presenter::new(page, settings);

    let target = locate::scroll_target(presenter.host(), &presenter.settings().classifier);
    scroll::scroll_to_offset(presenter.host_mut(), &target, start_offset, ScrollBehavior::Instant);
    let before = scroll::current_offset(presenter.host(), &target);

    presenter.enter();
    if !quiet {
        println!("{:<14} {}", "enter".bold(), super::status_line(&presenter));
    }

    for key in keys {
        let input = KeyInput::parse(key);
        let consumed = handle_key(&mut presenter, &input, None);
        if quiet {
            continue;
        }
        let label = if consumed {
            key.bold()
        } else {
            format!("{key} (ignored)").dimmed()
        };
        println!("{label:<14} {}", super::status_line(&presenter));
    }

    if presenter.is_presenting() {
        presenter.exit();
    }
    let classifier = presenter.settings().classifier.clone();
    let page = presenter.into_host();
    let after = scroll::current_offset(&page, &locate::scroll_target(&page, &classifier));
    println!(
        "{} scroll restored to {after:.0} (was {before:.0})",
        "exit".bold()
    );
    Ok(())
}
