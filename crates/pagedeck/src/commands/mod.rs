pub mod completion;
pub mod config;
pub mod scan;
pub mod walk;
pub mod watch;

use colored::Colorize;
use pagedeck::{Page, PresentationSurface, Presenter};

pub fn print_version() {
    println!("{} {}", "pagedeck".bold(), env!("CARGO_PKG_VERSION"));
}

/// One status line: slide counter, zoom and the blocks on screen.
pub(crate) fn status_line(presenter: &Presenter<Page>) -> String {
    if !presenter.is_presenting() {
        let offset = pagedeck::scroll::current_offset(
            presenter.host(),
            &pagedeck::locate::scroll_target(presenter.host(), &presenter.settings().classifier),
        );
        return format!("{} (scroll {offset:.0})", "idle".dimmed());
    }
    let range = presenter.visible_range();
    let blocks = if range.is_empty() {
        "all".to_string()
    } else {
        range.ids().join(" ")
    };
    let fullscreen = if presenter.host().is_fullscreen() {
        " [fullscreen]"
    } else {
        ""
    };
    format!(
        "{} zoom {}%{fullscreen}  {}",
        presenter.status_text().green().bold(),
        presenter.session().zoom.percent(),
        blocks.cyan()
    )
}
