use anyhow::{Context, Result};
use colored::Colorize;
use notify_debouncer_mini::notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use pagedeck::{Fixture, KeyInput, Presenter, handle_key};
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::config::Config;

/// Coalesces the burst of events editors produce on save.
const FILE_DEBOUNCE: Duration = Duration::from_millis(150);
const IDLE_WAIT: Duration = Duration::from_secs(60);

enum Event {
    Reload,
    Key(String),
    Quit,
}

pub fn run(file: &Path) -> Result<()> {
    let page = Fixture::load(file)?.build();
    let settings = Config::load_or_default().settings();
    let mut presenter = Presenter::new(page, settings);

    let (tx, rx) = mpsc::channel();

    let file_tx = tx.clone();
    let mut debouncer = new_debouncer(FILE_DEBOUNCE, move |res: DebounceEventResult| match res {
        Ok(events) if !events.is_empty() => {
            let _ = file_tx.send(Event::Reload);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("watch error: {e}"),
    })
    .context("Failed to start file watcher")?;
    debouncer
        .watcher()
        .watch(file, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", file.display()))?;

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let key = line.trim();
            if key.is_empty() {
                continue;
            }
            if tx.send(Event::Key(key.to_string())).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::Quit);
    });

    presenter.enter();
    println!(
        "{} {} (type key names, e.g. ArrowRight or Escape; Ctrl-D quits)",
        "watching".bold(),
        file.display()
    );
    println!("{}", super::status_line(&presenter));

    loop {
        let wait = presenter
            .next_deadline()
            .map(|d| d.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);

        match rx.recv_timeout(wait) {
            Ok(Event::Reload) => match Fixture::load(file) {
                Ok(fixture) => {
                    let host = presenter.host_mut();
                    host.replace_content(fixture.build());
                    let records = host.take_mutations();
                    tracing::debug!(records = records.len(), "reloaded {}", file.display());
                    presenter.on_mutations(&records, Instant::now());
                }
                Err(e) => eprintln!("{} {e:#}", "reload failed:".yellow().bold()),
            },
            Ok(Event::Key(key)) => {
                let input = KeyInput::parse(&key);
                if !handle_key(&mut presenter, &input, None) {
                    println!("{}", format!("{key}: ignored").dimmed());
                    continue;
                }
                if !presenter.is_presenting() {
                    break;
                }
                println!("{}", super::status_line(&presenter));
            }
            Ok(Event::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if presenter.tick(Instant::now()) {
            println!("{} {}", "rescanned".dimmed(), super::status_line(&presenter));
        }
    }

    presenter.exit();
    println!("{}", super::status_line(&presenter));
    Ok(())
}
