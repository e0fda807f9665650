use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let settings = config.settings();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("{}", "defaults".bold());
    println!(
        "  debounce_ms:    {}",
        settings.quiet_period.as_millis().to_string().cyan()
    );
    println!(
        "  smooth_scroll:  {}",
        (settings.scroll_behavior == pagedeck::ScrollBehavior::Smooth)
            .to_string()
            .cyan()
    );
    println!(
        "  isolate_slides: {}",
        settings.isolate_slides.to_string().cyan()
    );
    println!("  zoom:           {}", settings.default_zoom.to_string().cyan());
    println!("  show_zoom:      {}", settings.show_zoom.to_string().cyan());
    println!();

    let source = if config.classifier.is_some() {
        "from config"
    } else {
        "built-in"
    };
    println!("{} {}", "classifier".bold(), format!("({source})").dimmed());
    let yaml = serde_yaml::to_string(&settings.classifier)?;
    for line in yaml.lines() {
        println!("  {line}");
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Set".green().bold(),
        key,
        value.cyan(),
        path.display()
    );
    Ok(())
}
