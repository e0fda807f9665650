use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagedeck")]
#[command(author, version, about)]
#[command(long_about = "Present a notes page as slides.\n\n\
    Slides start at the first block, at every top-level heading and after \
    every divider. The commands below drive the presentation engine against \
    a page described in YAML.\n\n\
    Examples:\n  \
    pagedeck scan page.yaml                       List slide boundaries\n  \
    pagedeck walk page.yaml --keys ArrowRight,f   Present and press keys\n  \
    pagedeck watch page.yaml                      Present and follow edits")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the slide boundaries of a page
    Scan {
        /// Page fixture (YAML)
        file: PathBuf,
    },

    /// Enter presentation mode and replay key presses
    Walk {
        /// Page fixture (YAML)
        file: PathBuf,

        /// Scroll offset to start from, in pixels
        #[arg(long, default_value = "0")]
        scroll: f64,

        /// Comma-separated key names (e.g. ArrowRight,Shift+Space,Escape)
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },

    /// Present a page and re-scan whenever the file changes
    Watch {
        /// Page fixture (YAML)
        file: PathBuf,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.zoom, defaults.debounce_ms, defaults.isolate_slides)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let quiet = self.quiet;
        match self.command {
            Some(Commands::Scan { file }) => {
                ensure_exists(&file)?;
                crate::commands::scan::run(&file)
            }
            Some(Commands::Walk { file, scroll, keys }) => {
                ensure_exists(&file)?;
                crate::commands::walk::run(&file, scroll, &keys, quiet)
            }
            Some(Commands::Watch { file }) => {
                ensure_exists(&file)?;
                crate::commands::watch::run(&file)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}

fn ensure_exists(file: &std::path::Path) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    Ok(())
}
