use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "podium")]
#[command(author, version, about)]
#[command(long_about = "Present a markdown slide deck one slide at a time.\n\n\
    Navigate with the keyboard, swipe gestures or the on-screen buttons, keep\n\
    an eye on the talk countdown, and press ? for the shortcut reference.\n\n\
    Examples:\n  \
    podium talk.md                   Launch presentation (fullscreen)\n  \
    podium talk.md --windowed        Launch in a window\n  \
    podium talk.md --timer-minutes 45\n  \
    podium outline talk.md --json    Print slide positions and titles")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown deck to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Countdown length in minutes (overrides config)
    #[arg(long, global = false, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub timer_minutes: Option<u64>,

    /// Color theme (overrides deck and config)
    #[arg(long, value_enum, global = false)]
    pub theme: Option<ThemeName>,

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
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print each slide's position and title
    Outline {
        /// Markdown deck to inspect
        file: PathBuf,

        /// Emit JSON slide info records instead of a table
        #[arg(long)]
        json: bool,
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
        /// Configuration key (e.g. timer.minutes, input.touch, defaults.theme)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Cli {
    /// Log filter derived from the verbosity flags. Dependencies stay at
    /// `warn` unless `-vv` is given.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "warn,podium=info",
            1 => "warn,podium=debug",
            _ => "info,podium=trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Outline { file, json }) => crate::commands::outline::run(&file, json),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("podium {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(crate::app::LaunchOptions {
                        file,
                        windowed: self.windowed,
                        start_slide: self.slide,
                        timer_minutes: self.timer_minutes,
                        theme: self.theme.map(|t| t.as_str()),
                    })
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
