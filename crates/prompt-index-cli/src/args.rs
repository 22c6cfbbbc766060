use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "prompt-index")]
#[command(about = "Convert a tree of markdown prompts into prompts.json")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project root (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    /// Split each file at H1-H3 headings
    Sections,
    /// One prompt per file
    WholeFile,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build prompts.json from the markdown tree (default)
    Build {
        /// Parsing mode (overrides config)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Output file, relative to root (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the summary without writing the file
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Parse a single markdown file and print its prompts as JSON
    Parse {
        /// Markdown file to parse
        file: PathBuf,

        /// Parsing mode (overrides config)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., parser.mode)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., walk.exclude_dirs)
        key: String,

        /// Value (lists: "a,b" or '["a", "b"]')
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with default template
    Init,
}
