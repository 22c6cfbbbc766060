use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use prompt_index_core::config::Config;
use prompt_index_core::parser::{parse_document, ParseMode};
use prompt_index_core::{build, read_lossy, BuildResult, PromptIndexError, Result};

mod args;
use args::{Cli, Commands, ConfigAction, Mode, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let root = resolve_root(cli.root);

    let result = match cli.command {
        Some(Commands::Build {
            mode,
            output,
            dry_run,
        }) => handle_build(&root, mode, output, dry_run, cli.quiet),
        Some(Commands::Parse { file, mode }) => handle_parse(&root, &file, mode),
        Some(Commands::Config { action }) => handle_config(action, &root),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => handle_build(&root, None, None, false, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise warn by default, debug with --verbose
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose && !quiet {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    cli_root.unwrap_or_else(|| PathBuf::from("."))
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sections => ParseMode::Sections,
            Mode::WholeFile => ParseMode::WholeFile,
        }
    }
}

fn load_config(root: &Path, mode: Option<Mode>) -> Result<Config> {
    let mut config = Config::load(root)?;
    if let Some(mode) = mode {
        config.parser.mode = mode.into();
    }
    Ok(config)
}

fn handle_build(
    root: &Path,
    mode: Option<Mode>,
    output: Option<PathBuf>,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let mut config = load_config(root, mode)?;
    if let Some(output) = output {
        config.output.file = output;
    }

    let result = build(root, &config, dry_run)?;
    if !quiet {
        print_summary(&result);
    }
    Ok(())
}

fn print_summary(result: &BuildResult) {
    println!("{}", format_summary(result));
}

/// ビルド結果のサマリー（1行目が合計、以降はカテゴリごと）
fn format_summary(result: &BuildResult) -> String {
    let index = &result.index;
    let status = if result.written {
        "✅ 完了！"
    } else {
        "🔍 ドライラン"
    };

    let mut lines = vec![format!(
        "{}  カテゴリ: {}  プロンプト: {}  → {}",
        status,
        index.categories.len(),
        index.total_prompts(),
        result.output.display()
    )];
    for category in &index.categories {
        lines.push(format!(
            "   {} {}  ({}件)",
            category.icon,
            category.name,
            category.prompts.len()
        ));
    }
    lines.join("\n")
}

fn handle_parse(root: &Path, file: &Path, mode: Option<Mode>) -> Result<()> {
    let config = load_config(root, mode)?;
    let text = read_lossy(file)?;

    let relative = file.strip_prefix(root).unwrap_or(file);
    let records = parse_document(&text, relative, config.parser.mode);

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn handle_config(action: ConfigAction, root: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(root)?;
            let value = config
                .get(&key)
                .ok_or(PromptIndexError::ConfigKeyNotFound { key })?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(root)?;
            config.set(&key, &value)?;
            config.save(root)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(root)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(root);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(root)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "prompt-index", &mut io::stdout());
}
