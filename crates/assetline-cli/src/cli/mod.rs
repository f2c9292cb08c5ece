//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "assetline",
    bin_name = "assetline",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Glob, transform and write assets",
    long_about = "Assetline loads files matched by glob patterns, runs them \
                  through a chain of filters declared in a task manifest, and \
                  writes the results. Tasks with a guard are skipped while \
                  their outputs are newer than their sources.",
    after_help = "EXAMPLES:\n\
        \x20 assetline init\n\
        \x20 assetline run\n\
        \x20 assetline run views --force\n\
        \x20 assetline outdated --src 'views/*.html' --dest 'dist/views/*.html'\n\
        \x20 assetline completions bash > /usr/share/bash-completion/completions/assetline",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run tasks from the manifest.
    #[command(
        visible_alias = "r",
        about = "Run manifest tasks",
        after_help = "EXAMPLES:\n\
            \x20 assetline run                 # every task, in manifest order\n\
            \x20 assetline run views bundle    # only these, in this order\n\
            \x20 assetline run --dry-run       # print the filter chains"
    )]
    Run(RunArgs),

    /// Check whether destinations are older than their sources.
    #[command(
        about = "Check whether outputs need rebuilding",
        after_help = "EXAMPLES:\n\
            \x20 assetline outdated --src 'templates/*.tmpl' --dest 'gen/*.go'\n\
            \x20 assetline outdated --src a.tmpl --dest a.out --exit-code && echo fresh"
    )]
    Outdated(OutdatedArgs),

    /// List manifest tasks.
    #[command(
        visible_alias = "ls",
        about = "List manifest tasks",
        after_help = "EXAMPLES:\n\
            \x20 assetline list\n\
            \x20 assetline list --format json"
    )]
    List(ListArgs),

    /// Write a starter manifest.
    #[command(
        about = "Create a starter manifest",
        after_help = "EXAMPLES:\n\
            \x20 assetline init\n\
            \x20 assetline init --force   # overwrite an existing manifest"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 assetline completions bash > ~/.local/share/bash-completion/completions/assetline\n\
            \x20 assetline completions zsh  > ~/.zfunc/_assetline\n\
            \x20 assetline completions fish > ~/.config/fish/completions/assetline.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Assetline configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 assetline config get manifest.path\n\
            \x20 assetline config list\n\
            \x20 assetline config path"
    )]
    Config(ConfigCommands),
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `assetline run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Tasks to run; all tasks when empty.
    #[arg(value_name = "TASK", help = "Task names (default: all tasks)")]
    pub tasks: Vec<String>,

    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Manifest path (default: from configuration)"
    )]
    pub manifest: Option<PathBuf>,

    /// Ignore task guards.
    #[arg(long = "force", help = "Run tasks even when outputs are up to date")]
    pub force: bool,

    #[arg(
        long = "dry-run",
        help = "Print each task's filter chain without touching files"
    )]
    pub dry_run: bool,
}

// ── outdated ──────────────────────────────────────────────────────────────────

/// Arguments for `assetline outdated`.
#[derive(Debug, Args)]
pub struct OutdatedArgs {
    #[arg(
        long = "src",
        value_name = "PATTERN",
        num_args = 1..,
        required = true,
        help = "Source glob patterns"
    )]
    pub src: Vec<String>,

    #[arg(
        long = "dest",
        value_name = "PATTERN",
        num_args = 1..,
        required = true,
        help = "Destination glob patterns"
    )]
    pub dest: Vec<String>,

    /// Exit with status 1 when outdated.
    #[arg(long = "exit-code", help = "Exit with status 1 when a rebuild is needed")]
    pub exit_code: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `assetline list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Manifest path (default: from configuration)"
    )]
    pub manifest: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Names, descriptions and filter counts.
    Table,
    /// One name per line.
    List,
    /// The tasks as a JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `assetline init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing manifest.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing manifest")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `assetline completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `assetline config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `manifest.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
