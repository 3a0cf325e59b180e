//! Clap argument definitions for the `alex` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use alex_store::{SearchScope, UpsertMode};

/// Parses a search scope from a CLI argument.
fn parse_scope(s: &str) -> Result<SearchScope, String> {
    s.parse()
}

/// Parses a duplicate-resolution mode from a CLI argument.
fn parse_mode(s: &str) -> Result<UpsertMode, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "alex")]
#[command(about = "Encyclopedia articles, parsed, stored, and queried")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output the full structured response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `alex fetch`.
#[derive(Args, Debug, Clone)]
pub struct FetchCommand {
    /// Topic to fetch (served from the store when cached)
    pub topic: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `alex sections`.
#[derive(Args, Debug, Clone)]
pub struct SectionsCommand {
    /// Topic whose sections to return
    pub topic: String,

    /// Filter sections by a case-insensitive title substring
    #[arg(short = 'f', long)]
    pub filter: Option<String>,

    /// Maximum sections to return [default: 10]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `alex search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Term to search for
    pub term: String,

    /// Where to search: all, titles, summaries, sections [default: all]
    #[arg(long = "in", value_name = "SCOPE", value_parser = parse_scope)]
    pub scope: Option<SearchScope>,

    /// Maximum documents to return [default: 10]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `alex ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Maximum documents to list [default: 10]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `alex stats`.
#[derive(Args, Debug, Clone)]
pub struct StatsCommand {
    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `alex add`.
#[derive(Args, Debug, Clone)]
pub struct AddCommand {
    /// Markdown file to parse and store
    pub file: PathBuf,

    /// How to resolve duplicates: skip, add, update, overwrite
    /// (prompts interactively when omitted)
    #[arg(long = "on-duplicate", value_name = "MODE", value_parser = parse_mode)]
    pub on_duplicate: Option<UpsertMode>,
}

/// Arguments for `alex init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.alex.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `alex` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a full article, from the store or from Wikipedia
    Fetch(FetchCommand),

    /// Show an article's sections, optionally filtered by title
    Sections(SectionsCommand),

    /// Search stored content for a term
    Search(SearchCommand),

    /// List stored documents
    Ls(LsCommand),

    /// Show collection statistics
    Stats(StatsCommand),

    /// Parse a markdown file and store it
    Add(AddCommand),

    /// Create an .alex.toml configuration file
    Init(InitCommand),
}
