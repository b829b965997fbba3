use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "lsr", version)]
#[command(about = "List directory contents in columns", long_about = None)]
pub struct Cli {
    /// Path to list (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Include entries whose names start with '.'
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// List the directory itself, not its contents
    #[arg(short = 'd', long = "directory")]
    pub directory: bool,

    /// Use a long listing format
    #[arg(short = 'l')]
    pub long: bool,

    /// List numeric user and group ids instead of names
    #[arg(short = 'n', long = "numeric-uid-gid")]
    pub numeric_uid_gid: bool,

    /// Reverse the listing order
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// List one entry per line
    #[arg(short = '1')]
    pub one_per_line: bool,

    /// Do not list entries matching a shell pattern (repeatable)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// When to color entry names
    #[arg(long = "color", value_enum, default_value_t = ColorMode::Auto, value_name = "WHEN")]
    pub color: ColorMode,

    /// Terminal width in columns (falls back to $COLUMNS, then the terminal)
    #[arg(short = 'w', long = "width", value_name = "COLS")]
    pub width: Option<usize>,
}
