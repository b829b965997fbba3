use std::io::IsTerminal;
use std::path::PathBuf;

use terminal_size::{Width, terminal_size};

use crate::cli::{Cli, ColorMode};

const COLUMNS_ENV: &str = "COLUMNS";

/// Width assumed when the terminal size is unknown; every listing fits on one line.
pub const FALLBACK_TERMINAL_WIDTH: usize = usize::MAX;

/// Settings for a single listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub path: PathBuf,
    /// Whether to list entries starting with '.'
    pub show_hidden: bool,
    /// List the target itself rather than its contents
    pub directory_only: bool,
    pub long_mode: bool,
    pub numeric_ids: bool,
    pub reversed: bool,
    pub single_column: bool,
    /// Shell globs (`*`, `?`) or literal names to leave out
    pub ignore_patterns: Vec<String>,
    pub color: ColorMode,
    /// Explicit width; `$COLUMNS` or the terminal is consulted when `None`
    pub width: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            show_hidden: false,
            directory_only: false,
            long_mode: false,
            numeric_ids: false,
            reversed: false,
            single_column: false,
            ignore_patterns: Vec::new(),
            color: ColorMode::Never,
            width: None,
        }
    }
}

impl From<Cli> for ListOptions {
    fn from(cli: Cli) -> Self {
        Self {
            path: cli.path.unwrap_or_else(|| PathBuf::from(".")),
            show_hidden: cli.all,
            directory_only: cli.directory,
            long_mode: cli.long,
            numeric_ids: cli.numeric_uid_gid,
            reversed: cli.reverse,
            single_column: cli.one_per_line,
            ignore_patterns: cli.ignore,
            color: cli.color,
            width: cli.width,
        }
    }
}

impl ListOptions {
    pub fn terminal_width(&self) -> usize {
        let explicit = self
            .width
            .filter(|&w| w > 0)
            .or_else(|| parse_columns(std::env::var(COLUMNS_ENV).ok().as_deref()));
        if let Some(width) = explicit {
            return width;
        }
        match terminal_size() {
            Some((Width(width), _)) if width > 0 => usize::from(width),
            _ => FALLBACK_TERMINAL_WIDTH,
        }
    }

    pub fn color_enabled(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    /// Identity names are looked up only for long listings with names.
    pub fn needs_identities(&self) -> bool {
        self.long_mode && !self.numeric_ids
    }
}

/// A `$COLUMNS` value that is not a positive integer is ignored.
fn parse_columns(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
}
