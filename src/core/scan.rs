use std::collections::HashSet;
use std::path::Path;

use regex::RegexSet;

use crate::config::ListOptions;
use crate::error::ListError;
use crate::fs::FileSystem;
use crate::models::{EntryKind, FsEntry, LinkTarget};

/// Pre-compiled `-I` patterns. Literal names skip the regex engine.
#[derive(Debug, Default)]
pub struct IgnorePatterns {
    exact_matches: HashSet<String>,
    regex_set: Option<RegexSet>,
}

impl IgnorePatterns {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ListError> {
        let mut exact_matches = HashSet::new();
        let mut regexes = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            if pattern.contains('*') || pattern.contains('?') {
                regexes.push(glob_to_regex(pattern));
            } else {
                exact_matches.insert(pattern.to_owned());
            }
        }

        let regex_set = if regexes.is_empty() {
            None
        } else {
            Some(
                RegexSet::new(&regexes).map_err(|source| ListError::InvalidPattern {
                    pattern: patterns
                        .iter()
                        .map(|p| p.as_ref())
                        .collect::<Vec<&str>>()
                        .join(" "),
                    source,
                })?,
            )
        };

        Ok(Self {
            exact_matches,
            regex_set,
        })
    }

    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        if self.exact_matches.contains(name) {
            return true;
        }
        self.regex_set
            .as_ref()
            .is_some_and(|regex_set| regex_set.is_match(name))
    }
}

/// `*` matches any run of characters, `?` exactly one.
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '\\' | '|' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
    }
    regex.push('$');
    regex
}

fn is_listable_dir(root: &FsEntry) -> bool {
    match (root.kind, &root.link_target) {
        (EntryKind::Directory, _) => true,
        (
            EntryKind::Symlink,
            Some(LinkTarget::Resolved {
                kind: EntryKind::Directory,
                ..
            }),
        ) => true,
        _ => false,
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Resolves `path` into the entries to list, sorted by name.
///
/// A directory, or a symlink resolving to one, yields its filtered contents.
/// With `directory_only`, or when `path` is not a directory, the result is
/// the single entry for `path`.
pub async fn scan<F: FileSystem>(
    fs: &F,
    path: &Path,
    options: &ListOptions,
) -> Result<Vec<FsEntry>, ListError> {
    let inaccessible = |err: anyhow::Error| ListError::Inaccessible {
        path: path.to_path_buf(),
        message: format!("{err:#}"),
    };

    let root = fs.stat(path).await.map_err(inaccessible)?;
    if options.directory_only || !is_listable_dir(&root) {
        return Ok(vec![root]);
    }

    let patterns = IgnorePatterns::new(options.ignore_patterns.as_slice())?;
    let mut entries: Vec<FsEntry> = fs
        .read_dir(path)
        .await
        .map_err(inaccessible)?
        .into_iter()
        .filter(|entry| options.show_hidden || !is_hidden(&entry.name))
        .filter(|entry| !patterns.matches(&entry.name))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(path = %path.display(), entries = entries.len(), "scanned directory");
    Ok(entries)
}
