use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tokio::task;
use unicode_width::UnicodeWidthStr;

use crate::core::format::{format_date, mode_string};
use crate::core::style::Palette;
use crate::identity::IdentityDb;
use crate::models::{AttributeSet, DisplayStats, EntryAttributes, FsEntry, LongAttributes};

/// Spacing that the one-line layout puts after every name.
const ONE_LINE_SPACING: usize = 2;

#[derive(Clone, Debug)]
pub struct CollectOptions {
    pub long_mode: bool,
    pub numeric_ids: bool,
    pub terminal_width: usize,
    pub current_year: i32,
    pub palette: Palette,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OneLineFit {
    pub total_line_length: usize,
    pub fits: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColumnWidths {
    pub owner_group: usize,
    pub size: usize,
}

/// Per-entry long-mode lists, each aligned with the entry slice.
struct LongColumns {
    modes: Vec<String>,
    dates: Vec<String>,
    owners: Vec<String>,
    groups: Vec<String>,
    sizes: Vec<u64>,
    link_labels: Vec<Option<String>>,
    widths: ColumnWidths,
}

/// Computes every display attribute for `entries`, returning only once all
/// dispatched tasks have finished.
pub async fn collect_attributes(
    entries: Arc<[FsEntry]>,
    identities: Arc<IdentityDb>,
    options: &CollectOptions,
) -> anyhow::Result<AttributeSet> {
    let width = options.terminal_width;
    let palette = options.palette;

    let (name_lengths, max_name_length, fit, labels, long) = tokio::try_join!(
        on_blocking(&entries, name_lengths),
        on_blocking(&entries, max_name_length),
        on_blocking(&entries, move |entries| fits_one_line(entries, width)),
        on_blocking(&entries, move |entries| labels(entries, palette)),
        collect_long(&entries, identities, options),
    )?;

    let mut stats = DisplayStats {
        max_name_length,
        total_line_length: fit.total_line_length,
        fits_one_line: fit.fits,
        ..DisplayStats::default()
    };

    let records = match long {
        Some(columns) => {
            stats.max_owner_group_length = columns.widths.owner_group;
            stats.max_size_length = columns.widths.size;
            merge_long(name_lengths, labels, columns)
        }
        None => name_lengths
            .into_iter()
            .zip(labels)
            .map(|(name_length, label)| EntryAttributes {
                name_length,
                label,
                long: None,
            })
            .collect(),
    };

    tracing::debug!(entries = records.len(), ?stats, "collected attributes");
    Ok(AttributeSet {
        entries: records,
        stats,
    })
}

async fn collect_long(
    entries: &Arc<[FsEntry]>,
    identities: Arc<IdentityDb>,
    options: &CollectOptions,
) -> anyhow::Result<Option<LongColumns>> {
    if !options.long_mode {
        return Ok(None);
    }

    let numeric = options.numeric_ids;
    let current_year = options.current_year;
    let palette = options.palette;
    let user_db = identities;
    let group_db = Arc::clone(&user_db);

    let ownership = async {
        let (owners, groups, sizes) = tokio::try_join!(
            on_blocking(entries, move |entries| owners(entries, &user_db, numeric)),
            on_blocking(entries, move |entries| groups(entries, &group_db, numeric)),
            on_blocking(entries, sizes),
        )?;
        let (widths, owners, groups, sizes) = task::spawn_blocking(move || {
            let widths = column_widths(&owners, &groups, &sizes);
            (widths, owners, groups, sizes)
        })
        .await?;
        tracing::trace!(?widths, "column widths ready");
        anyhow::Ok((widths, owners, groups, sizes))
    };

    let (modes, dates, link_labels, (widths, owners, groups, sizes)) = tokio::try_join!(
        on_blocking(entries, mode_strings),
        on_blocking(entries, move |entries| dates(entries, current_year)),
        on_blocking(entries, move |entries| link_labels(entries, palette)),
        ownership,
    )?;

    Ok(Some(LongColumns {
        modes,
        dates,
        owners,
        groups,
        sizes,
        link_labels,
        widths,
    }))
}

/// Runs `work` over the shared entries on the blocking pool.
async fn on_blocking<T, F>(entries: &Arc<[FsEntry]>, work: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&[FsEntry]) -> T + Send + 'static,
{
    let entries = Arc::clone(entries);
    Ok(task::spawn_blocking(move || work(&entries)).await?)
}

fn merge_long(
    name_lengths: Vec<usize>,
    labels: Vec<String>,
    columns: LongColumns,
) -> Vec<EntryAttributes> {
    let LongColumns {
        modes,
        dates,
        owners,
        groups,
        sizes,
        link_labels,
        ..
    } = columns;

    let long = modes
        .into_iter()
        .zip(dates)
        .zip(owners.into_iter().zip(groups))
        .zip(sizes.into_iter().zip(link_labels))
        .map(
            |(((mode_string, date), (owner, group)), (size, link_label))| LongAttributes {
                mode_string,
                owner,
                group,
                size,
                date,
                link_label,
            },
        );

    name_lengths
        .into_iter()
        .zip(labels)
        .zip(long)
        .map(|((name_length, label), long)| EntryAttributes {
            name_length,
            label,
            long: Some(long),
        })
        .collect()
}

pub fn name_length(name: &str) -> usize {
    UnicodeWidthStr::width(name)
}

pub fn name_lengths(entries: &[FsEntry]) -> Vec<usize> {
    entries.iter().map(|entry| name_length(&entry.name)).collect()
}

pub fn max_name_length(entries: &[FsEntry]) -> usize {
    entries
        .iter()
        .map(|entry| name_length(&entry.name))
        .max()
        .unwrap_or(0)
}

/// Sums `name + 2` in order and stops at the first total wider than `terminal_width`.
pub fn fits_one_line(entries: &[FsEntry], terminal_width: usize) -> OneLineFit {
    let mut total_line_length = 0usize;
    for entry in entries {
        total_line_length =
            total_line_length.saturating_add(name_length(&entry.name) + ONE_LINE_SPACING);
        if total_line_length > terminal_width {
            return OneLineFit {
                total_line_length,
                fits: false,
            };
        }
    }
    OneLineFit {
        total_line_length,
        fits: true,
    }
}

fn labels(entries: &[FsEntry], palette: Palette) -> Vec<String> {
    entries.iter().map(|entry| palette.label(entry)).collect()
}

fn mode_strings(entries: &[FsEntry]) -> Vec<String> {
    entries.iter().map(|entry| mode_string(entry.mode)).collect()
}

fn dates(entries: &[FsEntry], current_year: i32) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format_date(&local_time(entry.modified), current_year))
        .collect()
}

fn local_time(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}

fn owners(entries: &[FsEntry], identities: &IdentityDb, numeric: bool) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            if numeric {
                entry.uid.to_string()
            } else {
                identities.owner(entry.uid)
            }
        })
        .collect()
}

fn groups(entries: &[FsEntry], identities: &IdentityDb, numeric: bool) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            if numeric {
                entry.gid.to_string()
            } else {
                identities.group(entry.gid)
            }
        })
        .collect()
}

fn sizes(entries: &[FsEntry]) -> Vec<u64> {
    entries.iter().map(|entry| entry.size).collect()
}

fn link_labels(entries: &[FsEntry], palette: Palette) -> Vec<Option<String>> {
    entries
        .iter()
        .map(|entry| {
            entry
                .link_target
                .as_ref()
                .map(|target| palette.link_label(target))
        })
        .collect()
}

/// Widest owner-or-group name and widest decimal size.
pub fn column_widths(owners: &[String], groups: &[String], sizes: &[u64]) -> ColumnWidths {
    let owner_group = owners
        .iter()
        .chain(groups)
        .map(|name| name_length(name))
        .max()
        .unwrap_or(0);
    let size = sizes
        .iter()
        .map(|size| size.to_string().len())
        .max()
        .unwrap_or(0);
    ColumnWidths { owner_group, size }
}
