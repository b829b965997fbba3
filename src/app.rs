use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Local};

use crate::config::ListOptions;
use crate::core::collect::{CollectOptions, collect_attributes};
use crate::core::render::{DisplayMode, RenderOptions, write_listing};
use crate::core::scan::scan;
use crate::core::style::Palette;
use crate::fs::FileSystem;
use crate::identity::{GROUP_PATH, IdentityDb, PASSWD_PATH};
use crate::models::FsEntry;

/// Scans, collects and renders one listing into `writer`.
pub async fn run<F: FileSystem, W: Write>(
    fs: &F,
    options: &ListOptions,
    writer: &mut W,
) -> anyhow::Result<()> {
    let entries = scan(fs, &options.path, options).await?;
    let identities = if options.needs_identities() {
        IdentityDb::load(Path::new(PASSWD_PATH), Path::new(GROUP_PATH), &entries).await?
    } else {
        IdentityDb::default()
    };
    write_entries(entries, options, identities, Local::now().year(), writer).await
}

/// Like [`run`], with fixed identities and year.
pub async fn run_with_identities<F: FileSystem, W: Write>(
    fs: &F,
    options: &ListOptions,
    identities: IdentityDb,
    current_year: i32,
    writer: &mut W,
) -> anyhow::Result<()> {
    let entries = scan(fs, &options.path, options).await?;
    write_entries(entries, options, identities, current_year, writer).await
}

async fn write_entries<W: Write>(
    entries: Vec<FsEntry>,
    options: &ListOptions,
    identities: IdentityDb,
    current_year: i32,
    writer: &mut W,
) -> anyhow::Result<()> {
    let entries: Arc<[FsEntry]> = entries.into();

    let terminal_width = options.terminal_width();
    let palette = Palette::new(options.color_enabled());
    let collect_options = CollectOptions {
        long_mode: options.long_mode,
        numeric_ids: options.numeric_ids,
        terminal_width,
        current_year,
        palette,
    };
    let attributes = collect_attributes(entries, Arc::new(identities), &collect_options).await?;

    let mode = DisplayMode::select(
        options.long_mode,
        options.single_column,
        attributes.stats.fits_one_line,
    );
    tracing::debug!(?mode, terminal_width, "rendering listing");

    let render_options = RenderOptions {
        mode,
        reversed: options.reversed,
        terminal_width,
        palette,
    };
    write_listing(writer, &attributes, &render_options).context("failed to write listing")?;
    writer.flush().context("failed to write listing")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListError;
    use crate::fs::{MockFileSystem, entry};
    use crate::models::{EntryKind, LinkTarget};

    fn listing_fs() -> MockFileSystem {
        let fs = MockFileSystem::default();
        let mut tool = entry("tool", EntryKind::File);
        tool.mode = 0o100755;
        tool.uid = 1000;
        tool.size = 12345;
        let mut dangling = entry("dangling", EntryKind::Symlink);
        dangling.link_target = Some(LinkTarget::Broken);
        dangling.uid = 77;
        fs.set_dir_entries(
            "/work",
            vec![
                entry("src", EntryKind::Directory),
                tool,
                dangling,
                entry(".git", EntryKind::Directory),
            ],
        );
        fs
    }

    fn options(width: usize) -> ListOptions {
        ListOptions {
            path: "/work".into(),
            width: Some(width),
            ..ListOptions::default()
        }
    }

    async fn render(options: &ListOptions) -> String {
        let identities = IdentityDb::from_names([(1000, "dev")], Vec::<(u32, &str)>::new());
        let mut out = Vec::new();
        run_with_identities(&listing_fs(), options, identities, 1970, &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn wide_terminal_lists_on_one_line() {
        assert_eq!(render(&options(80)).await, "dangling  src  tool  \n");
    }

    #[tokio::test]
    async fn narrow_terminal_switches_to_columns() {
        // 18 / (8 + 1) = 2 columns, 2 rows.
        assert_eq!(
            render(&options(18)).await,
            "dangling tool     \nsrc      \n"
        );
    }

    #[tokio::test]
    async fn single_column_wins_over_one_line() {
        let options = ListOptions {
            single_column: true,
            reversed: true,
            ..options(80)
        };
        assert_eq!(render(&options).await, "tool\nsrc\ndangling\n");
    }

    #[tokio::test]
    async fn long_listing_uses_names_and_numeric_fallback() {
        let options = ListOptions {
            long_mode: true,
            ..options(80)
        };
        let out = render(&options).await;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "total: 3");
        assert!(lines[1].starts_with(" lrwxrwxrwx 77  0       0 "));
        assert!(lines[1].ends_with(" dangling -> broken link"));
        assert!(lines[2].starts_with(" drwxr-xr-x 0   0       0 "));
        assert!(lines[3].starts_with(" -rwxr-xr-x dev 0   12345 "));
        assert!(lines[3].ends_with(" tool"));
    }

    #[tokio::test]
    async fn missing_path_fails_before_writing() {
        let options = ListOptions {
            path: "/missing".into(),
            ..options(80)
        };
        let mut out = Vec::new();
        let err = run_with_identities(
            &listing_fs(),
            &options,
            IdentityDb::default(),
            2026,
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ListError>(),
            Some(ListError::Inaccessible { .. })
        ));
        assert!(out.is_empty());
    }
}
