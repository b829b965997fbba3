use std::io::{self, Write};

use crate::core::collect::name_length;
use crate::core::layout::SPACING;
use crate::core::style::Palette;
use crate::models::{AttributeSet, EntryAttributes, LayoutPlan};

const ONE_LINE_SEPARATOR: &str = "  ";
const MODE_WIDTH: usize = 11;
const DATE_WIDTH: usize = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplayMode {
    Long,
    SingleColumn,
    OneLine,
    TopToBottom,
}

impl DisplayMode {
    pub fn select(long_mode: bool, single_column: bool, fits_one_line: bool) -> Self {
        if long_mode {
            DisplayMode::Long
        } else if single_column {
            DisplayMode::SingleColumn
        } else if fits_one_line {
            DisplayMode::OneLine
        } else {
            DisplayMode::TopToBottom
        }
    }
}

pub struct RenderOptions {
    pub mode: DisplayMode,
    pub reversed: bool,
    pub terminal_width: usize,
    pub palette: Palette,
}

pub fn write_listing<W: Write>(
    writer: &mut W,
    attributes: &AttributeSet,
    options: &RenderOptions,
) -> io::Result<()> {
    let palette = &options.palette;
    match options.mode {
        DisplayMode::Long => write_long(writer, attributes, options.reversed, palette),
        DisplayMode::SingleColumn => {
            write_single_column(writer, &attributes.entries, options.reversed, palette)
        }
        DisplayMode::OneLine => {
            write_one_line(writer, &attributes.entries, options.reversed, palette)
        }
        DisplayMode::TopToBottom => {
            let plan = LayoutPlan::compute(
                attributes.len(),
                attributes.stats.max_name_length,
                options.terminal_width,
            );
            tracing::debug!(
                columns = plan.columns,
                rows = plan.rows,
                last_row_count = plan.last_row_count,
                "planned top-to-bottom layout"
            );
            write_top_to_bottom(writer, attributes, &plan, options.reversed, palette)
        }
    }
}

/// Iterates forward, or backward when `reversed`.
fn ordered(
    entries: &[EntryAttributes],
    reversed: bool,
) -> Box<dyn Iterator<Item = &EntryAttributes> + '_> {
    if reversed {
        Box::new(entries.iter().rev())
    } else {
        Box::new(entries.iter())
    }
}

pub fn write_one_line<W: Write>(
    writer: &mut W,
    entries: &[EntryAttributes],
    reversed: bool,
    palette: &Palette,
) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    for entry in ordered(entries, reversed) {
        writer.write_all(entry.label.as_bytes())?;
        writer.write_all(ONE_LINE_SEPARATOR.as_bytes())?;
    }
    writeln!(writer, "{}", palette.reset())
}

pub fn write_single_column<W: Write>(
    writer: &mut W,
    entries: &[EntryAttributes],
    reversed: bool,
    palette: &Palette,
) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    for entry in ordered(entries, reversed) {
        writeln!(writer, "{}", entry.label)?;
    }
    writer.write_all(palette.reset().as_bytes())
}

pub fn write_long<W: Write>(
    writer: &mut W,
    attributes: &AttributeSet,
    reversed: bool,
    palette: &Palette,
) -> io::Result<()> {
    let owner_width = attributes.stats.max_owner_group_length;
    let size_width = attributes.stats.max_size_length;
    let reset = palette.reset();

    writeln!(writer, "total: {}", attributes.len())?;
    for entry in ordered(&attributes.entries, reversed) {
        let Some(long) = entry.long.as_ref() else {
            continue;
        };
        let mut name = entry.label.clone();
        if let Some(target) = long.link_label.as_ref() {
            name.push_str(reset);
            name.push_str(" -> ");
            name.push_str(target);
        }
        writeln!(
            writer,
            "{:>mode_w$} {} {} {:>size_width$} {:>date_w$} {name}{reset}",
            long.mode_string,
            left_aligned(&long.owner, owner_width),
            left_aligned(&long.group, owner_width),
            long.size,
            long.date,
            mode_w = MODE_WIDTH,
            date_w = DATE_WIDTH,
        )?;
    }
    Ok(())
}

pub fn write_top_to_bottom<W: Write>(
    writer: &mut W,
    attributes: &AttributeSet,
    plan: &LayoutPlan,
    reversed: bool,
    palette: &Palette,
) -> io::Result<()> {
    if attributes.is_empty() {
        return Ok(());
    }
    let max_name_length = attributes.stats.max_name_length;
    let cells: Vec<String> = attributes
        .entries
        .iter()
        .map(|entry| padded(entry, max_name_length))
        .collect();

    let mut grid = GridWriter::new(writer, plan.columns);
    if reversed {
        let full = plan.full_row_cells();
        for &index in plan.print_order[..full].iter().rev() {
            grid.cell(&cells[index])?;
        }
        for &index in plan.print_order[full..].iter().rev() {
            grid.writer.write_all(cells[index].as_bytes())?;
        }
    } else {
        for &index in &plan.print_order {
            grid.cell(&cells[index])?;
        }
    }

    if plan.last_row_count == 0 {
        grid.writer.write_all(palette.reset().as_bytes())
    } else {
        writeln!(grid.writer, "{}", palette.reset())
    }
}

/// Pads by display columns; `{:<w$}` would count chars.
fn left_aligned(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(name_length(text));
    format!("{text}{}", " ".repeat(padding))
}

fn padded(entry: &EntryAttributes, max_name_length: usize) -> String {
    let padding = max_name_length - entry.name_length + SPACING;
    format!("{}{}", entry.label, " ".repeat(padding))
}

/// Breaks the line after every `columns` cells.
struct GridWriter<'a, W: Write> {
    writer: &'a mut W,
    columns: usize,
    column: usize,
}

impl<'a, W: Write> GridWriter<'a, W> {
    fn new(writer: &'a mut W, columns: usize) -> Self {
        Self {
            writer,
            columns,
            column: 0,
        }
    }

    fn cell(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.column += 1;
        if self.column == self.columns {
            self.writer.write_all(b"\n")?;
            self.column = 0;
        }
        Ok(())
    }
}
