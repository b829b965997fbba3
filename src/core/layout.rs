use crate::models::LayoutPlan;

/// Blank cells between two columns.
pub const SPACING: usize = 1;

impl LayoutPlan {
    /// Plans a column-major grid for `entry_count` names of at most
    /// `max_name_length` columns each.
    pub fn compute(entry_count: usize, max_name_length: usize, terminal_width: usize) -> Self {
        let columns = (terminal_width / (max_name_length + SPACING)).max(1);
        // Leaves one surplus empty row when the count divides evenly.
        let rows = entry_count / columns + 1;
        let last_row_count = entry_count % columns;
        let print_order = top_to_bottom_order(columns, rows, last_row_count);

        Self {
            columns,
            rows,
            last_row_count,
            print_order,
        }
    }

    /// Entries on every row but the last.
    pub fn full_row_cells(&self) -> usize {
        (self.rows - 1) * self.columns
    }
}

/// Row-major walk over a column-major arrangement. The first `last_row_count`
/// columns are one row taller than the rest, so stepping right past them
/// moves `rows - 1` indices instead of `rows`.
fn top_to_bottom_order(columns: usize, rows: usize, last_row_count: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity((rows - 1) * columns + last_row_count);

    for row in 0..rows {
        let is_last_row = row + 1 == rows;
        let cells = if is_last_row { last_row_count } else { columns };
        let mut index = row;

        for column in 0..cells {
            order.push(index);
            index += if !is_last_row && column >= last_row_count {
                rows - 1
            } else {
                rows
            };
        }
    }

    order
}
