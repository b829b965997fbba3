/// Column geometry and emission order for the top-to-bottom layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayoutPlan {
    pub columns: usize,
    pub rows: usize,
    pub last_row_count: usize,
    /// Entry indices in the order they are written, left to right, top to bottom.
    pub print_order: Vec<usize>,
}
