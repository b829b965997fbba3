/// Display attributes that only long mode needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LongAttributes {
    pub mode_string: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub date: String,
    /// Colorized symlink target, or the broken-link placeholder.
    pub link_label: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryAttributes {
    pub name_length: usize,
    pub label: String,
    pub long: Option<LongAttributes>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DisplayStats {
    pub max_name_length: usize,
    pub max_owner_group_length: usize,
    pub max_size_length: usize,
    /// Projected one-line width, summed up to the first entry past the terminal width.
    pub total_line_length: usize,
    pub fits_one_line: bool,
}

/// One record per scanned entry, in scan order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttributeSet {
    pub entries: Vec<EntryAttributes>,
    pub stats: DisplayStats,
}

impl AttributeSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
