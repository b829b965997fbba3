mod attributes;
mod entry;
mod layout;

pub use attributes::{AttributeSet, DisplayStats, EntryAttributes, LongAttributes};
pub use entry::{EntryKind, FsEntry, LinkTarget, is_executable_mode};
pub use layout::LayoutPlan;
