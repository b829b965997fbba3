pub mod collect;
pub mod format;
pub mod layout;
pub mod render;
pub mod scan;
pub mod style;
