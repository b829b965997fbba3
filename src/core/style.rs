use crate::models::{EntryKind, FsEntry, LinkTarget, is_executable_mode};

const CYAN_SYMLINK: &str = "\x1b[36;1m";
const BLUE_DIR: &str = "\x1b[34;1m";
const GREEN_EXECUTABLE: &str = "\x1b[32;1m";
const RESET: &str = "\x1b[0m";

pub const BROKEN_LINK: &str = "broken link";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Style {
    Symlink,
    Directory,
    Executable,
    Plain,
}

impl Style {
    pub fn classify(kind: EntryKind, executable: bool) -> Self {
        match kind {
            EntryKind::Symlink => Style::Symlink,
            EntryKind::Directory => Style::Directory,
            _ if executable => Style::Executable,
            _ => Style::Plain,
        }
    }

    pub fn of(entry: &FsEntry) -> Self {
        Self::classify(entry.kind, entry.is_executable())
    }
}

/// Maps styles to escape sequences; a disabled palette emits none.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn prefix(&self, style: Style) -> &'static str {
        if !self.enabled {
            return "";
        }
        match style {
            Style::Symlink => CYAN_SYMLINK,
            Style::Directory => BLUE_DIR,
            Style::Executable => GREEN_EXECUTABLE,
            Style::Plain => RESET,
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled { RESET } else { "" }
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        format!("{}{text}", self.prefix(style))
    }

    pub fn label(&self, entry: &FsEntry) -> String {
        self.paint(Style::of(entry), &entry.name)
    }

    /// Target half of a long-mode `name -> target` line.
    pub fn link_label(&self, target: &LinkTarget) -> String {
        match target {
            LinkTarget::Resolved { path, kind, mode } => {
                self.paint(Style::classify(*kind, is_executable_mode(*mode)), path)
            }
            LinkTarget::Broken => BROKEN_LINK.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry;

    #[test]
    fn classifies_by_kind_then_executable_bit() {
        let mut exe = entry("run.sh", EntryKind::File);
        exe.mode = 0o100755;
        assert_eq!(Style::of(&exe), Style::Executable);
        assert_eq!(Style::of(&entry("d", EntryKind::Directory)), Style::Directory);
        assert_eq!(Style::of(&entry("l", EntryKind::Symlink)), Style::Symlink);
        assert_eq!(Style::of(&entry("f", EntryKind::File)), Style::Plain);
    }

    #[test]
    fn labels_carry_the_style_prefix() {
        let palette = Palette::new(true);
        assert_eq!(
            palette.label(&entry("src", EntryKind::Directory)),
            "\x1b[34;1msrc"
        );
        assert_eq!(palette.label(&entry("a", EntryKind::File)), "\x1b[0ma");
        assert_eq!(Palette::plain().label(&entry("src", EntryKind::Directory)), "src");
    }

    #[test]
    fn broken_link_target_is_unstyled() {
        let palette = Palette::new(true);
        assert_eq!(palette.link_label(&LinkTarget::Broken), "broken link");
        let resolved = LinkTarget::Resolved {
            path: "bin".to_owned(),
            kind: EntryKind::Directory,
            mode: 0o040755,
        };
        assert_eq!(palette.link_label(&resolved), "\x1b[34;1mbin");
    }

    #[test]
    fn executable_link_target_is_green() {
        let palette = Palette::new(true);
        let script = LinkTarget::Resolved {
            path: "run.sh".to_owned(),
            kind: EntryKind::File,
            mode: 0o100750,
        };
        assert_eq!(palette.link_label(&script), "\x1b[32;1mrun.sh");
        assert_eq!(Style::classify(EntryKind::Directory, true), Style::Directory);
    }
}
