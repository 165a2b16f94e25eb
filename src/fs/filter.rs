use std::fmt::{self, Debug, Formatter};

use crate::fs::Path;

/// A predicate over directory entries, used by [`Path::listdir`] and [`Path::walk`].
///
/// Every check goes to the host at the time the entry is tested, so an entry that changes between
/// listing and filtering is judged by its new state.
#[derive(Clone, Copy, Default)]
pub enum Filter {
    /// Every entry.
    #[default]
    All,
    /// Directories, including symlinks to directories.
    Dirs,
    /// Regular files, including symlinks to regular files.
    Files,
    /// Symlinks, whether or not their target exists.
    Links,
    FilesNoLinks,
    DirsNoLinks,
    /// Symlinks whose target doesn't exist.
    DeadLinks,
    Custom(fn(&Path) -> bool),
}

impl Filter {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Filter::All => true,
            Filter::Dirs => path.isdir(),
            Filter::Files => path.isfile(),
            Filter::Links => path.islink(),
            Filter::FilesNoLinks => path.isfile() && !path.islink(),
            Filter::DirsNoLinks => path.isdir() && !path.islink(),
            Filter::DeadLinks => path.islink() && !path.exists(),
            Filter::Custom(predicate) => predicate(path),
        }
    }
}

impl Debug for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "All"),
            Filter::Dirs => write!(f, "Dirs"),
            Filter::Files => write!(f, "Files"),
            Filter::Links => write!(f, "Links"),
            Filter::FilesNoLinks => write!(f, "FilesNoLinks"),
            Filter::DirsNoLinks => write!(f, "DirsNoLinks"),
            Filter::DeadLinks => write!(f, "DeadLinks"),
            Filter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
