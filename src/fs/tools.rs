use std::collections::BTreeMap;

use crate::fs::{FsError, Path};
use crate::path::PathLike;

const TAB: &str = "    ";

/// A file tree description for [`build_tree`]: file content, or a directory of named entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(String),
    Dir(BTreeMap<String, Node>),
}

impl Node {
    /// A directory from `(name, node)` pairs. Anything that converts into a `Node` works as a
    /// node, so string content can be given directly.
    ///
    /// # Examples
    /// ```
    /// # use unipath::fs::Node;
    /// let tree = Node::dir([
    ///     ("a_file", Node::from("Nothing important.")),
    ///     ("swedish", Node::dir([("chef", Node::from("bork!"))])),
    /// ]);
    /// ```
    pub fn dir<I, K, N>(entries: I) -> Node
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<Node>,
    {
        Node::Dir(entries.into_iter().map(|(name, node)| (name.into(), node.into())).collect())
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::File(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::File(value)
    }
}

/// Creates `tree` at `path`, including any missing ancestors. Existing directories are reused and
/// existing files are overwritten.
///
/// # Errors
/// Fails with [`SecurityError`](crate::path::SecurityError) for an entry name that isn't a plain
/// child name, or with the host's error.
pub fn build_tree(path: &Path, tree: &Node) -> Result<(), FsError> {
    match tree {
        Node::File(content) => {
            let parent = path.parent();
            if !parent.isdir() {
                parent.mkdir(true)?;
            }
            path.write_file(content)
        },
        Node::Dir(entries) => {
            path.mkdir(true)?;
            for (name, node) in entries {
                build_tree(&path.child([name])?, node)?;
            }
            Ok(())
        },
    }
}

/// Renders `path` and everything below it as an indented listing. Directories end in `:` and
/// their entries are indented below them, files show their size and symlinks their content.
///
/// ```text
/// images:
///     image1.gif  (0)
///     link -> ../a_file
/// ```
pub fn dump_path(path: &Path) -> Result<String, FsError> {
    let mut out = String::new();
    dump_into(path, "", &mut out)?;
    Ok(out)
}

fn dump_into(path: &Path, prefix: &str, out: &mut String) -> Result<(), FsError> {
    let meta = path.lstat()?;
    let name = match path.name() {
        "" => path.as_str(),
        name => name,
    };

    if meta.file_type.is_symlink() {
        out.push_str(&format!("{prefix}{name} -> {}\n", path.read_link(false)?));
    } else if meta.file_type.is_directory() {
        out.push_str(&format!("{prefix}{name}:\n"));
        let prefix = format!("{prefix}{TAB}");
        for child in path.listdir(None, Default::default())? {
            dump_into(&child, &prefix, out)?;
        }
    } else {
        out.push_str(&format!("{prefix}{name}  ({})\n", meta.size));
    }
    Ok(())
}
