use std::collections::HashSet;
use std::iter::FusedIterator;

use derive_more::IsVariant;
use glob::Pattern;
use tracing::trace;

use crate::fs::syscall;
use crate::fs::{Filter, FsError, HostIOError, Path};
use crate::path::{PathLike, UsageError};

/// Options for listing a directory, the general form of [`Path::listdir`] and
/// [`Path::listdir_names`].
///
/// # Examples
/// ```no_run
/// # use unipath::fs::{Filter, ListOptions, Path};
/// # fn main() -> Result<(), unipath::fs::FsError> {
/// let listing = ListOptions::new().pattern("*.jpg")?.filter(Filter::Files).list(&Path::new("images"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pattern: Option<Pattern>,
    filter: Option<Filter>,
    names_only: bool,
}

/// The result of [`ListOptions::list`], names or paths depending on `names_only`.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Listing {
    Names(Vec<String>),
    Paths(Vec<Path>),
}

impl ListOptions {
    pub const fn new() -> ListOptions {
        ListOptions {
            pattern: None,
            filter: None,
            names_only: false,
        }
    }

    /// Keeps only names matching a shell-style pattern (`*`, `?`, `[...]`). A leading dot isn't
    /// special.
    ///
    /// # Errors
    /// Fails with [`UsageError`] if the pattern doesn't parse.
    pub fn pattern(&mut self, pattern: &str) -> Result<&mut Self, UsageError> {
        self.pattern = Some(compile(pattern)?);
        Ok(self)
    }

    pub const fn filter(&mut self, filter: Filter) -> &mut Self {
        self.filter = Some(filter);
        self
    }

    pub const fn names_only(&mut self, names_only: bool) -> &mut Self {
        self.names_only = names_only;
        self
    }

    /// Lists the direct children of `dir`, sorted by name. An empty `dir` lists the current
    /// directory, and the returned paths are then bare names.
    ///
    /// # Errors
    /// Fails with [`UsageError`] if both a filter and `names_only` are set, and with the host's
    /// error if the directory can't be read.
    pub fn list(&self, dir: &Path) -> Result<Listing, FsError> {
        if self.names_only && self.filter.is_some() {
            Err(UsageError::new("a filter can't be applied when listing names only"))?
        }

        let names = dir.sorted_names(self.pattern.as_ref())?;
        if self.names_only {
            return Ok(Listing::Names(names));
        }

        let filter = self.filter.unwrap_or_default();
        let mut paths = Vec::with_capacity(names.len());
        for name in names {
            let path = dir.child([name])?;
            if filter.matches(&path) {
                paths.push(path);
            }
        }
        Ok(Listing::Paths(paths))
    }
}

fn compile(pattern: &str) -> Result<Pattern, UsageError> {
    Pattern::new(pattern).map_err(|err| UsageError::new(format!("invalid pattern {pattern:?}: {err}")))
}

fn compile_opt(pattern: Option<&str>) -> Result<Option<Pattern>, UsageError> {
    pattern.map(compile).transpose()
}

impl Path {
    /// Lists the children of this directory as paths, sorted by name and kept if they match both
    /// `pattern` and `filter`.
    pub fn listdir(&self, pattern: Option<&str>, filter: Filter) -> Result<Vec<Path>, FsError> {
        let mut options = ListOptions::new();
        options.filter(filter);
        if let Some(pattern) = pattern {
            options.pattern(pattern)?;
        }
        match options.list(self)? {
            Listing::Paths(paths) => Ok(paths),
            Listing::Names(names) => Ok(names.into_iter().map(Path::from).collect()),
        }
    }

    /// Lists the names of the children of this directory, sorted.
    pub fn listdir_names(&self, pattern: Option<&str>) -> Result<Vec<String>, FsError> {
        self.sorted_names(compile_opt(pattern)?.as_ref())
    }

    fn sorted_names(&self, pattern: Option<&Pattern>) -> Result<Vec<String>, FsError> {
        let dir = if self.is_empty() { Path::cur_dir() } else { self.clone() };
        let raw = syscall::read_dir(&dir.c_path()?).map_err(|errno| self.host_err(errno))?;

        let mut names = Vec::with_capacity(raw.len());
        for name in raw {
            let name = String::from_utf8(name).map_err(|_| HostIOError {
                path: self.inner.clone(),
                errno: libc::EILSEQ,
            })?;
            if pattern.is_none_or(|pattern| pattern.matches(&name)) {
                names.push(name);
            }
        }
        names.sort_unstable();
        Ok(names)
    }

    /// Walks everything below this directory, depth first, in the same sorted order as
    /// [`listdir`](Path::listdir) at every level.
    ///
    /// With `top_down` a directory comes before its contents, otherwise after. `pattern` and
    /// `filter` only decide what is yielded: every subdirectory is descended into, including
    /// symlinked ones, but a directory that resolves to one already visited is skipped, so link
    /// cycles end.
    ///
    /// The walk is lazy and each call starts a fresh one. A subdirectory that can't be listed
    /// yields an `Err` and the walk carries on with its siblings.
    ///
    /// # Errors
    /// Fails up front with `ENOTDIR` if this path isn't a directory, and with [`UsageError`] for
    /// an invalid pattern.
    pub fn walk(&self, pattern: Option<&str>, filter: Filter, top_down: bool) -> Result<Walk, FsError> {
        let pattern = compile_opt(pattern)?;
        if !self.isdir() {
            Err(self.host_err(libc::ENOTDIR))?
        }
        Ok(Walk {
            pattern,
            filter,
            top_down,
            stack: vec![Step::Descend(self.clone())],
            seen: HashSet::new(),
        })
    }
}

#[derive(Debug)]
enum Step {
    Descend(Path),
    Yield(Path),
}

/// A lazy, depth-first traversal, see [`Path::walk`].
#[derive(Debug)]
pub struct Walk {
    pattern: Option<Pattern>,
    filter: Filter,
    top_down: bool,
    stack: Vec<Step>,
    seen: HashSet<Path>,
}

impl Walk {
    fn wanted(&self, path: &Path) -> bool {
        self.pattern.as_ref().is_none_or(|pattern| pattern.matches(path.name())) && self.filter.matches(path)
    }

    /// Lists `dir` and schedules its children, unless it was already visited.
    fn descend(&mut self, dir: Path) -> Result<(), FsError> {
        let real = dir.resolve()?;
        if !self.seen.insert(real) {
            trace!(path = %dir, "skipping directory already walked");
            return Ok(());
        }

        let children = dir.listdir(None, Filter::All)?;
        // Pushed in reverse, so the first child is handled first.
        for child in children.into_iter().rev() {
            let is_dir = child.isdir();
            if self.top_down {
                if is_dir {
                    self.stack.push(Step::Descend(child.clone()));
                }
                self.stack.push(Step::Yield(child));
            } else {
                self.stack.push(Step::Yield(child.clone()));
                if is_dir {
                    self.stack.push(Step::Descend(child));
                }
            }
        }
        Ok(())
    }
}

impl Iterator for Walk {
    type Item = Result<Path, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Step::Descend(dir) => {
                    if let Err(err) = self.descend(dir) {
                        return Some(Err(err));
                    }
                },
                Step::Yield(path) => {
                    if self.wanted(&path) {
                        return Some(Ok(path));
                    }
                },
            }
        }
    }
}

impl FusedIterator for Walk {}
