//! Creating, removing, renaming and copying, including the recursive forms. The recursive
//! operations absorb the conditions they exist to paper over (already there, already gone) and
//! propagate everything else.

use tracing::debug;

use crate::fs::fd::{CopyError, Fd};
use crate::fs::syscall::{self, Errno};
use crate::fs::{Filter, FsError, Path};
use crate::path::{PathLike, UsageError};

impl Path {
    /// Creates this directory. A directory already being there is success, anything else being
    /// there isn't. With `parents`, missing ancestors are created first.
    pub fn mkdir(&self, parents: bool) -> Result<(), FsError> {
        self.mkdir_mode(parents, 0o777)
    }

    /// [`mkdir`](Path::mkdir) with explicit permission bits, which the umask still applies to.
    pub fn mkdir_mode(&self, parents: bool, mode: u32) -> Result<(), FsError> {
        if self.isdir() {
            debug!(path = %self, "directory already exists");
            return Ok(());
        }

        if parents {
            let parent = self.parent();
            if parent != *self && !parent.isdir() {
                parent.mkdir_mode(true, mode)?;
            }
        }

        match syscall::mkdir(&self.c_path()?, mode) {
            Ok(()) => Ok(()),
            // Created by someone else in the meantime.
            Err(libc::EEXIST) if self.isdir() => Ok(()),
            Err(errno) => Err(self.host_err(errno)),
        }
    }

    /// Removes this empty directory. Nothing being there is success. With `parents`, empty
    /// ancestors are then pruned as by [`prune_ancestors`](Path::prune_ancestors).
    pub fn rmdir(&self, parents: bool) -> Result<(), FsError> {
        if !self.lexists() {
            debug!(path = %self, "directory already absent");
        } else {
            syscall::rmdir(&self.c_path()?).map_err(|errno| self.host_err(errno))?;
        }

        if parents {
            self.prune_ancestors();
        }
        Ok(())
    }

    /// Removes ancestor directories from the nearest upwards, stopping silently at the first one
    /// that can't be removed, usually because it isn't empty. Returns how many were removed.
    pub fn prune_ancestors(&self) -> usize {
        let mut removed = 0;
        for ancestor in self.ancestors() {
            let Ok(path) = ancestor.c_path() else {
                break;
            };
            if let Err(errno) = syscall::rmdir(&path) {
                debug!(path = %ancestor, errno, "stopped pruning ancestors");
                break;
            }
            removed += 1;
        }
        removed
    }

    /// Renames this path to `dst` in one atomic step. With `parents`, missing ancestors of `dst`
    /// are created first and emptied ancestors of this path are pruned afterwards.
    pub fn rename(&self, dst: &Path, parents: bool) -> Result<(), FsError> {
        if parents {
            dst.parent().mkdir(true)?;
        }

        syscall::rename(&self.c_path()?, &dst.c_path()?).map_err(|errno| self.host_err(errno))?;

        if parents {
            self.prune_ancestors();
        }
        Ok(())
    }

    /// Removes this path whatever it is, recursively for a directory. Symlinks are removed, never
    /// followed. Nothing being there is success. With `parents`, emptied ancestors are pruned.
    pub fn rmtree(&self, parents: bool) -> Result<(), FsError> {
        match self.lstat() {
            Ok(meta) if meta.file_type.is_directory() => {
                self.remove_contents()?;
                absorb_missing(self, syscall::rmdir(&self.c_path()?))?;
            },
            Ok(_) => absorb_missing(self, syscall::unlink(&self.c_path()?))?,
            Err(FsError::NotFound(_)) => debug!(path = %self, "tree already absent"),
            Err(err) => Err(err)?,
        }

        if parents {
            self.prune_ancestors();
        }
        Ok(())
    }

    fn remove_contents(&self) -> Result<(), FsError> {
        for child in self.listdir(None, Filter::All)? {
            match child.lstat() {
                Ok(meta) if meta.file_type.is_directory() => {
                    child.remove_contents()?;
                    absorb_missing(&child, syscall::rmdir(&child.c_path()?))?;
                },
                Ok(_) => absorb_missing(&child, syscall::unlink(&child.c_path()?))?,
                // Removed concurrently.
                Err(FsError::NotFound(_)) => (),
                Err(err) => Err(err)?,
            }
        }
        Ok(())
    }

    /// Copies the content of this file to `dst`, replacing it. With `times` or `perms` the
    /// corresponding metadata follows, as by [`copy_stat_with`](Path::copy_stat_with).
    ///
    /// # Errors
    /// Fails with [`UsageError`] when `dst` is this same file, which would otherwise be truncated
    /// before it is read.
    pub fn copy(&self, dst: &Path, times: bool, perms: bool) -> Result<(), FsError> {
        let src_meta = self.stat()?;
        match dst.stat() {
            Ok(dst_meta) if src_meta.same_object(&dst_meta) => {
                Err(UsageError::new(format!("{self} and {dst} are the same file")))?
            },
            // Anything else wrong with dst is reported by the open below.
            _ => (),
        }

        let src_fd = Fd::open(&self.c_path()?, libc::O_RDONLY, 0).map_err(|errno| self.host_err(errno))?;
        let flags = libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC;
        let dst_fd = Fd::open(&dst.c_path()?, flags, 0o666).map_err(|errno| dst.host_err(errno))?;

        src_fd.copy_to(&dst_fd).map_err(|err| match err {
            CopyError::Read(errno) => self.host_err(errno),
            CopyError::Write(errno) => dst.host_err(errno),
        })?;
        dst_fd.close().map_err(|errno| dst.host_err(errno))?;

        if times || perms {
            self.copy_stat_with(dst, times, perms)?;
        }
        Ok(())
    }

    /// Copies access and modification times and permission bits, but no content, to `dst`.
    ///
    /// Unlike [`copy`](Path::copy), which copies no metadata unless asked, this copies both.
    pub fn copy_stat(&self, dst: &Path) -> Result<(), FsError> {
        self.copy_stat_with(dst, true, true)
    }

    /// [`copy_stat`](Path::copy_stat) limited to times, permissions, or neither.
    pub fn copy_stat_with(&self, dst: &Path, times: bool, perms: bool) -> Result<(), FsError> {
        let meta = self.stat()?;
        let path = dst.c_path()?;
        if times {
            syscall::utimens(&path, meta.accessed.to_timespec(), meta.modified.to_timespec())
                .map_err(|errno| dst.host_err(errno))?;
        }
        if perms {
            syscall::chmod(&path, meta.permissions()).map_err(|errno| dst.host_err(errno))?;
        }
        Ok(())
    }

    /// Copies this path to `dst`, recursively for a directory. With `preserve_symlinks`, symlinks
    /// are recreated with the same content, otherwise what they point to is copied.
    pub fn copy_tree(&self, dst: &Path, preserve_symlinks: bool, times: bool, perms: bool) -> Result<(), FsError> {
        let meta = if preserve_symlinks { self.lstat()? } else { self.stat()? };

        if meta.file_type.is_symlink() {
            dst.write_link(self.read_link(false)?)
        } else if meta.file_type.is_directory() {
            dst.mkdir(false)?;
            for name in self.listdir_names(None)? {
                self.child([&name])?.copy_tree(&dst.child([&name])?, preserve_symlinks, times, perms)?;
            }
            // Last, so that creating the children doesn't undo the times.
            if times || perms {
                self.copy_stat_with(dst, times, perms)?;
            }
            Ok(())
        } else {
            self.copy(dst, times, perms)
        }
    }

    /// Moves this path to `dst`. A rename is tried first. Across filesystems, where that can't
    /// work, the tree is copied with symlinks, times and permissions, then removed.
    pub fn move_to(&self, dst: &Path) -> Result<(), FsError> {
        match syscall::rename(&self.c_path()?, &dst.c_path()?) {
            Ok(()) => Ok(()),
            Err(libc::EXDEV) => {
                debug!(src = %self, dst = %dst, "rename crosses devices, copying instead");
                self.copy_tree(dst, true, true, true)?;
                self.rmtree(false)
            },
            Err(errno) => Err(self.host_err(errno)),
        }
    }

    /// True when this path needs rebuilding from `sources`: it doesn't exist, or some source is
    /// newer. Directories among the sources count through the files anywhere below them, not
    /// through their own times. Sources that don't exist are skipped.
    pub fn needs_update<S: Into<Sources>>(&self, sources: S) -> Result<bool, FsError> {
        if !self.exists() {
            return Ok(true);
        }
        let control = self.mtime()?;

        for source in sources.into().flatten() {
            if source.isdir() {
                for file in source.walk(None, Filter::Files, true)? {
                    if file?.mtime()? > control {
                        return Ok(true);
                    }
                }
                continue;
            }

            match source.mtime() {
                Ok(modified) if modified > control => return Ok(true),
                Ok(_) => (),
                Err(FsError::NotFound(_)) => debug!(path = %source, "skipping missing source"),
                Err(err) => Err(err)?,
            }
        }
        Ok(false)
    }
}

fn absorb_missing(path: &Path, result: Result<(), Errno>) -> Result<(), FsError> {
    match result {
        Err(libc::ENOENT) => {
            debug!(path = %path, "already removed");
            Ok(())
        },
        other => other.map_err(|errno| path.host_err(errno)),
    }
}

/// The sources for [`Path::needs_update`]: one path, or a list of them, possibly nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sources {
    One(Path),
    Many(Vec<Sources>),
}

impl Sources {
    /// Every path, depth first, in order.
    pub fn flatten(self) -> Vec<Path> {
        let mut paths = Vec::new();
        let mut stack = vec![self];
        while let Some(sources) = stack.pop() {
            match sources {
                Sources::One(path) => paths.push(path),
                Sources::Many(list) => stack.extend(list.into_iter().rev()),
            }
        }
        paths
    }
}

impl From<Path> for Sources {
    fn from(value: Path) -> Self {
        Sources::One(value)
    }
}

impl From<&Path> for Sources {
    fn from(value: &Path) -> Self {
        Sources::One(value.clone())
    }
}

impl From<&str> for Sources {
    fn from(value: &str) -> Self {
        Sources::One(Path::from(value))
    }
}

impl From<String> for Sources {
    fn from(value: String) -> Self {
        Sources::One(Path::from(value))
    }
}

impl From<&[Path]> for Sources {
    fn from(value: &[Path]) -> Self {
        Sources::Many(value.iter().map(Sources::from).collect())
    }
}

impl<T: Into<Sources>> From<Vec<T>> for Sources {
    fn from(value: Vec<T>) -> Self {
        Sources::Many(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Sources>, const N: usize> From<[T; N]> for Sources {
    fn from(value: [T; N]) -> Self {
        Sources::Many(value.into_iter().map(Into::into).collect())
    }
}
