use std::ffi::CString;

use tracing::trace;

use crate::fs::fd::Fd;
use crate::fs::syscall::{self, Errno};
use crate::fs::{FileType, FsError, FsStats, HostIOError, Metadata, Timestamp};
use crate::path::{
    CUR_DIR, Native, PathInternals, PathLike, PathOptions, PurePath, Segment, UsageError, impl_str_interop,
};

/// A path on the host filesystem.
///
/// `Path` has all of the string algebra of [`PurePath`] through [`PathLike`], in the native
/// flavour, plus operations that consult or change the filesystem. The value is only a name: it
/// doesn't hold anything open and nothing it does invalidates it.
///
/// Existence and type predicates never fail, any stat error reads as `false`. Everything else
/// returns [`FsError`], with `ENOENT` reported as [`NotFoundError`](crate::fs::NotFoundError)
/// and every other host failure as [`HostIOError`] carrying the raw error code.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    pub(crate) inner: String,
}

impl Path {
    pub fn new<'a, S: Into<Segment<'a>>>(segment: S) -> Path {
        PathOptions::new().join([segment])
    }

    pub fn from_segments<'a, I>(segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<Segment<'a>>,
    {
        PathOptions::new().join(segments)
    }

    /// The current directory marker, `.`. See [`Path::cwd`] for the actual working directory.
    pub fn cur_dir() -> Path {
        Path::from_raw(CUR_DIR.to_owned())
    }

    pub fn into_string(self) -> String {
        self.inner
    }

    pub fn to_pure(&self) -> PurePath<Native> {
        PurePath::from_raw(self.inner.clone())
    }

    pub(crate) fn c_path(&self) -> Result<CString, FsError> {
        CString::new(self.inner.as_str())
            .map_err(|_| UsageError::new(format!("path contains a NUL byte: {:?}", self.inner)).into())
    }

    /// Blames `errno` on this path.
    pub(crate) fn host_err(&self, errno: Errno) -> FsError {
        FsError::from_errno(errno, &self.inner)
    }

    /// Wraps a path reported by the host, which isn't guaranteed to be UTF-8.
    pub(crate) fn from_host(&self, bytes: Vec<u8>) -> Result<Path, FsError> {
        String::from_utf8(bytes).map(Path::from_raw).map_err(|_| {
            HostIOError {
                path: self.inner.clone(),
                errno: libc::EILSEQ,
            }
            .into()
        })
    }

    /// The actual working directory of the process, fetched from the host.
    pub fn cwd() -> Result<Path, FsError> {
        let here = Path::cur_dir();
        let bytes = syscall::getcwd().map_err(|errno| here.host_err(errno))?;
        here.from_host(bytes)
    }

    pub fn chdir(&self) -> Result<(), FsError> {
        syscall::chdir(&self.c_path()?).map_err(|errno| self.host_err(errno))
    }

    fn stat_opt(&self) -> Option<Metadata> {
        self.stat().ok()
    }

    fn lstat_opt(&self) -> Option<Metadata> {
        self.lstat().ok()
    }

    /// Follows symlinks, so a dead link doesn't exist.
    pub fn exists(&self) -> bool {
        self.stat_opt().is_some()
    }

    /// True for anything with a directory entry, including dead links.
    pub fn lexists(&self) -> bool {
        self.lstat_opt().is_some()
    }

    pub fn isfile(&self) -> bool {
        self.stat_opt().is_some_and(|meta| meta.file_type.is_regular())
    }

    pub fn isdir(&self) -> bool {
        self.stat_opt().is_some_and(|meta| meta.file_type.is_directory())
    }

    pub fn islink(&self) -> bool {
        self.lstat_opt().is_some_and(|meta| meta.file_type.is_symlink())
    }

    /// True when the path is a mount point: it sits on a different device from its parent, or it
    /// is the same object as its parent (the root).
    pub fn ismount(&self) -> bool {
        let Some(meta) = self.lstat_opt() else {
            return false;
        };
        if meta.file_type.is_symlink() {
            return false;
        }
        let Some(parent) = self.join("..").lstat_opt() else {
            return false;
        };
        meta.device_id != parent.device_id || meta.inode_num == parent.inode_num
    }

    pub fn stat(&self) -> Result<Metadata, FsError> {
        syscall::stat(&self.c_path()?)
            .map(Metadata::from_stat)
            .map_err(|errno| self.host_err(errno))
    }

    /// Like [`stat`](Path::stat) but describes a symlink itself.
    pub fn lstat(&self) -> Result<Metadata, FsError> {
        syscall::lstat(&self.c_path()?)
            .map(Metadata::from_stat)
            .map_err(|errno| self.host_err(errno))
    }

    pub fn statvfs(&self) -> Result<FsStats, FsError> {
        syscall::statvfs(&self.c_path()?)
            .map(FsStats::from_statvfs)
            .map_err(|errno| self.host_err(errno))
    }

    pub fn size(&self) -> Result<u64, FsError> {
        Ok(self.stat()?.size)
    }

    pub fn atime(&self) -> Result<Timestamp, FsError> {
        Ok(self.stat()?.accessed)
    }

    pub fn mtime(&self) -> Result<Timestamp, FsError> {
        Ok(self.stat()?.modified)
    }

    pub fn ctime(&self) -> Result<Timestamp, FsError> {
        Ok(self.stat()?.changed)
    }

    /// True when both paths lead to the same object, after following symlinks.
    pub fn same_file(&self, other: &Path) -> Result<bool, FsError> {
        Ok(self.stat()?.same_object(&other.stat()?))
    }

    pub fn file_type(&self) -> Result<FileType, FsError> {
        Ok(self.lstat()?.file_type)
    }

    pub fn chmod(&self, mode: u32) -> Result<(), FsError> {
        syscall::chmod(&self.c_path()?, mode).map_err(|errno| self.host_err(errno))
    }

    /// Changes ownership. `None` leaves that id as it is.
    pub fn chown(&self, uid: Option<u32>, gid: Option<u32>) -> Result<(), FsError> {
        // The host reads an id of -1 as "unchanged".
        let uid = uid.unwrap_or(u32::MAX);
        let gid = gid.unwrap_or(u32::MAX);
        syscall::chown(&self.c_path()?, uid, gid).map_err(|errno| self.host_err(errno))
    }

    /// Sets the modification and access times. A missing `mtime` means now, a missing `atime`
    /// means the same as `mtime`. An empty file is created if nothing exists at the path.
    pub fn set_times(&self, mtime: Option<Timestamp>, atime: Option<Timestamp>) -> Result<(), FsError> {
        let path = self.c_path()?;
        if !self.exists() {
            trace!(path = %self, "creating empty file to set times");
            let fd = Fd::open(&path, libc::O_WRONLY | libc::O_CREAT, 0o666)
                .map_err(|errno| self.host_err(errno))?;
            fd.close().map_err(|errno| self.host_err(errno))?;
        }

        let mtime = mtime.unwrap_or_else(Timestamp::now);
        let atime = atime.unwrap_or(mtime);
        syscall::utimens(&path, atime.to_timespec(), mtime.to_timespec()).map_err(|errno| self.host_err(errno))
    }

    /// Removes a file or link. Nothing existing at the path isn't an error, a directory is.
    pub fn remove(&self) -> Result<(), FsError> {
        if !self.lexists() {
            trace!(path = %self, "nothing to remove");
            return Ok(());
        }
        syscall::unlink(&self.c_path()?).map_err(|errno| self.host_err(errno))
    }

    /// Creates a hard link at `new_path` to this path.
    pub fn hardlink(&self, new_path: &Path) -> Result<(), FsError> {
        syscall::link(&self.c_path()?, &new_path.c_path()?).map_err(|errno| new_path.host_err(errno))
    }

    /// Creates a symlink at this path whose content is `target`, verbatim.
    pub fn write_link<T: AsRef<str>>(&self, target: T) -> Result<(), FsError> {
        let target = Path::from_raw(target.as_ref().to_owned());
        syscall::symlink(&target.c_path()?, &self.c_path()?).map_err(|errno| self.host_err(errno))
    }

    /// Creates a symlink at this path that reaches `dest` through a relative path. The link is
    /// resolved from its own directory, so the route starts at this path's parent. `dest` doesn't
    /// have to exist.
    pub fn make_relative_link_to(&self, dest: &Path) -> Result<(), FsError> {
        let target = self.absolute()?.parent().rel_path_to(dest)?;
        self.write_link(target)
    }

    /// Reads the content of a symlink. With `absolute`, a relative target is joined onto the
    /// link's parent directory.
    pub fn read_link(&self, absolute: bool) -> Result<Path, FsError> {
        let bytes = syscall::readlink(&self.c_path()?).map_err(|errno| self.host_err(errno))?;
        let target = self.from_host(bytes)?;
        if absolute && !target.is_absolute() {
            Ok(PathOptions::new().join([Segment::from(self.parent()), target.into()]))
        } else {
            Ok(target)
        }
    }

    /// Prefixes the actual working directory if the path is relative. The result is always
    /// normalized.
    pub fn absolute(&self) -> Result<Path, FsError> {
        if self.is_absolute() {
            return Ok(self.norm());
        }
        Ok(Path::cwd()?.join(self).norm())
    }

    /// The path from the actual working directory to this one.
    pub fn relative(&self) -> Result<Path, FsError> {
        Path::cwd()?.rel_path_to(self)
    }

    /// The path from this one, taken as a directory, to `dest`. Both are made absolute first.
    ///
    /// When there is no common root the absolute form of `dest` is returned.
    pub fn rel_path_to(&self, dest: &Path) -> Result<Path, FsError> {
        Ok(self.absolute()?.lexical_rel_path_to(&dest.absolute()?))
    }

    /// Resolves every symlink, giving an absolute, normalized path.
    ///
    /// # Errors
    /// Fails if any component doesn't exist.
    pub fn resolve(&self) -> Result<Path, FsError> {
        let bytes = syscall::realpath(&self.c_path()?).map_err(|errno| self.host_err(errno))?;
        self.from_host(bytes)
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, FsError> {
        let fd = Fd::open(&self.c_path()?, libc::O_RDONLY, 0).map_err(|errno| self.host_err(errno))?;
        fd.read_to_end().map_err(|errno| self.host_err(errno))
    }

    /// Reads the whole file as UTF-8.
    pub fn read_file(&self) -> Result<String, FsError> {
        String::from_utf8(self.read_bytes()?).map_err(|_| self.host_err(libc::EILSEQ))
    }

    /// Replaces the content of the file, creating it if needed.
    pub fn write_file<C: AsRef<[u8]>>(&self, content: C) -> Result<(), FsError> {
        let flags = libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC;
        let fd = Fd::open(&self.c_path()?, flags, 0o666).map_err(|errno| self.host_err(errno))?;
        fd.write_all(content.as_ref()).map_err(|errno| self.host_err(errno))?;
        fd.close().map_err(|errno| self.host_err(errno))
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::cur_dir()
    }
}

impl PathInternals for Path {
    type Flavour = Native;

    fn raw(&self) -> &str {
        &self.inner
    }

    fn from_raw(raw: String) -> Self {
        Path {
            inner: raw,
        }
    }
}

impl PathLike for Path {}

impl_str_interop!("Path", [] Path);

impl From<PurePath<Native>> for Path {
    fn from(value: PurePath<Native>) -> Self {
        Path::from_raw(value.into_string())
    }
}

impl<'a> From<&'a Path> for Segment<'a> {
    fn from(value: &'a Path) -> Self {
        Segment::Part(value.as_str().into())
    }
}

impl From<Path> for Segment<'_> {
    fn from(value: Path) -> Self {
        Segment::Part(value.into_string().into())
    }
}
