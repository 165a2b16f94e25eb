use std::fmt::{self, Display, Formatter};
use std::io;

use derive_more::{Display, Error, From, IsVariant};

use crate::fs::syscall::Errno;
use crate::path::{SecurityError, UsageError};

/// The host reported that a path doesn't exist, for an operation that doesn't tolerate that.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("no such file or directory: {path}")]
pub struct NotFoundError {
    pub path: String,
}

/// Any other failure reported by the host, carrying its error code unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct HostIOError {
    pub path: String,
    pub errno: Errno,
}

impl HostIOError {
    pub fn kind(&self) -> io::ErrorKind {
        io::Error::from_raw_os_error(self.errno).kind()
    }
}

impl Display for HostIOError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, io::Error::from_raw_os_error(self.errno))
    }
}

impl From<HostIOError> for io::Error {
    fn from(value: HostIOError) -> Self {
        io::Error::from_raw_os_error(value.errno)
    }
}

/// The error returned by every operation that touches the filesystem.
#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum FsError {
    Usage(UsageError),
    Security(SecurityError),
    NotFound(NotFoundError),
    Host(HostIOError),
}

impl FsError {
    /// Maps an `errno` reported for `path`. `ENOENT` becomes [`NotFoundError`], anything else a
    /// [`HostIOError`].
    pub(crate) fn from_errno(errno: Errno, path: &str) -> FsError {
        match errno {
            libc::ENOENT => NotFoundError {
                path: path.to_owned(),
            }
            .into(),
            errno => HostIOError {
                path: path.to_owned(),
                errno,
            }
            .into(),
        }
    }

    /// The host error code behind this error, if the host reported one.
    pub const fn errno(&self) -> Option<Errno> {
        match self {
            FsError::NotFound(_) => Some(libc::ENOENT),
            FsError::Host(err) => Some(err.errno),
            FsError::Usage(_) | FsError::Security(_) => None,
        }
    }
}

impl From<FsError> for io::Error {
    fn from(value: FsError) -> Self {
        match value {
            FsError::NotFound(err) => io::Error::new(io::ErrorKind::NotFound, err),
            FsError::Host(err) => err.into(),
            FsError::Usage(err) => io::Error::new(io::ErrorKind::InvalidInput, err),
            FsError::Security(err) => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}
