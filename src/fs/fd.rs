use std::ffi::CStr;
use std::mem::ManuallyDrop;

use libc::{c_int, mode_t};

use crate::fs::syscall::{self, Errno, err_no};

const BUFFER_SIZE: usize = 64 * 1024;

/// The side of [`Fd::copy_to`] that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CopyError {
    Read(Errno),
    Write(Errno),
}

/// An owned file descriptor, closed on drop.
#[derive(Debug)]
pub(crate) struct Fd(pub c_int);

impl Fd {
    pub fn open(path: &CStr, flags: c_int, mode: mode_t) -> Result<Fd, Errno> {
        syscall::open(path, flags, mode).map(Fd)
    }

    /// Reads until end of file.
    pub fn read_to_end(&self) -> Result<Vec<u8>, Errno> {
        let mut content = Vec::new();
        let mut buf = vec![0u8; BUFFER_SIZE];
        loop {
            match self.read(&mut buf)? {
                0 => return Ok(content),
                count => content.extend_from_slice(&buf[..count]),
            }
        }
    }

    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Errno> {
        loop {
            // SAFETY: buf is valid for writes of buf.len() bytes.
            match unsafe { libc::read(self.0, buf.as_mut_ptr().cast(), buf.len()) } {
                -1 => match err_no() {
                    libc::EINTR => continue,
                    errno => Err(errno)?,
                },
                count => return Ok(count as usize),
            }
        }
    }

    pub fn write_all(&self, mut content: &[u8]) -> Result<(), Errno> {
        while !content.is_empty() {
            // SAFETY: content is valid for reads of content.len() bytes.
            match unsafe { libc::write(self.0, content.as_ptr().cast(), content.len()) } {
                -1 => match err_no() {
                    libc::EINTR => continue,
                    errno => Err(errno)?,
                },
                0 => Err(libc::EIO)?,
                count => content = &content[count as usize..],
            }
        }
        Ok(())
    }

    /// Copies everything left in `self` into `dst`.
    pub fn copy_to(&self, dst: &Fd) -> Result<(), CopyError> {
        let mut buf = vec![0u8; BUFFER_SIZE];
        loop {
            match self.read(&mut buf).map_err(CopyError::Read)? {
                0 => return Ok(()),
                count => dst.write_all(&buf[..count]).map_err(CopyError::Write)?,
            }
        }
    }

    /// Closes the descriptor, reporting errors that a drop would swallow. Late write errors on
    /// some filesystems only show up here.
    pub fn close(self) -> Result<(), Errno> {
        let fd = ManuallyDrop::new(self);
        // SAFETY: close invalidates the descriptor regardless of the outcome, and the ManuallyDrop
        // keeps Drop from closing it a second time.
        match unsafe { libc::close(fd.0) } {
            -1 => match err_no() {
                // The descriptor is already gone on Linux, retrying could close a reused one.
                libc::EINTR => Ok(()),
                errno => Err(errno),
            },
            _ => Ok(()),
        }
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // SAFETY: After this, the file descriptor is invalidated but we are dropping self so it
        // doesn't matter. Errors are ignored here; callers who care use close.
        unsafe { libc::close(self.0) };
    }
}
