//! Thin libc wrappers. Each one returns the raw `errno` on failure and leaves its interpretation to
//! the caller, which knows which path to blame and which conditions to absorb.

use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::ptr;

use libc::{c_char, c_int, gid_t, mode_t, timespec, uid_t};

pub(crate) type Errno = c_int;

pub(crate) fn err_no() -> Errno {
    // Every caller reads this straight after a failed call, which always sets errno.
    std::io::Error::last_os_error().raw_os_error().unwrap_or(libc::EIO)
}

macro_rules! check {
    ($call:expr) => {
        // SAFETY: The arguments are valid, NUL-terminated strings or live buffers owned by the
        // caller for the duration of the call.
        match unsafe { $call } {
            -1 => Err(err_no()),
            _ => Ok(()),
        }
    };
}

pub(crate) fn stat(path: &CStr) -> Result<libc::stat, Errno> {
    let mut raw: MaybeUninit<libc::stat> = MaybeUninit::uninit();
    check!(libc::stat(path.as_ptr(), raw.as_mut_ptr()))?;
    // SAFETY: stat initializes raw when it succeeds.
    Ok(unsafe { raw.assume_init() })
}

pub(crate) fn lstat(path: &CStr) -> Result<libc::stat, Errno> {
    let mut raw: MaybeUninit<libc::stat> = MaybeUninit::uninit();
    check!(libc::lstat(path.as_ptr(), raw.as_mut_ptr()))?;
    // SAFETY: lstat initializes raw when it succeeds.
    Ok(unsafe { raw.assume_init() })
}

pub(crate) fn statvfs(path: &CStr) -> Result<libc::statvfs, Errno> {
    let mut raw: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();
    check!(libc::statvfs(path.as_ptr(), raw.as_mut_ptr()))?;
    // SAFETY: statvfs initializes raw when it succeeds.
    Ok(unsafe { raw.assume_init() })
}

pub(crate) fn chmod(path: &CStr, mode: mode_t) -> Result<(), Errno> {
    check!(libc::chmod(path.as_ptr(), mode))
}

pub(crate) fn chown(path: &CStr, uid: uid_t, gid: gid_t) -> Result<(), Errno> {
    check!(libc::chown(path.as_ptr(), uid, gid))
}

/// Sets access and modification times, following symlinks.
pub(crate) fn utimens(path: &CStr, accessed: timespec, modified: timespec) -> Result<(), Errno> {
    let times = [accessed, modified];
    check!(libc::utimensat(libc::AT_FDCWD, path.as_ptr(), times.as_ptr(), 0))
}

pub(crate) fn mkdir(path: &CStr, mode: mode_t) -> Result<(), Errno> {
    check!(libc::mkdir(path.as_ptr(), mode))
}

pub(crate) fn rmdir(path: &CStr) -> Result<(), Errno> {
    check!(libc::rmdir(path.as_ptr()))
}

pub(crate) fn unlink(path: &CStr) -> Result<(), Errno> {
    check!(libc::unlink(path.as_ptr()))
}

pub(crate) fn rename(from: &CStr, to: &CStr) -> Result<(), Errno> {
    check!(libc::rename(from.as_ptr(), to.as_ptr()))
}

/// Creates `link` containing `target` verbatim.
pub(crate) fn symlink(target: &CStr, link: &CStr) -> Result<(), Errno> {
    check!(libc::symlink(target.as_ptr(), link.as_ptr()))
}

pub(crate) fn link(existing: &CStr, new: &CStr) -> Result<(), Errno> {
    check!(libc::link(existing.as_ptr(), new.as_ptr()))
}

pub(crate) fn chdir(path: &CStr) -> Result<(), Errno> {
    check!(libc::chdir(path.as_ptr()))
}

pub(crate) fn readlink(path: &CStr) -> Result<Vec<u8>, Errno> {
    let mut buf: Vec<u8> = Vec::with_capacity(256);
    loop {
        // SAFETY: readlink writes at most capacity bytes into the buffer.
        let len = unsafe { libc::readlink(path.as_ptr(), buf.as_mut_ptr().cast(), buf.capacity()) };
        match len {
            -1 => Err(err_no())?,
            len if (len as usize) < buf.capacity() => {
                // SAFETY: readlink initialized the first len bytes.
                unsafe { buf.set_len(len as usize) };
                return Ok(buf);
            },
            // Possibly truncated, retry with more room.
            _ => buf.reserve(buf.capacity() * 2),
        }
    }
}

pub(crate) fn realpath(path: &CStr) -> Result<Vec<u8>, Errno> {
    // SAFETY: A null resolved buffer makes realpath allocate one, which is freed below.
    let resolved = unsafe { libc::realpath(path.as_ptr(), ptr::null_mut()) };
    if resolved.is_null() {
        Err(err_no())?
    }
    // SAFETY: realpath returned a valid, NUL-terminated string.
    let bytes = unsafe { CStr::from_ptr(resolved) }.to_bytes().to_vec();
    // SAFETY: resolved was allocated by realpath with malloc and isn't used after this.
    unsafe { libc::free(resolved.cast()) };
    Ok(bytes)
}

pub(crate) fn getcwd() -> Result<Vec<u8>, Errno> {
    let mut buf: Vec<u8> = Vec::with_capacity(libc::PATH_MAX as usize);
    loop {
        // SAFETY: getcwd writes at most capacity bytes, including the NUL.
        let ret = unsafe { libc::getcwd(buf.as_mut_ptr().cast(), buf.capacity()) };
        if !ret.is_null() {
            // SAFETY: getcwd wrote a NUL-terminated string into buf.
            let len = unsafe { CStr::from_ptr(ret) }.to_bytes().len();
            // SAFETY: len bytes were initialized by getcwd.
            unsafe { buf.set_len(len) };
            return Ok(buf);
        }
        match err_no() {
            libc::ERANGE => buf.reserve(buf.capacity() * 2),
            errno => Err(errno)?,
        }
    }
}

/// Owns an open directory stream and closes it on drop.
struct DirStream(*mut libc::DIR);

impl Drop for DirStream {
    fn drop(&mut self) {
        // SAFETY: The stream came from a successful opendir and is closed exactly once. A failed
        // close leaves nothing to recover.
        unsafe { libc::closedir(self.0) };
    }
}

/// Reads the entry names of a directory, excluding `.` and `..`, in directory order.
pub(crate) fn read_dir(path: &CStr) -> Result<Vec<Vec<u8>>, Errno> {
    // SAFETY: path is a valid NUL-terminated string.
    let dir = unsafe { libc::opendir(path.as_ptr()) };
    if dir.is_null() {
        Err(err_no())?
    }
    let stream = DirStream(dir);

    let mut names = Vec::new();
    loop {
        // readdir only reports errors through errno, and doesn't clear it on success.
        // SAFETY: __errno_location always returns a valid thread-local pointer.
        unsafe { *libc::__errno_location() = 0 };
        // SAFETY: stream.0 is a live stream owned by this function.
        let entry = unsafe { libc::readdir(stream.0) };
        if entry.is_null() {
            match err_no() {
                0 => break,
                errno => Err(errno)?,
            }
        }
        // SAFETY: readdir returned a valid entry whose d_name is NUL-terminated.
        let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) }.to_bytes();
        if name != b"." && name != b".." {
            names.push(name.to_vec());
        }
    }
    Ok(names)
}

/// Opens `path` with `flags`, retrying on interrupts.
pub(crate) fn open(path: &CStr, flags: c_int, mode: mode_t) -> Result<c_int, Errno> {
    loop {
        // SAFETY: path is a valid NUL-terminated string.
        match unsafe { libc::open(path.as_ptr(), flags | libc::O_CLOEXEC, mode as libc::c_uint) } {
            -1 => match err_no() {
                libc::EINTR => continue,
                errno => Err(errno)?,
            },
            fd => return Ok(fd),
        }
    }
}

/// Looks up the home directory of `name` in the user database.
pub(crate) fn user_home(name: &str) -> Option<String> {
    let name = CString::new(name).ok()?;
    let mut passwd: MaybeUninit<libc::passwd> = MaybeUninit::uninit();
    let mut result: *mut libc::passwd = ptr::null_mut();
    let mut buf: Vec<c_char> = vec![0; 1024];

    loop {
        // SAFETY: All pointers refer to live buffers of the stated sizes.
        let ret = unsafe {
            libc::getpwnam_r(name.as_ptr(), passwd.as_mut_ptr(), buf.as_mut_ptr(), buf.len(), &mut result)
        };
        match ret {
            libc::ERANGE if buf.len() < 1 << 20 => buf.resize(buf.len() * 2, 0),
            0 if !result.is_null() => break,
            _ => None?,
        }
    }

    // SAFETY: getpwnam_r succeeded, so passwd is initialized and pw_dir points into buf.
    let dir = unsafe { CStr::from_ptr(passwd.assume_init_ref().pw_dir) };
    dir.to_str().ok().map(str::to_owned)
}
