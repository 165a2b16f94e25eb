use std::time::{Duration, SystemTime, UNIX_EPOCH};

use libc::timespec;

use super::FileType;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A point in time with nanosecond precision, as the host stores file times.
///
/// Fields are ordered so that comparisons are chronological.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: u32,
}

impl Timestamp {
    pub const fn new(secs: i64, nanos: u32) -> Timestamp {
        Timestamp {
            secs,
            nanos,
        }
    }

    pub const fn from_secs(secs: i64) -> Timestamp {
        Timestamp::new(secs, 0)
    }

    pub fn now() -> Timestamp {
        SystemTime::now().into()
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.secs as f64 + f64::from(self.nanos) / f64::from(NANOS_PER_SEC)
    }

    #[allow(clippy::unnecessary_cast)]
    pub(crate) const fn to_timespec(self) -> timespec {
        timespec {
            tv_sec: self.secs as libc::time_t,
            tv_nsec: self.nanos as libc::c_long,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    const fn from_raw(secs: i64, nanos: i64) -> Timestamp {
        Timestamp::new(secs, nanos as u32)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(value: SystemTime) -> Self {
        match value.duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp::new(after.as_secs() as i64, after.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                match before.subsec_nanos() {
                    0 => Timestamp::new(-(before.as_secs() as i64), 0),
                    nanos => Timestamp::new(-(before.as_secs() as i64) - 1, NANOS_PER_SEC - nanos),
                }
            },
        }
    }
}

impl From<Timestamp> for SystemTime {
    fn from(value: Timestamp) -> Self {
        let nanos = Duration::from_nanos(u64::from(value.nanos));
        if value.secs >= 0 {
            UNIX_EPOCH + Duration::from_secs(value.secs as u64) + nanos
        } else {
            UNIX_EPOCH - Duration::from_secs(value.secs.unsigned_abs()) + nanos
        }
    }
}

/// The result of `stat` or `lstat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub size: u64,             // st_size
    pub file_type: FileType,   // st_mode
    pub mode: u32,             // st_mode
    pub uid: u32,              // st_uid
    pub gid: u32,              // st_gid
    pub device_id: u64,        // st_dev
    pub special_device_id: u64, // st_rdev
    pub accessed: Timestamp,   // st_atime, st_atime_nsec
    pub modified: Timestamp,   // st_mtime, st_mtime_nsec
    pub changed: Timestamp,    // st_ctime, st_ctime_nsec
    pub links: u64,            // st_nlink
    pub block_size: i64,       // st_blksize
    pub blocks: i64,           // st_blocks
    pub inode_num: u64,        // st_ino
}

impl Metadata {
    #[allow(clippy::unnecessary_cast)]
    pub(crate) const fn from_stat(raw: libc::stat) -> Metadata {
        Metadata {
            size: raw.st_size as u64,
            file_type: FileType::from_mode(raw.st_mode),
            mode: raw.st_mode,
            uid: raw.st_uid,
            gid: raw.st_gid,
            device_id: raw.st_dev as u64,
            special_device_id: raw.st_rdev as u64,
            accessed: Timestamp::from_raw(raw.st_atime as i64, raw.st_atime_nsec as i64),
            modified: Timestamp::from_raw(raw.st_mtime as i64, raw.st_mtime_nsec as i64),
            changed: Timestamp::from_raw(raw.st_ctime as i64, raw.st_ctime_nsec as i64),
            links: raw.st_nlink as u64,
            block_size: raw.st_blksize as i64,
            blocks: raw.st_blocks as i64,
            inode_num: raw.st_ino as u64,
        }
    }

    /// The permission bits of [`mode`](Metadata::mode), including setuid, setgid and sticky.
    pub const fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }

    /// True when both refer to the same object on the same device.
    pub const fn same_object(&self, other: &Metadata) -> bool {
        self.device_id == other.device_id && self.inode_num == other.inode_num
    }
}

/// The result of `statvfs`, describing the filesystem that holds a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub block_size: u64,       // f_bsize
    pub fragment_size: u64,    // f_frsize
    pub blocks: u64,           // f_blocks
    pub blocks_free: u64,      // f_bfree
    pub blocks_available: u64, // f_bavail
    pub files: u64,            // f_files
    pub files_free: u64,       // f_ffree
    pub files_available: u64,  // f_favail
    pub fs_id: u64,            // f_fsid
    pub flags: u64,            // f_flag
    pub name_max: u64,         // f_namemax
}

impl FsStats {
    #[allow(clippy::unnecessary_cast)]
    pub(crate) const fn from_statvfs(raw: libc::statvfs) -> FsStats {
        FsStats {
            block_size: raw.f_bsize as u64,
            fragment_size: raw.f_frsize as u64,
            blocks: raw.f_blocks as u64,
            blocks_free: raw.f_bfree as u64,
            blocks_available: raw.f_bavail as u64,
            files: raw.f_files as u64,
            files_free: raw.f_ffree as u64,
            files_available: raw.f_favail as u64,
            fs_id: raw.f_fsid as u64,
            flags: raw.f_flag as u64,
            name_max: raw.f_namemax as u64,
        }
    }
}
