use derive_more::IsVariant;

/// The kind of filesystem object, as encoded in `st_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum FileType {
    BlockDevice,
    CharDevice,
    Directory,
    Fifo,
    Symlink,
    Regular,
    Socket,
    Other,
}

use FileType::*;

impl FileType {
    pub(crate) const fn from_mode(st_mode: u32) -> FileType {
        match st_mode & libc::S_IFMT {
            libc::S_IFBLK => BlockDevice,
            libc::S_IFCHR => CharDevice,
            libc::S_IFDIR => Directory,
            libc::S_IFIFO => Fifo,
            libc::S_IFLNK => Symlink,
            libc::S_IFREG => Regular,
            libc::S_IFSOCK => Socket,
            _ => Other,
        }
    }
}
