use pretty_assertions::assert_eq;

use super::fixtures::Fixture;
use crate::fs::{FileType, Path, Timestamp};
use crate::path::PathLike;

#[test]
fn test_exists() {
    let fx = Fixture::new();
    assert!(fx.a_file.exists());
    assert!(fx.animals.exists());
    assert!(fx.link_to_chef_file.exists());
    assert!(!fx.dead_link.exists(), "A dead link should not exist through its target.");
    assert!(!fx.missing.exists());
}

#[test]
fn test_lexists() {
    let fx = Fixture::new();
    assert!(fx.a_file.lexists());
    assert!(fx.dead_link.lexists());
    assert!(!fx.missing.lexists());
}

#[test]
fn test_predicates() {
    let fx = Fixture::new();
    assert!(fx.a_file.isfile());
    assert!(!fx.a_file.isdir());
    assert!(!fx.a_file.islink());

    assert!(fx.images.isdir());
    assert!(!fx.images.isfile());

    assert!(fx.link_to_chef_file.isfile());
    assert!(fx.link_to_chef_file.islink());
    assert!(fx.link_to_images_dir.isdir());
    assert!(fx.link_to_images_dir.islink());

    assert!(fx.dead_link.islink());
    assert!(!fx.dead_link.isfile());
    assert!(!fx.dead_link.isdir());

    assert!(!fx.missing.isfile());
    assert!(!fx.missing.isdir());
    assert!(!fx.missing.islink());
}

#[test]
fn test_ismount() {
    let fx = Fixture::new();
    assert!(Path::new("/").ismount());
    assert!(!fx.a_file.ismount());
    assert!(!fx.animals.ismount());
    assert!(!fx.link_to_images_dir.ismount(), "A symlink is never a mount point.");
    assert!(!fx.missing.ismount());
}

#[test]
fn test_times() {
    let fx = Fixture::new();
    fx.a_file.set_times(Some(Timestamp::from_secs(50000)), Some(Timestamp::from_secs(60000))).unwrap();
    assert_eq!(fx.a_file.mtime().unwrap(), Timestamp::from_secs(50000));
    assert_eq!(fx.a_file.atime().unwrap(), Timestamp::from_secs(60000));
    assert!(fx.a_file.ctime().unwrap().secs > 0);

    fx.a_file.set_times(Some(Timestamp::new(70000, 250_000_000)), None).unwrap();
    assert_eq!(
        fx.a_file.atime().unwrap(),
        Timestamp::new(70000, 250_000_000),
        "A missing atime should follow mtime."
    );
}

#[test]
fn test_set_times_now() {
    let fx = Fixture::new();
    let before = Timestamp::now();
    fx.a_file.set_times(None, None).unwrap();
    assert!(fx.a_file.mtime().unwrap().secs >= before.secs);
}

#[test]
fn test_set_times_creates() {
    let fx = Fixture::new();
    fx.missing.set_times(Some(Timestamp::from_secs(1000)), None).unwrap();
    assert!(fx.missing.isfile(), "Touching a missing path should create an empty file.");
    assert_eq!(fx.missing.size().unwrap(), 0);
    assert_eq!(fx.missing.mtime().unwrap(), Timestamp::from_secs(1000));
}

#[test]
fn test_size() {
    let fx = Fixture::new();
    assert_eq!(fx.chef.size().unwrap(), 5);
    assert_eq!(fx.a_file.size().unwrap(), 18);
    assert_eq!(fx.link_to_chef_file.size().unwrap(), 5, "Size should follow symlinks.");
    assert!(fx.missing.size().unwrap_err().is_not_found());
}

#[test]
fn test_same_file() {
    let fx = Fixture::new();
    assert!(fx.chef.same_file(&fx.link_to_chef_file).unwrap());
    assert!(fx.images.same_file(&fx.link_to_images_dir).unwrap());
    assert!(!fx.chef.same_file(&fx.a_file).unwrap());
    assert!(fx.chef.same_file(&fx.missing).is_err());
}

#[test]
fn test_stat() {
    let fx = Fixture::new();
    let meta = fx.link_to_chef_file.stat().unwrap();
    assert_eq!(meta.file_type, FileType::Regular);
    assert_eq!(meta.size, 5);
    assert_eq!(meta.links, 1);

    let meta = fx.link_to_chef_file.lstat().unwrap();
    assert_eq!(meta.file_type, FileType::Symlink);

    assert_eq!(fx.images.file_type().unwrap(), FileType::Directory);
    assert_eq!(fx.dead_link.file_type().unwrap(), FileType::Symlink);
    assert!(fx.dead_link.stat().unwrap_err().is_not_found());
}

#[test]
fn test_statvfs() {
    let fx = Fixture::new();
    let stats = fx.d.statvfs().unwrap();
    assert!(stats.block_size > 0);
    assert!(stats.name_max > 0);
}

#[test]
fn test_chmod() {
    let fx = Fixture::new();
    fx.a_file.chmod(0o600).unwrap();
    assert_eq!(fx.a_file.stat().unwrap().permissions(), 0o600);
    fx.a_file.chmod(0o644).unwrap();
    assert_eq!(fx.a_file.stat().unwrap().permissions(), 0o644);
    assert!(fx.missing.chmod(0o600).unwrap_err().is_not_found());
}

#[test]
fn test_chown_unchanged() {
    let fx = Fixture::new();
    let before = fx.a_file.stat().unwrap();
    fx.a_file.chown(None, None).unwrap();
    fx.a_file.chown(Some(before.uid), Some(before.gid)).unwrap();
    let after = fx.a_file.stat().unwrap();
    assert_eq!((after.uid, after.gid), (before.uid, before.gid));
}

#[test]
fn test_interior_nul() {
    let path = Path::new("a\0b");
    let err = path.stat().unwrap_err();
    assert!(err.is_usage(), "A NUL byte can't be passed to the host: {err}");
    assert!(!path.exists());
}

#[test]
fn test_host_error() {
    let fx = Fixture::new();
    let err = fx.a_file.child(["below"]).unwrap().stat().unwrap_err();
    assert!(err.is_host());
    assert_eq!(err.errno(), Some(libc::ENOTDIR));
    assert_eq!(std::io::Error::from(err).raw_os_error(), Some(libc::ENOTDIR));
}
