use pretty_assertions::assert_eq;

use super::fixtures::Fixture;
use crate::fs::Path;
use crate::path::PathLike;

#[test]
fn test_read_link() {
    let fx = Fixture::new();
    assert_eq!(fx.dead_link.read_link(false).unwrap(), "nowhere");
    assert_eq!(fx.link_to_chef_file.read_link(false).unwrap(), fx.chef);
}

#[test]
fn test_read_link_absolute() {
    let fx = Fixture::new();
    assert_eq!(fx.dead_link.read_link(true).unwrap(), fx.d.child(["nowhere"]).unwrap());
    assert_eq!(
        fx.link_to_chef_file.read_link(true).unwrap(),
        fx.chef,
        "An absolute target should be returned as it is."
    );
}

#[test]
fn test_read_link_errors() {
    let fx = Fixture::new();
    assert_eq!(fx.a_file.read_link(false).unwrap_err().errno(), Some(libc::EINVAL));
    assert!(fx.missing.read_link(false).unwrap_err().is_not_found());
}

#[test]
fn test_write_link() {
    let fx = Fixture::new();
    let link = fx.d.child(["link"]).unwrap();
    link.write_link("animals/../a_file").unwrap();
    assert!(link.islink());
    assert_eq!(link.read_link(false).unwrap(), "animals/../a_file", "Link content should be kept verbatim.");
    assert_eq!(link.read_file().unwrap(), "Nothing important.");

    assert_eq!(link.write_link("elsewhere").unwrap_err().errno(), Some(libc::EEXIST));
}

#[test]
fn test_hardlink() {
    let fx = Fixture::new();
    let other = fx.d.child(["another_file"]).unwrap();
    fx.a_file.hardlink(&other).unwrap();
    assert!(!other.islink());
    assert!(other.same_file(&fx.a_file).unwrap());
    assert_eq!(other.stat().unwrap().links, 2);
}

#[test]
fn test_make_relative_link_to() {
    let fx = Fixture::new();
    let link = fx.images.child(["link_to_a_file"]).unwrap();
    link.make_relative_link_to(&fx.a_file).unwrap();
    assert_eq!(link.read_link(false).unwrap(), "../a_file");
    assert_eq!(link.read_file().unwrap(), "Nothing important.");

    let link = fx.d.child(["link_to_bork"]).unwrap();
    link.make_relative_link_to(&fx.chef).unwrap();
    assert_eq!(link.read_link(false).unwrap(), "swedish/chef/bork/bork");
    assert!(link.same_file(&fx.chef).unwrap());
}

#[test]
fn test_make_relative_link_to_missing() {
    let fx = Fixture::new();
    let link = fx.animals.child(["future"]).unwrap();
    link.make_relative_link_to(&fx.missing).unwrap();
    assert_eq!(link.read_link(false).unwrap(), "../MISSING");
    assert!(!link.exists());
}

#[test]
fn test_resolve() {
    let fx = Fixture::new();
    assert_eq!(fx.link_to_images_dir.resolve().unwrap(), fx.images);
    assert_eq!(fx.link_to_chef_file.resolve().unwrap(), fx.chef);
    assert_eq!(
        fx.link_to_images_dir.child(["image1.gif"]).unwrap().resolve().unwrap(),
        fx.images.child(["image1.gif"]).unwrap()
    );
    assert_eq!(fx.animals.join("../images/./").resolve().unwrap(), fx.images);
}

#[test]
fn test_resolve_missing() {
    let fx = Fixture::new();
    assert!(fx.missing.resolve().unwrap_err().is_not_found());
    assert!(fx.dead_link.resolve().is_err());
}

#[test]
fn test_rel_path_to() {
    let fx = Fixture::new();
    let mouse = fx.animals.child(["mouse"]).unwrap();
    assert_eq!(fx.a_file.rel_path_to(&mouse).unwrap(), "../animals/mouse");
    assert_eq!(fx.animals.rel_path_to(&mouse).unwrap(), "mouse");
    assert_eq!(fx.chef.rel_path_to(&fx.images).unwrap(), "../../../../images");
    assert_eq!(fx.images.rel_path_to(&fx.images).unwrap(), ".");
    assert_eq!(mouse.rel_path_to(&fx.animals).unwrap(), "..");
}

#[test]
fn test_absolute() {
    let cwd = Path::cwd().unwrap();
    assert!(cwd.is_absolute());
    assert_eq!(Path::new("a/../b").absolute().unwrap(), cwd.join("b"));
    assert_eq!(Path::new("").absolute().unwrap(), cwd);
    assert_eq!(Path::new("/usr/./lib/").absolute().unwrap(), "/usr/lib");
}

#[test]
fn test_relative() {
    let fx = Fixture::new();
    let cwd = Path::cwd().unwrap();
    let relative = fx.d.relative().unwrap();
    assert!(!relative.is_absolute());
    assert_eq!(cwd.join(&relative).norm(), fx.d);
}
