use pretty_assertions::assert_eq;

use super::fixtures::{Fixture, names};
use crate::fs::{Filter, ListOptions, Listing, Path};
use crate::path::PathLike;

#[test]
fn test_listdir_names_only() {
    let fx = Fixture::new();
    assert_eq!(fx.images.listdir_names(None).unwrap(), ["image1.gif", "image2.jpg", "image3.png"]);
}

#[test]
fn test_listdir_arg_errors() {
    let fx = Fixture::new();
    let result = ListOptions::new().filter(Filter::Files).names_only(true).list(&fx.d);
    assert!(
        result.unwrap_err().is_usage(),
        "Combining a filter with names_only should be a usage error."
    );

    assert!(
        ListOptions::new().pattern("a***").unwrap_err().message.contains("a***"),
        "A bad pattern should be reported as a usage error naming it."
    );
}

#[test]
fn test_listdir() {
    let fx = Fixture::new();
    assert_eq!(
        fx.images.listdir(None, Filter::All).unwrap(),
        [
            Path::from_segments([fx.images.as_str(), "image1.gif"]),
            Path::from_segments([fx.images.as_str(), "image2.jpg"]),
            Path::from_segments([fx.images.as_str(), "image3.png"]),
        ]
    );
}

#[test]
fn test_listdir_all() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::All).unwrap();
    assert_eq!(
        names(&result),
        [
            "a_file",
            "animals",
            "dead_link",
            "images",
            "link_to_chef_file",
            "link_to_images_dir",
            "swedish",
        ]
    );
}

#[test]
fn test_listdir_files() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::Files).unwrap();
    assert_eq!(names(&result), ["a_file", "link_to_chef_file"]);
}

#[test]
fn test_listdir_dirs() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::Dirs).unwrap();
    assert_eq!(names(&result), ["animals", "images", "link_to_images_dir", "swedish"]);
}

#[test]
fn test_listdir_links() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::Links).unwrap();
    assert_eq!(names(&result), ["dead_link", "link_to_chef_file", "link_to_images_dir"]);
}

#[test]
fn test_listdir_files_no_links() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::FilesNoLinks).unwrap();
    assert_eq!(names(&result), ["a_file"]);
}

#[test]
fn test_listdir_dirs_no_links() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::DirsNoLinks).unwrap();
    assert_eq!(names(&result), ["animals", "images", "swedish"]);
}

#[test]
fn test_listdir_dead_links() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::DeadLinks).unwrap();
    assert_eq!(names(&result), ["dead_link"]);
}

#[test]
fn test_listdir_custom_filter() {
    let fx = Fixture::new();
    let result = fx.d.listdir(None, Filter::Custom(|path| path.name().starts_with("link"))).unwrap();
    assert_eq!(names(&result), ["link_to_chef_file", "link_to_images_dir"]);
}

#[test]
fn test_listdir_pattern_names_only() {
    let fx = Fixture::new();
    assert_eq!(fx.images.listdir_names(Some("*.jpg")).unwrap(), ["image2.jpg"]);
}

#[test]
fn test_listdir_pattern() {
    let fx = Fixture::new();
    assert_eq!(
        fx.images.listdir(Some("*.jpg"), Filter::All).unwrap(),
        [fx.images.child(["image2.jpg"]).unwrap()]
    );
    assert_eq!(
        names(&fx.d.listdir(Some("*_*"), Filter::Dirs).unwrap()),
        ["link_to_images_dir"],
        "Pattern and filter should both have to match."
    );
}

#[test]
fn test_list_options() {
    let fx = Fixture::new();
    let listing = ListOptions::new().pattern("image[12].*").unwrap().list(&fx.images).unwrap();
    assert!(listing.is_paths());
    assert_eq!(
        listing,
        Listing::Paths(vec![fx.images.child(["image1.gif"]).unwrap(), fx.images.child(["image2.jpg"]).unwrap()])
    );

    let listing = ListOptions::new().names_only(true).list(&fx.animals).unwrap();
    assert_eq!(listing, Listing::Names(vec!["elephant".into(), "gonzo".into(), "mouse".into()]));
}

#[test]
fn test_listdir_empty_path() {
    let here = Path::new("").listdir_names(None).unwrap();
    let cwd = Path::cwd().unwrap().listdir_names(None).unwrap();
    assert_eq!(here, cwd, "An empty path should list the current directory.");

    for path in Path::new("").listdir(None, Filter::All).unwrap() {
        assert!(!path.is_absolute(), "Children of an empty path should be bare names.");
        assert_eq!(path.components().len(), 2);
    }
}

#[test]
fn test_listdir_missing() {
    let fx = Fixture::new();
    assert!(fx.missing.listdir(None, Filter::All).unwrap_err().is_not_found());
    assert_eq!(fx.a_file.listdir_names(None).unwrap_err().errno(), Some(libc::ENOTDIR));
}
