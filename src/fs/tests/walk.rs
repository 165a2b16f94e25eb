use pretty_assertions::assert_eq;

use super::fixtures::Fixture;
use crate::fs::{Filter, Path};
use crate::path::PathLike;

fn collect(dir: &Path, pattern: Option<&str>, filter: Filter, top_down: bool) -> Vec<Path> {
    dir.walk(pattern, filter, top_down).unwrap().map(Result::unwrap).collect()
}

fn under(dir: &Path, parts: &[&str]) -> Path {
    Path::from_segments([dir.as_str()].into_iter().chain(parts.iter().copied()))
}

#[test]
fn test_walk() {
    let fx = Fixture::new();
    let result = collect(&fx.d, None, Filter::All, true);
    assert_eq!(
        &result[..5],
        [
            fx.a_file.clone(),
            fx.animals.clone(),
            under(&fx.animals, &["elephant"]),
            under(&fx.animals, &["gonzo"]),
            under(&fx.animals, &["mouse"]),
        ]
    );
}

#[test]
fn test_walk_bottom_up() {
    let fx = Fixture::new();
    let result = collect(&fx.d, None, Filter::All, false);
    assert_eq!(
        &result[..5],
        [
            fx.a_file.clone(),
            under(&fx.animals, &["elephant"]),
            under(&fx.animals, &["gonzo"]),
            under(&fx.animals, &["mouse"]),
            fx.animals.clone(),
        ]
    );
}

#[test]
fn test_walk_files() {
    let fx = Fixture::new();
    let result = collect(&fx.d, None, Filter::Files, true);
    assert_eq!(
        result,
        [
            fx.a_file.clone(),
            under(&fx.animals, &["elephant"]),
            under(&fx.animals, &["gonzo"]),
            under(&fx.animals, &["mouse"]),
            under(&fx.images, &["image1.gif"]),
            under(&fx.images, &["image2.jpg"]),
            under(&fx.images, &["image3.png"]),
            fx.link_to_chef_file.clone(),
            fx.chef.clone(),
        ]
    );
}

#[test]
fn test_walk_dirs() {
    let fx = Fixture::new();
    let result = collect(&fx.d, None, Filter::Dirs, true);
    assert_eq!(
        result,
        [
            fx.animals.clone(),
            fx.images.clone(),
            fx.link_to_images_dir.clone(),
            under(&fx.d, &["swedish"]),
            under(&fx.d, &["swedish", "chef"]),
            under(&fx.d, &["swedish", "chef", "bork"]),
        ]
    );
}

#[test]
fn test_walk_links() {
    let fx = Fixture::new();
    let result = collect(&fx.d, None, Filter::Links, true);
    assert_eq!(result, [fx.dead_link.clone(), fx.link_to_chef_file.clone(), fx.link_to_images_dir.clone()]);
}

#[test]
fn test_walk_pattern() {
    let fx = Fixture::new();
    let result = collect(&fx.d, Some("bork"), Filter::All, true);
    assert_eq!(
        result,
        [under(&fx.d, &["swedish", "chef", "bork"]), fx.chef.clone()],
        "Directories that don't match should still be descended into."
    );
}

#[test]
fn test_walk_order() {
    let fx = Fixture::new();
    for top_down in [true, false] {
        let result = collect(&fx.d, None, Filter::All, top_down);
        for (index, path) in result.iter().enumerate() {
            for (other, descendant) in result.iter().enumerate() {
                if descendant.as_str().starts_with(&format!("{path}/")) {
                    assert_eq!(
                        index < other,
                        top_down,
                        "{path} should come {} {descendant}",
                        if top_down { "before" } else { "after" }
                    );
                }
            }
        }
    }
}

#[test]
fn test_walk_sorted_per_level() {
    let fx = Fixture::new();
    let result = collect(&fx.d, None, Filter::All, true);
    let top: Vec<&str> = result.iter().filter(|path| path.parent() == fx.d).map(|path| path.name()).collect();
    assert_eq!(top, fx.d.listdir_names(None).unwrap());
}

#[test]
fn test_walk_restartable() {
    let fx = Fixture::new();
    let first = collect(&fx.d, None, Filter::All, true);
    let second = collect(&fx.d, None, Filter::All, true);
    assert_eq!(first, second, "Every walk should start from scratch.");
    assert_eq!(first.len(), 16);
}

#[test]
fn test_walk_not_a_directory() {
    let fx = Fixture::new();
    let err = fx.a_file.walk(None, Filter::All, true).unwrap_err();
    assert_eq!(err.errno(), Some(libc::ENOTDIR));
    assert!(fx.missing.walk(None, Filter::All, true).is_err());
}

#[test]
fn test_walk_link_cycle() {
    let fx = Fixture::new();
    let loop_link = under(&fx.animals, &["loop"]);
    loop_link.write_link(&fx.d).unwrap();

    let result = collect(&fx.d, None, Filter::All, true);
    assert!(result.contains(&loop_link), "The link itself should still be yielded.");
    assert_eq!(
        result.iter().filter(|path| path.name() == "elephant").count(),
        1,
        "A directory reached again through a link shouldn't be walked twice."
    );
}
