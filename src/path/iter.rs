use std::iter::FusedIterator;

use crate::path::PathLike;

/// Successive parents of a path, see [`PathLike::ancestors`].
///
/// The last item is the root for absolute paths and `.` for relative ones.
#[derive(Debug, Clone)]
pub struct Ancestors<P: PathLike> {
    pub(crate) current: Option<P>,
}

impl<P: PathLike + Clone + PartialEq> Ancestors<P> {
    pub(crate) const fn new(path: P) -> Ancestors<P> {
        Ancestors {
            current: Some(path),
        }
    }
}

impl<P: PathLike + Clone + PartialEq> Iterator for Ancestors<P> {
    type Item = P;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let parent = current.parent();

        if parent == current {
            None?
        }
        self.current = Some(parent.clone());
        Some(parent)
    }
}

impl<P: PathLike + Clone + PartialEq> FusedIterator for Ancestors<P> {}
