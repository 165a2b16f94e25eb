use std::marker::PhantomData;

use super::interop::impl_str_interop;
use super::path_like::sealed::PathInternals;
use super::{Flavour, Native, PathLike, PathOptions, Segment, lexical};

/// An immutable pathname that never touches the filesystem.
///
/// The flavour parameter picks the separator and root conventions, so Windows-shaped paths can be
/// manipulated on any host. Equality, ordering and hashing are those of the underlying string,
/// which makes two paths with the same spelling interchangeable as map keys even when they would
/// normalize to the same thing.
///
/// # Examples
/// ```
/// # use unipath::path::{PathLike, PurePath, Posix};
/// let path = PurePath::<Posix>::from_segments(["/usr", "lib", "x.py"]);
/// assert_eq!(path.parent(), "/usr/lib");
/// assert_eq!(path.name(), "x.py");
/// assert_eq!(path.stem(), "x");
/// assert_eq!(path.extension(), ".py");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PurePath<F: Flavour = Native> {
    pub(crate) inner: String,
    pub(crate) _flavour: PhantomData<fn() -> F>,
}

impl<F: Flavour> PurePath<F> {
    /// Creates a path from a single segment, exactly as spelled.
    pub fn new<'a, S: Into<Segment<'a>>>(segment: S) -> PurePath<F> {
        PathOptions::new().join([segment])
    }

    /// Joins every segment left to right, see [`PathOptions::join`].
    pub fn from_segments<'a, I>(segments: I) -> PurePath<F>
    where
        I: IntoIterator,
        I::Item: Into<Segment<'a>>,
    {
        PathOptions::new().join(segments)
    }

    /// The current directory marker, `.`.
    pub fn cur_dir() -> PurePath<F> {
        PurePath::from_raw(lexical::CUR_DIR.to_owned())
    }

    pub fn into_string(self) -> String {
        self.inner
    }
}

impl<F: Flavour> Default for PurePath<F> {
    fn default() -> Self {
        PurePath::cur_dir()
    }
}

impl<F: Flavour> PathInternals for PurePath<F> {
    type Flavour = F;

    fn raw(&self) -> &str {
        &self.inner
    }

    fn from_raw(raw: String) -> Self {
        PurePath {
            inner: raw,
            _flavour: PhantomData,
        }
    }
}

impl<F: Flavour> PathLike for PurePath<F> {}

impl_str_interop!("PurePath", [F: Flavour] PurePath<F>);
