use super::expand::{self, Environment, Lookup};
use super::iter::Ancestors;
use super::options::{self, PathOptions};
use super::{Flavour, Segment, SecurityError, UnsafeReason, UsageError, flavour, lexical};

pub(crate) mod sealed {
    use crate::path::Flavour;

    pub trait PathInternals {
        type Flavour: Flavour;

        fn raw(&self) -> &str;

        fn from_raw(raw: String) -> Self;
    }
}

/// The string algebra shared by [`PurePath`](super::PurePath) and the filesystem-backed `Path`.
///
/// Every method here is a pure function of the path string. Derived values come back as the
/// implementing type, so a `Path`'s parent is still a `Path`.
pub trait PathLike: sealed::PathInternals + Sized {
    fn as_str(&self) -> &str {
        self.raw()
    }

    fn len(&self) -> usize {
        self.raw().len()
    }

    fn is_empty(&self) -> bool {
        self.raw().is_empty()
    }

    /// Splits the path into its root and the remainder, see [`split_root`](super::split_root).
    fn split_root(&self) -> (Self, Self) {
        let (root, rest) = flavour::split_root::<Self::Flavour>(self.raw());
        (Self::from_raw(root), Self::from_raw(rest))
    }

    fn root(&self) -> Self {
        self.split_root().0
    }

    /// Returns the components of the path. The first is always the root marker (`""` for a
    /// relative path), and it is the only one that may contain a separator.
    ///
    /// Joining the components with [`PathOptions::join`] gives back an equivalent path.
    ///
    /// # Examples
    /// ```
    /// # use unipath::path::{PathLike, PurePath, Posix};
    /// let path = PurePath::<Posix>::new("/usr/lib");
    /// assert_eq!(path.components(), ["/", "usr", "lib"]);
    /// ```
    fn components(&self) -> Vec<String> {
        lexical::components::<Self::Flavour>(self.raw())
    }

    /// True when the path has a root. A Windows drive-relative path like `C:foo` counts as
    /// absolute here, even though the host disagrees.
    fn is_absolute(&self) -> bool {
        <Self::Flavour as Flavour>::root_len(self.raw()) > 0
    }

    /// The path without its final component. The parent of a root is the root, and the parent
    /// of a single relative component is `.`.
    fn parent(&self) -> Self {
        Self::from_raw(lexical::parent::<Self::Flavour>(self.raw()))
    }

    /// Iterates over [`parent`](PathLike::parent), then its parent and so on, stopping once the
    /// parent no longer changes.
    fn ancestors(&self) -> Ancestors<Self>
    where
        Self: Clone + PartialEq,
    {
        Ancestors::new(self.clone())
    }

    /// Applies [`parent`](PathLike::parent) `n` times, or until the parent stops changing.
    ///
    /// # Errors
    /// Fails with [`UsageError`] if `n` is negative.
    fn ancestor(&self, n: isize) -> Result<Self, UsageError> {
        if n < 0 {
            Err(UsageError::new(format!("ancestor count must not be negative, got {n}")))?
        }
        let mut current = Self::from_raw(self.raw().to_owned());
        for _ in 0..n {
            let parent = current.parent();
            if parent.raw() == current.raw() {
                break;
            }
            current = parent;
        }
        Ok(current)
    }

    /// The final component, or `""` for a root or an empty path.
    fn name(&self) -> &str {
        lexical::name::<Self::Flavour>(self.raw())
    }

    /// The final component from its last dot onwards, `""` when there is none. A leading dot
    /// doesn't start an extension.
    fn extension(&self) -> &str {
        lexical::extension(self.name())
    }

    /// The final component without its [`extension`](PathLike::extension).
    fn stem(&self) -> &str {
        let name = self.name();
        &name[..name.len() - lexical::extension(name).len()]
    }

    /// Joins one more segment on, with the same rules as [`PathOptions::join`]. An absolute
    /// segment replaces the path entirely.
    fn join<'a, S: Into<Segment<'a>>>(&self, segment: S) -> Self {
        PathOptions::new().join([Segment::from(self.raw()), segment.into()])
    }

    /// Joins components that must each name a direct child.
    ///
    /// # Errors
    /// Fails with [`SecurityError`] for an empty component, a component containing a separator
    /// or carrying a root of its own, or `.` or `..`. Nothing is joined if any component fails.
    fn child<I, S>(&self, children: I) -> Result<Self, SecurityError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = self.raw().to_owned();
        for child in children {
            let child = child.as_ref();
            let reason = match child {
                "" => Some(UnsafeReason::Empty),
                lexical::CUR_DIR => Some(UnsafeReason::CurrentDir),
                lexical::PAR_DIR => Some(UnsafeReason::ParentDir),
                _ if child.contains(<Self::Flavour as Flavour>::is_sep) => Some(UnsafeReason::Separator),
                // A drive like "D:evil" has no separator but would still replace the base.
                _ if <Self::Flavour as Flavour>::root_len(child) > 0 => Some(UnsafeReason::Rooted),
                _ => None,
            };
            if let Some(reason) = reason {
                Err(SecurityError {
                    component: child.to_owned(),
                    reason,
                })?
            }
            raw = options::join_one::<Self::Flavour>(&raw, child);
        }
        Ok(Self::from_raw(raw))
    }

    /// Collapses `.`, `..` and repeated separators and converts to the native separator. On
    /// case-insensitive flavours the result is also lower-cased.
    ///
    /// This never consults the filesystem, so `a/link/..` becomes `a` even when `link` points
    /// somewhere else entirely.
    fn norm(&self) -> Self {
        Self::from_raw(lexical::normalize::<Self::Flavour>(self.raw()))
    }

    fn norm_case(&self) -> Self {
        Self::from_raw(lexical::normalize_case::<Self::Flavour>(self.raw()))
    }

    fn expand_user(&self) -> Self {
        self.expand_user_with(&Environment)
    }

    fn expand_user_with<L: Lookup + ?Sized>(&self, lookup: &L) -> Self {
        Self::from_raw(expand::expand_user::<Self::Flavour, L>(self.raw(), lookup))
    }

    fn expand_vars(&self) -> Self {
        self.expand_vars_with(&Environment)
    }

    fn expand_vars_with<L: Lookup + ?Sized>(&self, lookup: &L) -> Self {
        Self::from_raw(expand::expand_vars::<Self::Flavour, L>(self.raw(), lookup))
    }

    /// [`expand_user`](PathLike::expand_user), then [`expand_vars`](PathLike::expand_vars), then
    /// [`norm`](PathLike::norm). This is usually all a path read from a config file needs.
    fn expand(&self) -> Self {
        self.expand_with(&Environment)
    }

    fn expand_with<L: Lookup + ?Sized>(&self, lookup: &L) -> Self {
        self.expand_user_with(lookup).expand_vars_with(lookup).norm()
    }

    /// The relative path from `self`, taken as a directory, to `other`, computed from the
    /// strings alone. When the roots differ `other` is returned, normalized but otherwise as is.
    fn lexical_rel_path_to(&self, other: &Self) -> Self {
        Self::from_raw(lexical::rel_path::<Self::Flavour>(self.raw(), other.raw()))
    }
}
