use super::flavour::{self, Flavour};
use super::path_like::PathLike;
use super::{Segment, lexical};

/// A builder for constructing path values, carrying the normalization policy.
///
/// `auto_norm` is the policy default and `norm` is the per-call override. When an override is set
/// it always wins. Both are off for [`PathOptions::new`], so construction keeps the joined string
/// exactly as given.
///
/// # Examples
/// ```
/// # use unipath::path::{PathOptions, PurePath, Posix};
/// let mut options = PathOptions::new();
/// options.auto_norm(true);
/// let normed: PurePath<Posix> = options.join(["a/./b", "c"]);
/// assert_eq!(normed, "a/b/c");
///
/// let raw: PurePath<Posix> = options.norm(false).join(["a/./b"]);
/// assert_eq!(raw, "a/./b");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    pub(crate) auto_norm: bool,
    pub(crate) norm: Option<bool>,
}

impl PathOptions {
    pub const fn new() -> PathOptions {
        PathOptions {
            auto_norm: false,
            norm: None,
        }
    }

    pub const fn auto_norm(&mut self, value: bool) -> &mut Self {
        self.auto_norm = value;
        self
    }

    pub const fn norm(&mut self, value: bool) -> &mut Self {
        self.norm = Some(value);
        self
    }

    pub const fn clear_norm(&mut self) -> &mut Self {
        self.norm = None;
        self
    }

    pub const fn should_norm(&self) -> bool {
        match self.norm {
            Some(value) => value,
            None => self.auto_norm,
        }
    }

    /// Joins `segments` left to right into a new path value.
    ///
    /// A separator is inserted between segments where needed, and a segment that has a root of
    /// its own discards everything before it, like a host path join. No segments at all gives the
    /// current-directory marker `.`, not the actual working directory.
    pub fn join<'a, P, I>(&self, segments: I) -> P
    where
        P: PathLike,
        I: IntoIterator,
        I::Item: Into<Segment<'a>>,
    {
        let mut raw = String::new();
        let mut any = false;

        for segment in segments {
            any = true;
            match segment.into() {
                Segment::Part(part) => flavour::append::<P::Flavour>(&mut raw, &part),
                Segment::Components(parts) => {
                    let inner = lexical::join_parts::<P::Flavour, _>(&parts);
                    flavour::append::<P::Flavour>(&mut raw, &inner);
                },
            }
        }

        if !any {
            raw.push_str(lexical::CUR_DIR);
        }
        if self.should_norm() {
            raw = lexical::normalize::<P::Flavour>(&raw);
        }
        P::from_raw(raw)
    }
}

pub(crate) fn join_one<F: Flavour>(base: &str, segment: &str) -> String {
    let mut raw = String::from(base);
    flavour::append::<F>(&mut raw, segment);
    raw
}
