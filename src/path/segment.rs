use std::borrow::Cow;

use super::{Flavour, PathLike, PurePath};

/// One constructor argument.
///
/// Strings, integers (in decimal form) and other path values become a [`Segment::Part`]. Lists
/// become [`Segment::Components`]: a pre-split component list whose first element may be a root
/// token (kept) or `""` for a relative list (dropped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Part(Cow<'a, str>),
    Components(Vec<Cow<'a, str>>),
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(value: &'a str) -> Self {
        Segment::Part(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Segment<'a> {
    fn from(value: &'a String) -> Self {
        Segment::Part(Cow::Borrowed(value))
    }
}

impl From<String> for Segment<'_> {
    fn from(value: String) -> Self {
        Segment::Part(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Segment<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Segment::Part(value)
    }
}

impl<'a, F: Flavour> From<&'a PurePath<F>> for Segment<'a> {
    fn from(value: &'a PurePath<F>) -> Self {
        Segment::Part(Cow::Borrowed(value.as_str()))
    }
}

impl<F: Flavour> From<PurePath<F>> for Segment<'_> {
    fn from(value: PurePath<F>) -> Self {
        Segment::Part(Cow::Owned(value.into_string()))
    }
}

impl<'a> From<Vec<&'a str>> for Segment<'a> {
    fn from(value: Vec<&'a str>) -> Self {
        Segment::Components(value.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<&'a [&'a str]> for Segment<'a> {
    fn from(value: &'a [&'a str]) -> Self {
        Segment::Components(value.iter().copied().map(Cow::Borrowed).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Segment<'a> {
    fn from(value: [&'a str; N]) -> Self {
        Segment::Components(value.into_iter().map(Cow::Borrowed).collect())
    }
}

impl From<Vec<String>> for Segment<'_> {
    fn from(value: Vec<String>) -> Self {
        Segment::Components(value.into_iter().map(Cow::Owned).collect())
    }
}

macro_rules! impl_from_int {
    ($($int:ty),+) => {
        $(
            impl From<$int> for Segment<'_> {
                fn from(value: $int) -> Self {
                    Segment::Part(Cow::Owned(value.to_string()))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
