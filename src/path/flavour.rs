use std::fmt::Debug;
use std::hash::Hash;

use crate::util::sealed::Sealed;

/// The separator and root conventions of one platform.
///
/// Flavours are uninhabited marker types, used only as the type parameter of
/// [`PurePath`](super::PurePath). Only [`Posix`] and [`Windows`] exist and the trait is sealed.
pub trait Flavour: Sealed + Debug + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Hash + 'static {
    /// The primary separator, always emitted when joining.
    const SEP: char;
    /// A second separator that is accepted on input, if any.
    const ALT_SEP: Option<char>;
    /// Whether the platform compares names case-insensitively.
    const CASE_INSENSITIVE: bool;
    /// Whether `%NAME%` references are expanded alongside `$NAME`.
    const PERCENT_VARS: bool;

    /// Returns the length in bytes of the root prefix of `raw`, or 0 for a relative path.
    ///
    /// The root never includes the repeated separators that may follow it.
    fn root_len(raw: &str) -> usize;

    /// Returns true if the accumulated path can take a segment without an added separator.
    fn accepts_segment(acc: &str) -> bool {
        acc.is_empty() || acc.ends_with(Self::is_sep)
    }

    #[inline(always)]
    fn is_sep(ch: char) -> bool {
        ch == Self::SEP || Self::ALT_SEP == Some(ch)
    }
}

/// Paths with a single `/` root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Posix {}

impl Sealed for Posix {}

impl Flavour for Posix {
    const SEP: char = '/';
    const ALT_SEP: Option<char> = None;
    const CASE_INSENSITIVE: bool = false;
    const PERCENT_VARS: bool = false;

    fn root_len(raw: &str) -> usize {
        if raw.starts_with('/') { 1 } else { 0 }
    }
}

/// Paths with drive letters, UNC shares and `\` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Windows {}

impl Sealed for Windows {}

impl Flavour for Windows {
    const SEP: char = '\\';
    const ALT_SEP: Option<char> = Some('/');
    const CASE_INSENSITIVE: bool = true;
    const PERCENT_VARS: bool = true;

    fn root_len(raw: &str) -> usize {
        if let Some(len) = unc_root_len(raw) {
            return len;
        }

        let bytes = raw.as_bytes();
        match bytes {
            [drive, b':', sep, ..] if drive.is_ascii_alphabetic() && Self::is_sep(*sep as char) => 3,
            [drive, b':', ..] if drive.is_ascii_alphabetic() => 2,
            [sep, ..] if Self::is_sep(*sep as char) => 1,
            _ => 0,
        }
    }

    fn accepts_segment(acc: &str) -> bool {
        acc.is_empty()
            || acc.ends_with(Self::is_sep)
            // A bare drive ("C:") takes the segment directly, as in "C:foo".
            || (acc.len() == 2 && Self::root_len(acc) == 2)
    }
}

/// `\\server\share`, where both names are non-empty. Either separator may be used.
fn unc_root_len(raw: &str) -> Option<usize> {
    let mut chars = raw.char_indices();
    match (chars.next(), chars.next()) {
        (Some((_, a)), Some((_, b))) if Windows::is_sep(a) && Windows::is_sep(b) => (),
        _ => None?,
    }

    let body = &raw[2..];
    let server_len = body.find(Windows::is_sep)?;
    if server_len == 0 {
        None?
    }

    let share_start = 2 + server_len + 1;
    let share = &raw[share_start..];
    let share_len = share.find(Windows::is_sep).unwrap_or(share.len());
    if share_len == 0 {
        None?
    }

    Some(share_start + share_len)
}

#[cfg(windows)]
pub type Native = Windows;

/// The flavour of the platform this crate was built for.
#[cfg(not(windows))]
pub type Native = Posix;

/// Splits `raw` into its root and the remainder below it.
///
/// The root is `""` for relative paths, `"/"` for POSIX absolute paths, `"C:\"` or `"C:"` for
/// Windows drive paths, `"\"` for Windows rooted paths and `"\\SERVER\SHARE"` for UNC paths.
/// Separators in both halves are converted to [`Flavour::SEP`], and the separators that follow
/// the root are consumed so that the remainder never starts with one.
///
/// [`join_root`] reverses the split.
///
/// # Examples
/// ```
/// # use unipath::path::{split_root, Posix, Windows};
/// assert_eq!(split_root::<Posix>("/usr/lib"), ("/".into(), "usr/lib".into()));
/// assert_eq!(split_root::<Windows>("C:\\foo\\bar.py"), ("C:\\".into(), "foo\\bar.py".into()));
/// assert_eq!(split_root::<Windows>("\\\\SRV\\SHARE\\foo"), ("\\\\SRV\\SHARE".into(), "foo".into()));
/// ```
pub fn split_root<F: Flavour>(raw: &str) -> (String, String) {
    let len = F::root_len(raw);
    let root = native_seps::<F>(&raw[..len]);
    let rest = native_seps::<F>(raw[len..].trim_start_matches(F::is_sep));
    (root, rest)
}

/// Joins a root and a remainder produced by [`split_root`].
pub fn join_root<F: Flavour>(root: &str, rest: &str) -> String {
    let mut joined = String::from(root);
    if !rest.is_empty() {
        if !F::accepts_segment(&joined) {
            joined.push(F::SEP);
        }
        joined.push_str(rest);
    }
    joined
}

/// Appends one segment to `acc`, following the join rules shared by every constructor.
///
/// An empty segment contributes nothing. A segment with a root replaces everything accumulated so
/// far. Otherwise exactly one separator is placed between the two halves.
pub(crate) fn append<F: Flavour>(acc: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    if F::root_len(segment) > 0 {
        acc.clear();
    } else if !F::accepts_segment(acc) {
        acc.push(F::SEP);
    }
    acc.push_str(segment);
}

pub(crate) fn native_seps<F: Flavour>(value: &str) -> String {
    match F::ALT_SEP {
        Some(alt) => value.replace(alt, &F::SEP.to_string()),
        None => value.to_owned(),
    }
}
