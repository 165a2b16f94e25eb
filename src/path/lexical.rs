//! String algebra over a single flavour. Nothing here touches the filesystem, so `..` is always
//! resolved lexically, which is wrong when the preceding component is a symlink.

use std::iter;

use super::flavour::{self, Flavour, join_root, split_root};

pub(crate) const CUR_DIR: &str = ".";
pub(crate) const PAR_DIR: &str = "..";

/// Collapses `.`, `..` and repeated separators, and converts to the native separator.
///
/// Case is left untouched, callers decide whether to fold it.
pub(crate) fn collapse<F: Flavour>(raw: &str) -> String {
    let (root, rest) = split_root::<F>(raw);
    let mut parts: Vec<&str> = Vec::new();

    for part in rest.split(F::is_sep) {
        match part {
            "" | CUR_DIR => (),
            PAR_DIR => match parts.last() {
                Some(&last) if last != PAR_DIR => {
                    parts.pop();
                },
                // "/.." stays "/".
                _ if !root.is_empty() => (),
                _ => parts.push(PAR_DIR),
            },
            part => parts.push(part),
        }
    }

    let joined = join_root::<F>(&root, &parts.join(&F::SEP.to_string()));
    if joined.is_empty() {
        CUR_DIR.to_owned()
    } else {
        joined
    }
}

pub(crate) fn normalize<F: Flavour>(raw: &str) -> String {
    fold_case::<F>(collapse::<F>(raw))
}

pub(crate) fn normalize_case<F: Flavour>(raw: &str) -> String {
    if F::CASE_INSENSITIVE {
        fold_case::<F>(flavour::native_seps::<F>(raw))
    } else {
        raw.to_owned()
    }
}

fn fold_case<F: Flavour>(value: String) -> String {
    if F::CASE_INSENSITIVE {
        value.to_lowercase()
    } else {
        value
    }
}

pub(crate) fn components<F: Flavour>(raw: &str) -> Vec<String> {
    let (root, rest) = split_root::<F>(raw);
    iter::once(root)
        .chain(rest.split(F::is_sep).filter(|part| !part.is_empty()).map(str::to_owned))
        .collect()
}

pub(crate) fn join_parts<F: Flavour, S: AsRef<str>>(parts: &[S]) -> String {
    let mut joined = String::new();
    for part in parts {
        flavour::append::<F>(&mut joined, part.as_ref());
    }
    joined
}

pub(crate) fn parent<F: Flavour>(raw: &str) -> String {
    let (root, rest) = split_root::<F>(raw);
    let parts: Vec<&str> = rest.split(F::is_sep).filter(|part| !part.is_empty()).collect();

    match parts.split_last() {
        Some((_, init)) if !init.is_empty() => join_root::<F>(&root, &init.join(&F::SEP.to_string())),
        _ if !root.is_empty() => root,
        _ => CUR_DIR.to_owned(),
    }
}

pub(crate) fn name<F: Flavour>(raw: &str) -> &str {
    let rest = raw[F::root_len(raw)..].trim_end_matches(F::is_sep);
    match rest.rfind(F::is_sep) {
        Some(index) => &rest[index + 1..],
        None => rest.trim_start_matches(F::is_sep),
    }
}

/// The suffix of `name` starting at its last dot. Leading dots never start an extension, so
/// `.bashrc` has none.
pub(crate) fn extension(name: &str) -> &str {
    let lead = name.len() - name.trim_start_matches('.').len();
    match name[lead..].rfind('.') {
        Some(index) => &name[lead + index..],
        None => "",
    }
}

/// Builds the path leading from the directory `origin` to `dest`. Both should already be
/// absolute, or both relative to the same place.
///
/// Components are compared case-folded on case-insensitive flavours, but the destination keeps
/// its own spelling. When the roots differ there is no relative route, so `dest` is returned.
pub(crate) fn rel_path<F: Flavour>(origin: &str, dest: &str) -> String {
    let mut origin = components::<F>(&normalize::<F>(origin));
    let dest_raw = collapse::<F>(dest);
    let mut dest = components::<F>(&dest_raw);
    // A normalized "." is the only place a current-dir component can survive.
    origin.retain(|part| part != CUR_DIR);
    dest.retain(|part| part != CUR_DIR);

    if origin[0] != normalize_case::<F>(&dest[0]) {
        return dest_raw;
    }

    let common = origin
        .iter()
        .zip(dest.iter())
        .take_while(|(orig, dest)| **orig == normalize_case::<F>(dest))
        .count();

    let segments: Vec<&str> = iter::repeat_n(PAR_DIR, origin.len() - common)
        .chain(dest[common..].iter().map(String::as_str))
        .collect();

    if segments.is_empty() {
        CUR_DIR.to_owned()
    } else {
        join_parts::<F, _>(&segments)
    }
}
