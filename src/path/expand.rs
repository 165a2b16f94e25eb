use std::env;

use super::Flavour;

/// The external key-value source consulted by `~` and `$VAR` expansion.
///
/// Any reference the lookup can't resolve is left in the path verbatim.
pub trait Lookup {
    /// The value of the environment variable `name`.
    fn var(&self, name: &str) -> Option<String>;

    /// The home directory of `user`, or of the current user for `None`.
    fn home(&self, user: Option<&str>) -> Option<String>;
}

/// Looks up the process environment and, with the `fs` feature on Linux, the user database.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Lookup for Environment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn home(&self, user: Option<&str>) -> Option<String> {
        match user {
            None => env::var("HOME").ok().filter(|home| !home.is_empty()),
            Some(name) => user_home(name),
        }
    }
}

#[cfg(all(feature = "fs", target_os = "linux"))]
fn user_home(name: &str) -> Option<String> {
    crate::fs::user_home(name)
}

#[cfg(not(all(feature = "fs", target_os = "linux")))]
fn user_home(_name: &str) -> Option<String> {
    None
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn home(&self, user: Option<&str>) -> Option<String> {
        (**self).home(user)
    }
}

/// Replaces a leading `~` or `~user`.
pub(crate) fn expand_user<F: Flavour, L: Lookup + ?Sized>(raw: &str, lookup: &L) -> String {
    let Some(tail) = raw.strip_prefix('~') else {
        return raw.to_owned();
    };

    let end = tail.find(F::is_sep).unwrap_or(tail.len());
    let user = &tail[..end];
    let home = lookup.home(if user.is_empty() { None } else { Some(user) });

    match home {
        Some(home) => {
            let expanded = format!("{}{}", home.trim_end_matches(F::is_sep), &tail[end..]);
            // A home of "/" with nothing after it.
            if expanded.is_empty() { F::SEP.to_string() } else { expanded }
        },
        None => raw.to_owned(),
    }
}

/// Replaces `$NAME`, `${NAME}` and, where the flavour allows it, `%NAME%`.
pub(crate) fn expand_vars<F: Flavour, L: Lookup + ?Sized>(raw: &str, lookup: &L) -> String {
    let mut expanded = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find(|ch| ch == '$' || (F::PERCENT_VARS && ch == '%')) {
        expanded.push_str(&rest[..start]);
        let reference = &rest[start..];

        match parse_reference(reference) {
            Some((name, len)) => {
                match lookup.var(name) {
                    Some(value) => expanded.push_str(&value),
                    None => expanded.push_str(&reference[..len]),
                }
                rest = &reference[len..];
            },
            None => {
                expanded.push_str(&reference[..1]);
                rest = &reference[1..];
            },
        }
    }

    expanded.push_str(rest);
    expanded
}

/// Returns the variable name and the length of the whole reference.
fn parse_reference(reference: &str) -> Option<(&str, usize)> {
    let is_name_char = |ch: char| ch.is_alphanumeric() || ch == '_';

    if let Some(body) = reference.strip_prefix("${") {
        let close = body.find('}')?;
        let name = &body[..close];
        return (!name.is_empty()).then_some((name, close + 3));
    }

    if let Some(body) = reference.strip_prefix('%') {
        let close = body.find('%')?;
        let name = &body[..close];
        return (!name.is_empty() && name.chars().all(is_name_char)).then_some((name, close + 2));
    }

    let body = reference.strip_prefix('$')?;
    let len = body.find(|ch: char| !is_name_char(ch)).unwrap_or(body.len());
    (len > 0).then_some((&body[..len], len + 1))
}
