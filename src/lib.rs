//! Paths as immutable string values, with filesystem operations layered on top.
//!
//! # Layers
//! The crate is split in two. [`path`] is pure: [`PurePath`](path::PurePath) wraps a path string
//! and computes roots, components, parents, joins and normalized forms from the string alone,
//! for POSIX or Windows conventions on any host. [`fs`] adds [`Path`](fs::Path), which has the
//! same string algebra (through the [`PathLike`](path::PathLike) trait) plus stat, listing,
//! walking, linking, copying and removal.
//!
//! The string is the identity of a path. Equality, ordering and hashing compare spellings, so
//! `a/b` and `a/./b` are different keys until normalized, and two paths to one file through a
//! symlink are different values.
//!
//! # Normalization
//! Construction keeps the joined string as given. [`PathOptions`](path::PathOptions) carries an
//! explicit policy (a default plus a per-call override) for callers who want every new value
//! normalized. There is no global switch.
//!
//! Normalization is lexical. `a/link/..` becomes `a` even if `link` is a symlink to somewhere
//! else, which is wrong in that case. [`Path::resolve`](fs::Path::resolve) asks the host instead.
//!
//! # Error Handling
//! Errors are strongly typed, with one struct per kind and an enum for the union:
//! [`UsageError`](path::UsageError) for a bad argument, [`SecurityError`](path::SecurityError)
//! for a child name that escapes its parent, and in [`fs`], [`NotFoundError`](fs::NotFoundError)
//! and [`HostIOError`](fs::HostIOError) under [`FsError`](fs::FsError). Host failures keep
//! their raw error code.
//!
//! The convenience operations (`mkdir`, `rmdir`, `rmtree`, `remove`, `needs_update`) treat
//! "already there" and "already gone" as success. Those cases are reported through `tracing` at
//! debug or trace level and nothing else is. No subscriber is installed by this crate.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its thin syscall wrappers, `glob` for name patterns
//! and `tracing` for the diagnostics above. It is only built on Linux, with the default `fs`
//! feature. Without it, the pure layer has no dependencies beyond derive macros.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "fs")]
pub mod fs;
pub mod path;

pub(crate) mod util;
