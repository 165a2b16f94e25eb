//! Paths on the host filesystem.
//!
//! [`Path`] extends the pure string algebra of [`crate::path`] with queries and changes backed by
//! thin `libc` wrappers. Operations block and map one-to-one onto host calls, except for the
//! recursive ones (`mkdir` with parents, `rmtree`, `copy_tree`, `walk` and friends) which are built
//! from several. Nothing here is atomic across calls.
#![cfg(target_os = "linux")]

mod dir;
mod error;
mod fd;
mod file_type;
mod filter;
mod metadata;
mod path;
mod syscall;
mod tools;
mod tree;

#[cfg(test)]
mod tests;

pub use dir::{ListOptions, Listing, Walk};
pub use error::*;
pub use file_type::*;
pub use filter::*;
pub use metadata::*;
pub use path::*;
pub use tools::*;
pub use tree::Sources;

pub(crate) use syscall::user_home;
