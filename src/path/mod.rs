//! Pure path values. Nothing in this module touches the filesystem.
//!
//! [`PurePath`] is the value type, [`PathLike`] carries its string algebra and [`PathOptions`]
//! builds new values under an explicit normalization policy. The [`Flavour`] parameter selects
//! POSIX or Windows conventions independently of the host.

mod error;
mod expand;
mod flavour;
mod interop;
mod iter;
mod lexical;
mod options;
mod path_like;
mod pure_path;
mod segment;


pub use error::*;
pub use expand::{Environment, Lookup};
pub use flavour::{Flavour, Native, Posix, Windows, join_root, split_root};
pub use iter::*;
pub use options::*;
pub use path_like::PathLike;
pub use pure_path::*;
pub use segment::*;

pub(crate) use interop::impl_str_interop;
pub(crate) use lexical::CUR_DIR;
pub(crate) use path_like::sealed::PathInternals;
