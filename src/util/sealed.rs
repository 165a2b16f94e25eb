/// Prevents downstream crates from implementing marker traits such as
/// [`Flavour`](crate::path::Flavour).
pub trait Sealed {}
