/// Implements the string-like traits shared by every path value: formatting, `&str`/`OsStr`/
/// `std::path::Path` views, comparison against strings and plain concatenation with `+`.
///
/// The type must have an `inner: String` field and implement `PathInternals`.
macro_rules! impl_str_interop {
    ($name:literal, [$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.inner)
            }
        }

        impl<$($generics)*> ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple($name).field(&self.inner).finish()
            }
        }

        impl<$($generics)*> AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.inner
            }
        }

        impl<$($generics)*> AsRef<::std::ffi::OsStr> for $ty {
            fn as_ref(&self) -> &::std::ffi::OsStr {
                self.inner.as_ref()
            }
        }

        impl<$($generics)*> AsRef<::std::path::Path> for $ty {
            fn as_ref(&self) -> &::std::path::Path {
                self.inner.as_ref()
            }
        }

        impl<$($generics)*> ::std::borrow::Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.inner
            }
        }

        impl<$($generics)*> From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.inner
            }
        }

        impl<$($generics)*> From<&str> for $ty {
            fn from(value: &str) -> Self {
                <$ty as $crate::path::PathInternals>::from_raw(value.to_owned())
            }
        }

        impl<$($generics)*> From<String> for $ty {
            fn from(value: String) -> Self {
                <$ty as $crate::path::PathInternals>::from_raw(value)
            }
        }

        impl<$($generics)*> ::std::str::FromStr for $ty {
            type Err = ::std::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(value))
            }
        }

        impl<$($generics)*> PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.inner == other
            }
        }

        impl<$($generics)*> PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.inner == *other
            }
        }

        impl<$($generics)*> PartialEq<String> for $ty {
            fn eq(&self, other: &String) -> bool {
                &self.inner == other
            }
        }

        impl<$($generics)*> PartialEq<$ty> for str {
            fn eq(&self, other: &$ty) -> bool {
                self == other.inner
            }
        }

        impl<$($generics)*> PartialEq<$ty> for &str {
            fn eq(&self, other: &$ty) -> bool {
                *self == other.inner
            }
        }

        /// Plain string concatenation. No separator is inserted, use `join` for that.
        impl<$($generics)*> ::std::ops::Add<&str> for $ty {
            type Output = $ty;

            fn add(mut self, rhs: &str) -> Self::Output {
                self.inner.push_str(rhs);
                self
            }
        }

        impl<$($generics)*> ::std::ops::Add<$ty> for $ty {
            type Output = $ty;

            fn add(mut self, rhs: $ty) -> Self::Output {
                self.inner.push_str(&rhs.inner);
                self
            }
        }

        impl<$($generics)*> ::std::ops::Add<$ty> for &str {
            type Output = $ty;

            fn add(self, rhs: $ty) -> Self::Output {
                <$ty as $crate::path::PathInternals>::from_raw(format!("{self}{}", rhs.inner))
            }
        }
    };
}

pub(crate) use impl_str_interop;
