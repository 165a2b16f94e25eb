use derive_more::{Display, Error, IsVariant};

#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("invalid usage: {message}")]
pub struct UsageError {
    pub message: String,
}

impl UsageError {
    pub(crate) fn new<M: Into<String>>(message: M) -> UsageError {
        UsageError {
            message: message.into(),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum UnsafeReason {
    #[display("component is empty")]
    Empty,
    #[display("component contains a path separator")]
    Separator,
    #[display("component is the current directory specifier")]
    CurrentDir,
    #[display("component is the parent directory specifier")]
    ParentDir,
    #[display("component has a root or drive of its own")]
    Rooted,
}

/// A child component that would name something other than a direct child.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("unsafe child {component:?}: {reason}")]
pub struct SecurityError {
    pub component: String,
    pub reason: UnsafeReason,
}
