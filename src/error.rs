//! Error types for child-set bookkeeping.

use thiserror::Error;

/// Error variants for child-set operations.
///
/// Each variant corresponds to a contract violation by the caller; see
/// [`crate::ChildSet`] for which operations report which variants and how
/// strict mode changes the reporting.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A regular index was provided that no visible child occupies.
    #[error("regular index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The element is not a child of the underlying container.
    #[error("element is not a child of the container")]
    NotAChild,

    /// `hide` was called for a child that is already hidden.
    #[error("child at physical index {0} is already hidden")]
    AlreadyHidden(usize),

    /// `unhide` was called for a child that is not hidden.
    #[error("child at physical index {0} is not hidden")]
    NotHidden(usize),

    /// An index query was made for a hidden child, which has no regular index.
    #[error("child at physical index {0} is hidden and has no regular index")]
    HiddenChild(usize),
}

/// A specialized Result type for child-set operations.
pub type Result<T> = std::result::Result<T, Error>;
