use thiserror::Error;

/// Errors returned by the array operations.
///
/// Both variants are contract violations on the caller's side. An operation
/// that returns an error has not touched the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The index passed to `get` or `delete` is not below the current length.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `pop` was called on an array with no elements.
    #[error("cannot pop from an empty array")]
    EmptyCollection,
}

impl Error {
    /// Checks `index` against `len`, logging the rejection.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Error> {
        if index < len {
            Ok(())
        } else {
            tracing::debug!(index, len, "index out of range");
            Err(Error::IndexOutOfRange { index, len })
        }
    }
}
