use allocator_api2::alloc::AllocError;

/// Errors reported by the fallible list and cursor operations.
///
/// The infallible operations (`push_back`, `insert`, ...) follow the
/// standard containers and abort via [`handle_alloc_error`] when the
/// allocator fails; the `try_` variants surface [`Error::Alloc`] instead
/// and leave the list exactly as it was before the call.
///
/// [`handle_alloc_error`]: allocator_api2::alloc::handle_alloc_error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The allocator could not provide storage for one node. Nothing was
    /// linked and the length is unchanged.
    #[error("node allocation failed")]
    Alloc,

    /// A checked cursor move would have crossed the ghost node in the
    /// forbidden direction. The cursor stays put.
    #[error("cursor move would cross the ghost node")]
    GhostBoundary,

    /// A position beyond the current length was requested.
    #[error("position {index} out of bounds for a list of length {len}")]
    OutOfBounds {
        /// The requested position.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },
}

impl From<AllocError> for Error {
    fn from(_: AllocError) -> Self {
        Error::Alloc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::Alloc.to_string(), "node allocation failed");
        assert_eq!(
            Error::OutOfBounds { index: 7, len: 3 }.to_string(),
            "position 7 out of bounds for a list of length 3"
        );
    }

    #[test]
    fn alloc_error_converts() {
        let err: Error = AllocError.into();
        assert_eq!(err, Error::Alloc);
    }
}
