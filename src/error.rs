use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// Errors that can occur when a collection grows its storage.
#[derive(Debug)]
pub enum Error {
    /// The allocator could not provide room for more nodes.
    AllocError(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocError(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocError(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AllocError(error) => write!(f, "failed to allocate node: {}", error),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error::Error as StdError;

    #[test]
    fn test_alloc_error() {
        let mut blocks: Vec<u64> = Vec::new();
        let err = Error::from(blocks.try_reserve(usize::max_value()).unwrap_err());
        assert!(err.to_string().starts_with("failed to allocate node: "));
        assert!(err.source().is_some());
    }
}
