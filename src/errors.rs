use std::error::Error;
use std::fmt;

/// Errors that can be returned by tree operations.
#[derive(Debug, PartialEq)]
pub enum KnnError {
    /// The tree was configured with parameters it cannot work with.
    InvalidConfiguration {
        msg: &'static str,
    },
    /// A query or constructor was handed an argument outside its domain.
    InvalidArgument {
        msg: &'static str,
    },
}

impl fmt::Display for KnnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KnnError::InvalidConfiguration { msg } => write!(f, "invalid configuration: {}", msg),
            KnnError::InvalidArgument { msg } => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl Error for KnnError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = KnnError::InvalidArgument { msg: "k must be at least 1" };
        assert_eq!(err.to_string(), "invalid argument: k must be at least 1");

        let err = KnnError::InvalidConfiguration { msg: "max leaf size must be at least 1" };
        assert_eq!(err.to_string(), "invalid configuration: max leaf size must be at least 1");
    }
}
