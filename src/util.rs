use crate::{errors::KnnError, types::Result};

/// If the test condition is false, return an InvalidArgument error with
/// the given error message. Otherwise return Ok.
pub(crate) fn check_argument(test: bool, msg: &'static str) -> Result<()> {
    if test {
        Ok(())
    } else {
        Err(KnnError::InvalidArgument { msg })
    }
}

/// Same as [`check_argument`] but for parameters fixed at construction time.
pub(crate) fn check_configuration(test: bool, msg: &'static str) -> Result<()> {
    if test {
        Ok(())
    } else {
        Err(KnnError::InvalidConfiguration { msg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks() {
        assert!(check_argument(true, "unused").is_ok());
        assert_eq!(
            check_argument(false, "bad k"),
            Err(KnnError::InvalidArgument { msg: "bad k" })
        );
        assert_eq!(
            check_configuration(false, "bad leaf size"),
            Err(KnnError::InvalidConfiguration { msg: "bad leaf size" })
        );
    }
}
