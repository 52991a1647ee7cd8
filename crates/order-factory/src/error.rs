//! Error types for the order factory.

use thiserror::Error;

/// Errors raised while configuring the factory or generating orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// More items per order were requested than the factory allows.
    #[error("at most {limit} items per order are supported, requested {requested}")]
    TooManyItems {
        /// Requested item ceiling.
        requested: usize,
        /// Largest supported ceiling.
        limit: usize,
    },

    /// A generated creation timestamp fell outside the representable range.
    #[error("generated timestamp {seconds} is out of range")]
    TimestampOutOfRange {
        /// Seconds since the Unix epoch that failed to convert.
        seconds: i64,
    },
}

#[cfg(test)]
mod tests {
    //! Error message formatting checks.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn too_many_items_names_both_bounds() {
        let err = FactoryError::TooManyItems {
            requested: 99,
            limit: 20,
        };
        let message = err.to_string();
        assert!(message.contains("99"));
        assert!(message.contains("20"));
    }
}
