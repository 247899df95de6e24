use thiserror::Error;

pub type GtResult<T> = Result<T, GtError>;

/// Errors raised by gear train construction and mutation.
///
/// Every mutating operation either succeeds completely or returns one of
/// these with the train left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GtError {
    #[error("Validation failed: {what}")]
    Validation { what: &'static str },

    #[error("Gear(s) intersecting: {count} body(ies) overlap the new gear")]
    Intersection { count: usize },

    #[error("Not found: {what} {id}")]
    NotFound { what: &'static str, id: u32 },

    #[error("Invalid operation: {what}")]
    InvalidOperation { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl GtError {
    /// Shorthand for the most common validation failure.
    pub const BORE_TOO_LARGE: GtError = GtError::Validation {
        what: "bore too large: inner radius must be below the root radius",
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_kind() {
        let err = GtError::Intersection { count: 2 };
        assert!(err.to_string().contains("intersecting"));

        let err = GtError::NotFound {
            what: "gear",
            id: 7,
        };
        assert_eq!(err.to_string(), "Not found: gear 7");
    }

    #[test]
    fn bore_message() {
        assert!(GtError::BORE_TOO_LARGE.to_string().contains("bore too large"));
    }
}
