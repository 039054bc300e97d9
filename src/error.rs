//! Error types for town generation

use std::fmt;

/// Errors that can occur during town generation
///
/// Every variant except `InvalidConfig` aborts a single generation attempt;
/// the retry loop in [`crate::Model::generate`] reseeds and starts over until
/// the retry budget is exhausted.
#[derive(Debug, Clone, PartialEq)]
pub enum TownError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// The walled area exposes no usable gate candidates
    BadWalledShape,
    /// The citadel parcel is too irregular to host a castle
    BadCitadelShape {
        /// Isoperimetric compactness of the rejected parcel
        compactness: f64,
    },
    /// The pathfinder could not connect a gate to the plaza or center
    UnroutableStreet,
    /// A geometry routine received input it cannot act on
    DegenerateGeometry(&'static str),
    /// All generation attempts failed
    RetriesExhausted {
        /// Number of attempts made before giving up
        attempts: usize,
    },
}

impl TownError {
    /// Whether the retry loop should reseed and try again after this error
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            TownError::InvalidConfig(_) | TownError::RetriesExhausted { .. }
        )
    }
}

impl fmt::Display for TownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TownError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TownError::BadWalledShape => write!(f, "bad walled area shape: no gate candidates"),
            TownError::BadCitadelShape { compactness } => {
                write!(f, "bad citadel shape: compactness {:.3}", compactness)
            }
            TownError::UnroutableStreet => write!(f, "unable to build a street"),
            TownError::DegenerateGeometry(what) => write!(f, "degenerate geometry: {}", what),
            TownError::RetriesExhausted { attempts } => {
                write!(f, "generation failed after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for TownError {}

/// Result type alias for town generation operations
pub type Result<T> = std::result::Result<T, TownError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TownError::BadWalledShape.is_retryable());
        assert!(TownError::UnroutableStreet.is_retryable());
        assert!(TownError::BadCitadelShape { compactness: 0.5 }.is_retryable());
        assert!(TownError::DegenerateGeometry("cut").is_retryable());
        assert!(!TownError::InvalidConfig("n".into()).is_retryable());
        assert!(!TownError::RetriesExhausted { attempts: 10 }.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = TownError::BadCitadelShape { compactness: 0.612 };
        assert!(err.to_string().contains("0.612"));
    }
}
