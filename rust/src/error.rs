//! Error types for production line analysis.

/// Result type alias using the crate error type.
pub type Result<T> = std::result::Result<T, LineError>;

/// Malformed station input, detected while building the station graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Station name is empty (or whitespace only).
    #[error("Station at position {index} has an empty name")]
    EmptyName { index: usize },

    /// Processing time is not a finite positive number.
    #[error("Station {name:?} has invalid processing time {value} (must be > 0)")]
    InvalidProcessingTime { name: String, value: f64 },

    /// Two stations share a name under case-insensitive comparison.
    #[error("Duplicate station name: {name:?}")]
    DuplicateName { name: String },

    /// Predecessor names a station that does not exist.
    #[error("Station {station:?} references unknown predecessor {predecessor:?}")]
    UnknownPredecessor { station: String, predecessor: String },
}

/// Errors that halt the analysis pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineError {
    /// Input failed validation.
    #[error("Invalid station definition: {0}")]
    Validation(#[from] ValidationError),

    /// Predecessor references loop back on themselves.
    #[error("Circular predecessor chain detected involving: {}", .stations.join(", "))]
    CycleDetected { stations: Vec<String> },
}

impl LineError {
    /// True for input validation failures, false for cycles.
    pub fn is_validation(&self) -> bool {
        matches!(self, LineError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: LineError = ValidationError::DuplicateName {
            name: "Cut".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid station definition: Duplicate station name: \"Cut\""
        );
    }

    #[test]
    fn test_cycle_message_lists_stations() {
        let err = LineError::CycleDetected {
            stations: vec!["A".to_string(), "B".to_string()],
        };
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "Circular predecessor chain detected involving: A, B"
        );
    }
}
