//! Error types for the pure progress core
//!
//! The leveling, streak and achievement functions are total over their
//! typed inputs. These errors only cover precondition violations at the
//! boundary: malformed date strings, out-of-range timestamps, unusable curve
//! settings and unknown achievement identifiers.

/// Error type for precondition violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Invalid practice date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Timestamp {0} ms is outside the supported date range")]
    InvalidTimestamp(i64),

    #[error("Invalid level curve: {0}")]
    InvalidCurve(String),

    #[error("Unknown achievement: {0}")]
    UnknownAchievement(String),
}
