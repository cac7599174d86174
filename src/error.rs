use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by every fallible formula in the crate.
pub type Result<T> = std::result::Result<T, QdwbError>;

/// Failure kinds raised by the QDWB formulas and their input checks.
#[derive(Error, Debug)]
pub enum QdwbError {
    /// A scalar input failed a physical-plausibility check.
    #[error("invalid input `{name}` = {value}: {reason}")]
    InvalidInput {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A method selector did not match any name in its formula family.
    #[error("unknown {family} method `{method}`")]
    UnknownMethod {
        family: &'static str,
        method: String,
    },

    /// The modeling date lies outside the growing season that starts at the plant date.
    #[error(
        "modeling date {modeling_date} is outside the season planted on {plant_date} \
         (day {n_day} of {season_length})"
    )]
    InvalidDateRange {
        plant_date: String,
        modeling_date: String,
        n_day: i64,
        season_length: u32,
    },

    /// A first-step or previous-step value was required but not supplied.
    #[error("missing state input `{name}`")]
    MissingStateInput { name: &'static str },

    /// A denominator evaluated to zero.
    #[error("division by zero: {quantity} is zero")]
    DivisionByZero { quantity: &'static str },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid crop table: {message}")]
    Config { message: String },
}

impl QdwbError {
    pub(crate) fn invalid_input(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        QdwbError::InvalidInput {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
