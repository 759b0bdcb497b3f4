use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid coordinate '{input}': expected three finite numbers as \"x,y,z\"")]
    InvalidCoordinate { input: String },

    #[error("Invalid rotation {degrees}: must be a multiple of 90 degrees")]
    InvalidRotation { degrees: i64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
