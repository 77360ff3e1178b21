//! Errors
//!
//! Custom error types used throughout the `focustree` crate.
use thiserror::Error;

/// Errors that can occur while fitting or exporting a tree.
#[derive(Debug, Error)]
pub enum FocusTreeError {
    /// Feature rows and labels differ in length.
    #[error("Data has {0} rows, but {1} labels were provided.")]
    ShapeMismatch(usize, usize),
    /// No rows to fit on.
    #[error("Unable to fit a tree on an empty dataset.")]
    EmptyDataset,
    /// A label outside of the binary classes.
    #[error("Invalid label {0}, expected 0 or 1.")]
    InvalidLabel(f64),
    /// NaN or infinite feature value, the row and column are given.
    #[error("Feature value {0} at row {1}, column {2} is not finite.")]
    NonFiniteValue(f64, usize, usize),
    /// Prediction or export requested before fitting.
    #[error("The classifier has not been fitted yet.")]
    NotFitted,
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
    /// The exported arrays do not describe a valid tree.
    #[error("Invalid tree structure: {0}")]
    InvalidTree(String),
}
