//! Error types for invert interpolation.

use sn_core::SnError;
use thiserror::Error;

/// Errors that stop interpolation before it touches the network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvertError {
    #[error("Invalid interpolation settings: {0}")]
    Settings(#[from] SnError),
}

pub type InvertResult<T> = Result<T, InvertError>;
