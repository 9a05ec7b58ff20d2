//! Error types for element definition and instances

use lite_props::CoercionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElementError {
    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    #[error("Element '{element}' has no property '{name}'")]
    UnknownProperty { element: String, name: String },
}

#[derive(Error, Debug)]
pub enum DefineError {
    #[error("Element definition is missing a name")]
    MissingName,

    #[error("Invalid element manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type ElementResult<T> = Result<T, ElementError>;
