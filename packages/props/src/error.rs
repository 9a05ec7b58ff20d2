//! Error types for attribute coercion

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoercionError {
    #[error("Malformed JSON in attribute for field '{field}': {source}")]
    MalformedJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type CoercionResult<T> = Result<T, CoercionError>;
