//! # Call Codec
//!
//! Selector derivation and the argument/return payload codec. Calldata is a
//! selector plus a bincode-encoded argument struct; return data is a
//! bincode-encoded value forwarded verbatim through the dispatcher.

use crate::errors::DispatchError;
use prism_types::{hashing, Bytes, Selector};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Derives the selector for an operation signature.
///
/// Thin re-export of [`prism_types::hashing::selector`] so facet code only
/// imports the abi module.
#[must_use]
pub fn selector(signature: &str) -> Selector {
    hashing::selector(signature)
}

/// Encodes an argument struct into a call payload.
pub fn encode_args<T: Serialize>(args: &T) -> Result<Bytes, DispatchError> {
    bincode::serialize(args)
        .map(Bytes::from_vec)
        .map_err(|err| DispatchError::MalformedCallData {
            reason: err.to_string(),
        })
}

/// Decodes the argument struct a facet operation expects.
pub fn decode_args<T: DeserializeOwned>(input: &[u8]) -> Result<T, DispatchError> {
    bincode::deserialize(input).map_err(|err| DispatchError::MalformedCallData {
        reason: err.to_string(),
    })
}

/// Encodes an operation's return value.
pub fn encode_ret<T: Serialize>(value: &T) -> Result<Bytes, DispatchError> {
    bincode::serialize(value)
        .map(Bytes::from_vec)
        .map_err(|err| DispatchError::MalformedReturnData {
            reason: err.to_string(),
        })
}

/// Decodes a return payload at the call site.
pub fn decode_ret<T: DeserializeOwned>(output: &Bytes) -> Result<T, DispatchError> {
    bincode::deserialize(output.as_slice()).map_err(|err| DispatchError::MalformedReturnData {
        reason: err.to_string(),
    })
}

/// Derives a selector and encodes arguments in one step.
pub fn encode_call<T: Serialize>(
    signature: &str,
    args: &T,
) -> Result<(Selector, Bytes), DispatchError> {
    Ok((selector(signature), encode_args(args)?))
}

// =============================================================================
// TESTS
// =============================================================================
