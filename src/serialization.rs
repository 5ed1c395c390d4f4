//! Serialization of fitted transformer parameters.
//!
//! Fitted transformers expose their learned state as plain-data params
//! structs. This module provides the byte-level encoding for those structs
//! without coupling transformer code to a specific format.

use std::error::Error;

/// A parameter representation that can be serialized to and from bytes.
///
/// Implementors should contain only plain data (numbers, strings, vectors),
/// never references into the table they were fitted on.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}
