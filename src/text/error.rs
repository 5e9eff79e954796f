use crate::text::Encoding;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid {encoding} byte sequence at offset {offset}")]
    InvalidSequence { encoding: Encoding, offset: usize },

    #[error("Character {character:?} cannot be represented in {encoding}")]
    Unrepresentable { encoding: Encoding, character: char },

    #[error("Unpaired UTF-16 surrogate at code unit {offset}")]
    UnpairedSurrogate { offset: usize },
}
