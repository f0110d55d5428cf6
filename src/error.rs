//! # Error Types
//!
//! This module defines the error types used throughout the NMEA parsing library.
//!
//! Structural problems (a missing `$`, a missing delimiter) and checksum
//! mismatches are deliberately *not* errors: they surface as an invalid
//! [`Envelope`](crate::Envelope) so that callers reading a live stream can
//! skip or log bad lines instead of aborting. Only two things produce an
//! `Err` here: a field that is present but cannot be converted to its
//! expected type (real corruption), and stream faults.

use std::io;

/// Represents all possible errors that can occur while decoding sentences
/// or reading them from a stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field was present in the sentence but its text could not be
    /// converted to the expected type.
    ///
    /// Missing optional fields never produce this error — they resolve to
    /// the domain type's empty sentinel. A present-but-unparsable field is
    /// a corruption signal and must not be silently absorbed.
    #[error("invalid field {index} in {sentence} sentence: {text:?}")]
    InvalidField {
        /// The sentence kind being decoded, e.g. `"GGA"`
        sentence: &'static str,
        /// Zero-based index of the offending field within the envelope
        index: usize,
        /// The offending field text
        text: String,
    },

    /// A typed decoder was handed an envelope of a different kind.
    ///
    /// This can only happen when constructing a typed sentence directly;
    /// the resolver never dispatches to the wrong decoder.
    #[error("expected a {expected} sentence, found {found:?}")]
    WrongSentenceType {
        /// The sentence kind the decoder handles
        expected: &'static str,
        /// The command word actually found
        found: String,
    },

    /// The underlying source stopped producing data and the retry budget
    /// was exhausted. The device is probably disconnected.
    #[error(
        "no data received from the device after {attempts} attempts; device is probably disconnected"
    )]
    Disconnected {
        /// Number of read attempts made before giving up
        attempts: u32,
        /// The last I/O error observed, if the reads failed rather than
        /// returning empty
        #[source]
        source: Option<io::Error>,
    },

    /// Any other I/O failure on the underlying source.
    ///
    /// These propagate immediately, without retries.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_field(sentence: &'static str, index: usize, text: &str) -> Self {
        Error::InvalidField {
            sentence,
            index,
            text: text.to_owned(),
        }
    }
}

/// Holds the result of decoding and reading functions.
pub type Result<T> = std::result::Result<T, Error>;
