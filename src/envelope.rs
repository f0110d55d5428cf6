//! # Sentence Envelope
//!
//! The [`Envelope`] is the tokenized, checksum-checked representation of one
//! NMEA 0183 line, prior to any semantic decoding: the command word, the
//! ordered data fields, and the checksum as found on the wire next to the
//! checksum computed from the payload.
//!
//! Envelope construction never fails. Structurally broken input (no leading
//! `$`, no field delimiter) produces an *invalid* envelope with empty
//! fields; a missing or mismatched checksum likewise only clears
//! [`Envelope::is_valid`]. Corrupt lines are an expected, transient
//! condition on a live link, and the caller decides whether to skip, log,
//! or abort.

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take_until},
    combinator::rest,
};

type NomResult<'a, O> = nom::IResult<&'a str, O, nom::error::Error<&'a str>>;

/// The tokenized form of one NMEA sentence.
///
/// Immutable once constructed: an envelope is created once per line and may
/// be freely shared read-only afterwards.
///
/// # Examples
///
/// ```rust
/// use nmea_stream::Envelope;
///
/// let env = Envelope::parse("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n");
/// assert!(env.is_valid());
/// assert_eq!(env.command_word(), "GPGLL");
/// assert_eq!(env.type_suffix(), "GLL");
/// assert_eq!(env.word(0), Some("4916.45"));
/// assert_eq!(env.word(5), Some("A"));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    command_word: String,
    words: Vec<String>,
    existing_checksum: Option<String>,
    computed_checksum: String,
    is_valid: bool,
}

impl Envelope {
    /// Tokenizes one raw line. Never fails.
    ///
    /// Leading text before the `$` sentinel and trailing CR/LF are
    /// tolerated. A line without a `$`, or without a `,` after the command
    /// word, yields an invalid envelope with empty fields. A line without a
    /// `*CC` trailer yields a populated but invalid envelope with
    /// [`Envelope::existing_checksum`] unset — the path used when building
    /// outgoing sentences.
    pub fn parse(line: &str) -> Envelope {
        let line = line.trim_end();

        let Ok((trailer, payload)) = frame(line) else {
            return Envelope::unframed();
        };

        let existing_checksum = trailer.strip_prefix('*').map(str::to_owned);
        let computed_checksum = checksum_hex(payload);

        // The command word runs to the first delimiter; a sentence with no
        // data fields at all is structurally invalid.
        let Some((command_word, fields)) = payload.split_once(',') else {
            return Envelope {
                command_word: payload.to_owned(),
                words: Vec::new(),
                existing_checksum: None,
                computed_checksum,
                is_valid: false,
            };
        };

        let is_valid = existing_checksum.as_deref() == Some(computed_checksum.as_str());

        Envelope {
            command_word: command_word.to_owned(),
            words: fields.split(',').map(str::to_owned).collect(),
            existing_checksum,
            computed_checksum,
            is_valid,
        }
    }

    /// Builds an outgoing envelope from a command word and ordered fields.
    ///
    /// No checksum is attached yet, so the envelope is not valid; call
    /// [`Envelope::with_checksum`] to finish it.
    pub fn new(command_word: impl Into<String>, words: Vec<String>) -> Envelope {
        let command_word = command_word.into();
        let payload = payload_text(&command_word, &words);

        Envelope {
            command_word,
            words,
            existing_checksum: None,
            computed_checksum: checksum_hex(&payload),
            is_valid: false,
        }
    }

    /// Appends the computed checksum if none is present yet, marking the
    /// envelope valid. An envelope that already carries a checksum is
    /// returned unchanged.
    pub fn with_checksum(self) -> Envelope {
        if self.existing_checksum.is_some() {
            return self;
        }

        Envelope {
            existing_checksum: Some(self.computed_checksum.clone()),
            is_valid: true,
            ..self
        }
    }

    /// Re-encodes the envelope as a wire line, without CR/LF.
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(80);
        line.push('$');
        line.push_str(&payload_text(&self.command_word, &self.words));
        if let Some(cc) = &self.existing_checksum {
            line.push('*');
            line.push_str(cc);
        }
        line
    }

    /// The full command word, e.g. `"GPGGA"`.
    pub fn command_word(&self) -> &str {
        &self.command_word
    }

    /// The last three characters of the command word, e.g. `"GGA"`.
    ///
    /// Talker-ID prefixes vary between devices, so only the suffix is
    /// authoritative for dispatch. Words shorter than three characters come
    /// back whole. Counted in characters, not bytes, so line noise decoded
    /// as multibyte UTF-8 cannot split a character.
    pub fn type_suffix(&self) -> &str {
        match self.command_word.char_indices().rev().nth(2) {
            Some((start, _)) => &self.command_word[start..],
            None => &self.command_word,
        }
    }

    /// The ordered data fields, as found on the wire.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// One data field by index. Out-of-range indices and empty fields both
    /// come back as `None`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words
            .get(index)
            .map(String::as_str)
            .filter(|w| !w.is_empty())
    }

    /// The checksum found on the wire, if any.
    pub fn existing_checksum(&self) -> Option<&str> {
        self.existing_checksum.as_deref()
    }

    /// The checksum computed from the payload, two uppercase hex digits.
    pub fn computed_checksum(&self) -> &str {
        &self.computed_checksum
    }

    /// Whether a checksum was present and case-sensitively equal to the
    /// computed one.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether a line is structurally shaped like an NMEA sentence: a
    /// leading `$` and a checksum marker exactly three characters from the
    /// line end. No checksum verification is performed.
    pub fn looks_like_sentence(line: &str) -> bool {
        let line = line.trim();
        line.starts_with('$') && line.len() >= 4 && line.as_bytes()[line.len() - 3] == b'*'
    }

    fn unframed() -> Envelope {
        Envelope {
            command_word: String::new(),
            words: Vec::new(),
            existing_checksum: None,
            computed_checksum: checksum_hex(""),
            is_valid: false,
        }
    }
}

/// Splits a line into the payload between `$` and `*` and the trailer from
/// `*` onwards (empty when no checksum marker is present). Text before the
/// `$` sentinel is discarded.
fn frame(i: &str) -> NomResult<'_, &str> {
    let (i, _) = take_until("$").parse(i)?;
    let (i, _) = tag("$").parse(i)?;
    let (trailer, payload) = alt((take_until("*"), rest)).parse(i)?;
    Ok((trailer, payload))
}

fn payload_text(command_word: &str, words: &[String]) -> String {
    let mut payload = String::with_capacity(80);
    payload.push_str(command_word);
    for word in words {
        payload.push(',');
        payload.push_str(word);
    }
    payload
}

/// XOR of all payload bytes, rendered as two uppercase hex digits.
///
/// The payload is everything strictly between the `$` prefix and the `*`
/// delimiter, excluding both.
fn checksum_hex(payload: &str) -> String {
    let cc = payload
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte);

    format!("{cc:02X}")
}
