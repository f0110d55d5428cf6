//! # NMEA 0183 Stream Parser
//!
//! This library reads, verifies and decodes NMEA 0183 sentences with the
//! format `$HHH,D1,D2,...,Dn*CC\r\n`, from a single line or from a live
//! byte stream.
//!
//! The pipeline has four stages, each usable on its own:
//! - [`Envelope`] — never-failing framing and XOR checksum verification
//! - typed sentence decoders ([`GGA`], [`GLL`], [`GSA`], [`GSV`], [`RMC`],
//!   [`VTG`], [`HDT`], [`ZDA`]) with per-field missing/malformed policy
//! - [`SentenceResolver`] — command-word dispatch with a pluggable fallback
//! - [`NmeaReader`] — blocking stream reads with stall retries and
//!   capability-filtered pulls (`read_position`, `read_speed`, ...)
//!
//! ## Usage
//!
//! ```rust
//! use nmea_stream::NmeaReader;
//! use std::io::Cursor;
//!
//! let feed = Cursor::new("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n");
//! let mut reader = NmeaReader::new(feed);
//!
//! let position = reader.read_position().unwrap();
//! assert!((position.latitude - 49.274166).abs() < 1e-4);
//! ```

pub mod capabilities;
pub mod envelope;
pub mod error;
mod fields;
pub mod reader;
pub mod resolver;
pub mod sentences;
pub mod values;

pub use capabilities::{
    AltitudeSentence, BearingSentence, FixQualitySentence, HdopSentence, HeadingSentence,
    PositionSentence, SpeedSentence, UtcDateTimeSentence,
};
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use reader::{NmeaReader, is_nmea};
pub use resolver::SentenceResolver;
pub use sentences::{GGA, GLL, GSA, GSV, HDT, NmeaSentence, RMC, SatellitesInView, VTG, ZDA};
pub use values::{
    Distance, DistanceUnit, Dop, DopRating, FixMethod, FixMode, FixQuality, FixStatus, Position,
    Satellite, Speed, SpeedUnit,
};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
