//! # Streaming Reader
//!
//! Pulls sentences off a blocking byte source, one line at a time. The
//! reader owns a [`SentenceResolver`] and layers three levels of service on
//! top of [`BufRead`]:
//!
//! 1. [`read_sentence`](NmeaReader::read_sentence) — one raw line as an
//!    [`Envelope`], retrying transient stalls a bounded number of times;
//! 2. [`read_valid_sentence`](NmeaReader::read_valid_sentence) — skips
//!    checksum failures without bound;
//! 3. [`read_typed_sentence`](NmeaReader::read_typed_sentence) and the
//!    capability-filtered `read_*` methods — typed decoding on top of that.
//!
//! A zero-byte read or a `TimedOut`/`WouldBlock` error is treated as a
//! stall: serial devices pause between bursts, so the reader sleeps and
//! tries again up to the retry budget before concluding the device is gone.
//! Every other I/O error propagates immediately.

use std::{
    io::{self, BufRead},
    thread,
    time::Duration,
};

use log::{debug, warn};
use time::PrimitiveDateTime;

use crate::{
    envelope::Envelope,
    error::{Error, Result},
    resolver::SentenceResolver,
    sentences::NmeaSentence,
    values::{Distance, Dop, FixQuality, Position, Speed},
};

const DEFAULT_RETRY_PAUSE: Duration = Duration::from_millis(100);
const DEFAULT_MAX_RETRIES: u32 = 4;

/// How many lines [`is_nmea`] inspects before giving up.
const SNIFF_LINES: usize = 10;

/// A synchronous, blocking sentence reader over any [`BufRead`] source.
///
/// Not internally synchronized; wrap it in a `Mutex` if it must be shared.
#[derive(Debug)]
pub struct NmeaReader<R: BufRead> {
    source: R,
    resolver: SentenceResolver,
    retry_pause: Duration,
    max_retries: u32,
}

impl<R: BufRead> NmeaReader<R> {
    pub fn new(source: R) -> Self {
        NmeaReader {
            source,
            resolver: SentenceResolver::new(),
            retry_pause: DEFAULT_RETRY_PAUSE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Overrides the stall retry budget. Tests pass `Duration::ZERO` to
    /// avoid sleeping.
    pub fn with_retry(mut self, pause: Duration, max_retries: u32) -> Self {
        self.retry_pause = pause;
        self.max_retries = max_retries;
        self
    }

    /// Registers a fallback decoder for command words the built-in table
    /// does not recognize. See [`SentenceResolver::set_fallback`].
    pub fn on_unresolved(
        &mut self,
        fallback: impl FnMut(&Envelope) -> Option<NmeaSentence> + Send + 'static,
    ) {
        self.resolver.set_fallback(fallback);
    }

    /// Reads the next line and frames it as an [`Envelope`], valid or not.
    ///
    /// Stalls (zero-byte reads, `TimedOut`, `WouldBlock`) are retried up to
    /// the budget with a pause in between, then reported as
    /// [`Error::Disconnected`]. Any other I/O error propagates immediately.
    pub fn read_sentence(&mut self) -> Result<Envelope> {
        let mut line = String::new();
        let mut attempts = 0;

        loop {
            line.clear();
            let stall = match self.source.read_line(&mut line) {
                Ok(0) => None,
                Ok(_) => return Ok(Envelope::parse(&line)),
                Err(e) if is_stall(&e) => Some(e),
                Err(e) => return Err(e.into()),
            };

            attempts += 1;
            if attempts > self.max_retries {
                return Err(Error::Disconnected {
                    attempts,
                    source: stall,
                });
            }
            match &stall {
                Some(e) => warn!("read stalled ({e}); retry {attempts} of {}", self.max_retries),
                None => warn!("empty read; retry {attempts} of {}", self.max_retries),
            }
            thread::sleep(self.retry_pause);
        }
    }

    /// Reads until a sentence with a matching checksum arrives.
    ///
    /// Invalid lines are skipped without bound; a noisy line on a live feed
    /// is routine, not fatal.
    pub fn read_valid_sentence(&mut self) -> Result<Envelope> {
        loop {
            let env = self.read_sentence()?;
            if env.is_valid() {
                return Ok(env);
            }
            debug!("skipping sentence with bad checksum: {:?}", env.to_line());
        }
    }

    /// Reads the next checksum-valid sentence and decodes it.
    ///
    /// Unrecognized kinds come back as [`NmeaSentence::Generic`].
    pub fn read_typed_sentence(&mut self) -> Result<NmeaSentence> {
        let env = self.read_valid_sentence()?;
        self.resolver.resolve(env)
    }

    /// Reads until a sentence carrying a position arrives.
    ///
    /// Consumes nothing past the matching sentence.
    pub fn read_position(&mut self) -> Result<Position> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.position() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying a speed over ground arrives.
    pub fn read_speed(&mut self) -> Result<Speed> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.speed() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying a course over ground arrives.
    pub fn read_bearing(&mut self) -> Result<f64> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.bearing() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying a true heading arrives.
    pub fn read_heading(&mut self) -> Result<f64> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.heading() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying a fix quality indicator arrives.
    pub fn read_fix_quality(&mut self) -> Result<FixQuality> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.fix_quality() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying an altitude arrives.
    pub fn read_altitude(&mut self) -> Result<Distance> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.altitude() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying a horizontal DOP arrives.
    pub fn read_hdop(&mut self) -> Result<Dop> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.horizontal_dop() {
                return Ok(found);
            }
        }
    }

    /// Reads until a sentence carrying a full UTC date and time arrives.
    pub fn read_utc_datetime(&mut self) -> Result<PrimitiveDateTime> {
        loop {
            if let Some(found) = self.read_typed_sentence()?.utc_datetime() {
                return Ok(found);
            }
        }
    }

    /// Gives the underlying source back, discarding the reader.
    pub fn into_inner(self) -> R {
        self.source
    }
}

fn is_stall(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}

/// Sniffs a source to decide whether it speaks NMEA 0183.
///
/// Reads up to ten lines and reports whether any of them has sentence shape
/// (leading `$`, `*` three characters from the end). Consumes the inspected
/// lines; I/O errors of any kind yield `false`.
pub fn is_nmea<R: BufRead>(source: &mut R) -> bool {
    let mut line = String::new();
    for _ in 0..SNIFF_LINES {
        line.clear();
        match source.read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {
                if Envelope::looks_like_sentence(&line) {
                    return true;
                }
            }
        }
    }
    false
}
