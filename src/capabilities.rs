//! # Capability Contracts
//!
//! Narrow read-only traits implemented by the sentence kinds that carry a
//! given datum. Generic callers can ask for "the next sentence with
//! capability X" — see the `read_*` methods on
//! [`NmeaReader`](crate::NmeaReader) — without naming a concrete kind.
//!
//! All accessors return the decoded value *if the sentence carried it*: a
//! kind can implement a capability and still yield `None` on a particular
//! sentence whose optional field was omitted (e.g. a GGA with no fix has no
//! position).

use time::PrimitiveDateTime;

use crate::values::{Distance, Dop, FixQuality, Position, Speed};

/// Exposes a geographic position.
pub trait PositionSentence {
    fn position(&self) -> Option<Position>;
}

/// Exposes a speed over ground.
pub trait SpeedSentence {
    fn speed(&self) -> Option<Speed>;
}

/// Exposes a bearing (course over ground), degrees true, 0-360.
pub trait BearingSentence {
    fn bearing(&self) -> Option<f64>;
}

/// Exposes a heading (direction the vehicle points), degrees true, 0-360.
pub trait HeadingSentence {
    fn heading(&self) -> Option<f64>;
}

/// Exposes the quality of the current fix.
pub trait FixQualitySentence {
    fn fix_quality(&self) -> FixQuality;
}

/// Exposes an altitude above mean sea level.
pub trait AltitudeSentence {
    fn altitude(&self) -> Option<Distance>;
}

/// Exposes a horizontal dilution of precision.
pub trait HdopSentence {
    fn horizontal_dop(&self) -> Option<Dop>;
}

/// Exposes a combined UTC date and time-of-day.
pub trait UtcDateTimeSentence {
    fn utc_datetime(&self) -> Option<PrimitiveDateTime>;
}
