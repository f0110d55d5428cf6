//! # Typed Sentence Decoders
//!
//! One struct per supported message kind, each deriving named,
//! domain-typed properties from an [`Envelope`]'s fields. Every kind offers
//! two construction paths — `from_line` (tokenizes an envelope first) and
//! `from_envelope` (the streaming reader's dispatch hot path, which avoids
//! re-tokenizing) — and `from_line` delegates to `from_envelope`, so the
//! two can never diverge in behavior.
//!
//! Kinds implement the narrow [capability contracts](crate::capabilities)
//! for the data they carry; [`NmeaSentence`] folds those into one enum so
//! generic callers can ask any sentence for a datum without naming a kind.

mod gga;
mod gll;
mod gsa;
mod gsv;
mod hdt;
mod rmc;
mod vtg;
mod zda;

pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use gsv::{GSV, SatellitesInView};
pub use hdt::HDT;
pub use rmc::RMC;
pub use vtg::VTG;
pub use zda::ZDA;

use time::PrimitiveDateTime;

use crate::{
    capabilities::{
        AltitudeSentence, BearingSentence, FixQualitySentence, HdopSentence, HeadingSentence,
        PositionSentence, SpeedSentence, UtcDateTimeSentence,
    },
    envelope::Envelope,
    values::{Distance, Dop, FixQuality, Position, Speed},
};

/// A decoded sentence of any supported kind.
///
/// Each variant wraps the corresponding strongly-typed struct. Command
/// words the resolver does not recognize (and that no registered fallback
/// claims) come back as [`NmeaSentence::Generic`], carrying the raw
/// envelope so callers can still inspect the fields.
///
/// The accessor methods expose the capability contracts uniformly: they
/// yield the datum if this sentence's kind carries it *and* the field was
/// present on the wire.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Geographic Position - Latitude/Longitude
    GLL(GLL),
    /// GPS DOP and active satellites
    GSA(GSA),
    /// Satellites in View
    GSV(GSV),
    /// Recommended Minimum Navigation Information
    RMC(RMC),
    /// Track made good and Ground speed
    VTG(VTG),
    /// Heading - True
    HDT(HDT),
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA(ZDA),
    /// A checksum-valid sentence of an unrecognized kind
    Generic(Envelope),
}

impl NmeaSentence {
    /// The geographic position, where carried (GGA, GLL, RMC).
    pub fn position(&self) -> Option<Position> {
        match self {
            NmeaSentence::GGA(s) => s.position(),
            NmeaSentence::GLL(s) => s.position(),
            NmeaSentence::RMC(s) => s.position(),
            _ => None,
        }
    }

    /// The speed over ground, where carried (RMC, VTG).
    pub fn speed(&self) -> Option<Speed> {
        match self {
            NmeaSentence::RMC(s) => s.speed(),
            NmeaSentence::VTG(s) => s.speed(),
            _ => None,
        }
    }

    /// The course over ground in degrees true, where carried (RMC, VTG).
    pub fn bearing(&self) -> Option<f64> {
        match self {
            NmeaSentence::RMC(s) => s.bearing(),
            NmeaSentence::VTG(s) => s.bearing(),
            _ => None,
        }
    }

    /// The true heading, where carried (HDT).
    pub fn heading(&self) -> Option<f64> {
        match self {
            NmeaSentence::HDT(s) => s.heading(),
            _ => None,
        }
    }

    /// The fix quality indicator, where carried (GGA).
    pub fn fix_quality(&self) -> Option<FixQuality> {
        match self {
            NmeaSentence::GGA(s) => Some(s.fix_quality()),
            _ => None,
        }
    }

    /// The antenna altitude above mean sea level, where carried (GGA).
    pub fn altitude(&self) -> Option<Distance> {
        match self {
            NmeaSentence::GGA(s) => s.altitude(),
            _ => None,
        }
    }

    /// The horizontal dilution of precision, where carried (GGA, GSA).
    pub fn horizontal_dop(&self) -> Option<Dop> {
        match self {
            NmeaSentence::GGA(s) => s.horizontal_dop(),
            NmeaSentence::GSA(s) => s.horizontal_dop(),
            _ => None,
        }
    }

    /// The combined UTC date and time, where carried (RMC, ZDA).
    pub fn utc_datetime(&self) -> Option<PrimitiveDateTime> {
        match self {
            NmeaSentence::RMC(s) => s.utc_datetime(),
            NmeaSentence::ZDA(s) => s.utc_datetime(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SentenceResolver;

    #[test]
    fn test_capability_accessors() {
        let mut resolver = SentenceResolver::new();

        let cases: &[(&str, fn(&NmeaSentence) -> bool)] = &[
            (
                "$GPGGA,092725.00,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,*62",
                |s| {
                    s.position().is_some()
                        && s.altitude().is_some()
                        && s.horizontal_dop().is_some()
                        && s.fix_quality() == Some(FixQuality::GpsFix)
                        && s.speed().is_none()
                },
            ),
            (
                "$GPGLL,4916.45,N,12311.12,W,225444,A*31",
                |s| s.position().is_some() && s.altitude().is_none(),
            ),
            (
                "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
                |s| {
                    s.position().is_some()
                        && s.speed().is_some()
                        && s.bearing().is_some()
                        && s.utc_datetime().is_some()
                },
            ),
            (
                "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48",
                |s| s.speed().is_some() && s.bearing() == Some(54.7) && s.position().is_none(),
            ),
            ("$GPHDT,274.07,T*03", |s| s.heading() == Some(274.07)),
            (
                "$GPZDA,160012.71,11,03,2004,-1,00*7D",
                |s| s.utc_datetime().is_some() && s.heading().is_none(),
            ),
            (
                "$GPGSA,A,3,19,28,14,18,27,22,31,39,,,,,1.7,1.0,1.3*34",
                |s| s.horizontal_dop().is_some() && s.position().is_none(),
            ),
        ];

        for (line, carries) in cases {
            let sentence = resolver.resolve(Envelope::parse(line)).unwrap();
            assert!(carries(&sentence), "wrong capabilities for {line:?}");
        }
    }
}
