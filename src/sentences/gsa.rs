#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    capabilities::HdopSentence,
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
    values::{Dop, FixMethod, FixMode},
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                      15 16  17
///         | | |                       | |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSA {
    /// Whether 2D/3D switching is automatic or forced
    pub fix_mode: FixMode,
    /// Dimensionality of the current solution
    pub fix_method: FixMethod,
    /// PRN numbers of the satellites used in the fix, up to 12
    pub fix_sats_prn: heapless::Vec<u8, 12>,
    /// Position Dilution of Precision
    pub pdop: Option<Dop>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<Dop>,
    /// Vertical Dilution of Precision
    pub vdop: Option<Dop>,
}

impl GSA {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "GSA")?;
        let f = FieldReader::new(env, "GSA");

        let mut fix_sats_prn = heapless::Vec::new();
        for index in 2..14 {
            if let Some(prn) = f.number(index)? {
                // capacity is exactly the 12 slots scanned
                let _ = fix_sats_prn.push(prn);
            }
        }

        Ok(GSA {
            fix_mode: FixMode::from_code(f.code(0)),
            fix_method: FixMethod::from_code(f.code(1)),
            fix_sats_prn,
            pdop: f.dop(14)?,
            hdop: f.dop(15)?,
            vdop: f.dop(16)?,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let mut words = vec![
            self.fix_mode.code().map(String::from).unwrap_or_default(),
            self.fix_method
                .code()
                .map(String::from)
                .unwrap_or_default(),
        ];
        for slot in 0..12 {
            words.push(fields::format_opt(self.fix_sats_prn.get(slot)));
        }
        words.push(fields::format_opt(self.pdop.map(|d| d.value())));
        words.push(fields::format_opt(self.hdop.map(|d| d.value())));
        words.push(fields::format_opt(self.vdop.map(|d| d.value())));

        Envelope::new("GPGSA", words).with_checksum()
    }
}

impl HdopSentence for GSA {
    fn horizontal_dop(&self) -> Option<Dop> {
        self.hdop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gsa_decoding() {
        let gsa =
            GSA::from_line("$GPGSA,A,3,19,28,14,18,27,22,31,39,,,,,1.7,1.0,1.3*34").unwrap();

        assert_eq!(gsa.fix_mode, FixMode::Automatic);
        assert_eq!(gsa.fix_method, FixMethod::Fix3D);
        assert_eq!(&gsa.fix_sats_prn[..], &[19, 28, 14, 18, 27, 22, 31, 39]);
        assert_eq!(gsa.pdop, Some(Dop(1.7)));
        assert_eq!(gsa.hdop, Some(Dop(1.0)));
        assert_eq!(gsa.vdop, Some(Dop(1.3)));
        assert_eq!(gsa.hdop.unwrap().rating(), crate::values::DopRating::Excellent);
    }

    #[test]
    fn test_gsa_no_fix() {
        let gsa = GSA::from_line("$GPGSA,M,1,,,,,,,,,,,,,,,").unwrap();
        assert_eq!(gsa.fix_mode, FixMode::Manual);
        assert_eq!(gsa.fix_method, FixMethod::NoFix);
        assert!(gsa.fix_sats_prn.is_empty());
        assert_eq!(gsa.pdop, None);
    }

    #[test]
    fn test_gsa_corrupt_prn_fails() {
        assert!(
            GSA::from_line("$GPGSA,A,3,19,XX,14,18,27,22,31,39,,,,,1.7,1.0,1.3").is_err()
        );
    }

    #[test]
    fn test_gsa_round_trip() {
        let original =
            GSA::from_line("$GPGSA,A,3,19,28,14,18,27,22,31,39,,,,,1.7,1.0,1.3*34").unwrap();

        let env = original.to_envelope();
        assert!(env.is_valid());
        assert_eq!(GSA::from_envelope(&env).unwrap(), original);
    }
}
