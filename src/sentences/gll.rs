#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    capabilities::PositionSentence,
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
    values::{FixStatus, Position},
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6
///         |       | |        | |         |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GLL {
    /// Position (latitude and longitude)
    pub position: Option<Position>,
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Whether a fix is currently held
    pub fix_status: FixStatus,
}

impl GLL {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "GLL")?;
        let f = FieldReader::new(env, "GLL");

        Ok(GLL {
            position: f.position(0)?,
            fix_time: f.utc_time(4)?,
            fix_status: FixStatus::from_code(f.code(5)),
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let (lat, lat_h, lon, lon_h) = fields::format_position(self.position);
        let words = vec![
            lat,
            lat_h,
            lon,
            lon_h,
            self.fix_time.map(fields::format_time).unwrap_or_default(),
            self.fix_status
                .code()
                .map(String::from)
                .unwrap_or_default(),
        ];

        Envelope::new("GPGLL", words).with_checksum()
    }
}

impl PositionSentence for GLL {
    fn position(&self) -> Option<Position> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gll_decoding() {
        // 49°16.45'N, 123°11.12'W, 22:54:44 UTC, fix held
        let gll = GLL::from_line("$GPGLL,4916.45,N,12311.12,W,225444,A*31").unwrap();

        let p = gll.position.unwrap();
        assert!((p.latitude - (49.0 + 16.45 / 60.0)).abs() < 1e-9);
        assert!((p.longitude + (123.0 + 11.12 / 60.0)).abs() < 1e-9);

        let t = gll.fix_time.unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (22, 54, 44));

        assert_eq!(gll.fix_status, FixStatus::Fix);
    }

    #[test]
    fn test_gll_no_fix() {
        let gll = GLL::from_line("$GPGLL,,,,,,V*?!").unwrap();
        assert_eq!(gll.position, None);
        assert_eq!(gll.fix_time, None);
        assert_eq!(gll.fix_status, FixStatus::NoFix);
    }

    #[test]
    fn test_gll_corrupt_fields_fail() {
        assert!(GLL::from_line("$GPGLL,abc,N,12311.12,W,225444,A").is_err());
        assert!(GLL::from_line("$GPGLL,4916.45,N,def,W,225444,A").is_err());
        assert!(GLL::from_line("$GPGLL,4916.45,N,12311.12,W,25,A").is_err());
    }

    #[test]
    fn test_gll_wrong_sentence_type() {
        assert!(GLL::from_line("$GPGGA,,,,,,0,,,,M,,M,,*66").is_err());
    }

    #[test]
    fn test_gll_round_trip() {
        let original = GLL::from_line("$GPGLL,4916.45,N,12311.12,W,225444,A*31").unwrap();

        let env = original.to_envelope();
        assert!(env.is_valid());

        let decoded = GLL::from_envelope(&env).unwrap();
        let (a, b) = (decoded.position.unwrap(), original.position.unwrap());
        assert!((a.latitude - b.latitude).abs() < 1e-7);
        assert!((a.longitude - b.longitude).abs() < 1e-7);
        assert_eq!(decoded.fix_time, original.fix_time);
        assert_eq!(decoded.fix_status, original.fix_status);
    }
}
