use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    capabilities::{AltitudeSentence, FixQualitySentence, HdopSentence, PositionSentence},
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
    values::{Distance, DistanceUnit, Dop, FixQuality, Position},
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGA {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Position (latitude and longitude)
    pub position: Option<Position>,
    /// GPS quality indicator
    pub fix_quality: FixQuality,
    /// Number of satellites in use
    pub satellite_count: Option<u8>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<Dop>,
    /// Altitude above mean sea level (geoid), meters
    pub altitude: Option<Distance>,
    /// Geoidal separation, meters; negative when the geoid is below the
    /// WGS-84 ellipsoid
    pub geoidal_separation: Option<Distance>,
    /// Age of differential GPS data; empty when DGPS is not used
    pub age_of_dgps: Option<Duration>,
    /// Differential reference station ID
    pub ref_station_id: Option<u16>,
}

impl GGA {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "GGA")?;
        let f = FieldReader::new(env, "GGA");

        Ok(GGA {
            fix_time: f.utc_time(0)?,
            position: f.position(1)?,
            fix_quality: FixQuality::from_code(f.code(5)),
            satellite_count: f.number(6)?,
            hdop: f.dop(7)?,
            altitude: f.distance(8, DistanceUnit::Meters)?,
            geoidal_separation: f.distance(10, DistanceUnit::Meters)?,
            age_of_dgps: f
                .number::<f64>(12)?
                .map(|seconds| Duration::from_millis((seconds * 1000.0) as u64)),
            ref_station_id: f.number(13)?,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let (lat, lat_h, lon, lon_h) = fields::format_position(self.position);
        let words = vec![
            self.fix_time.map(fields::format_time).unwrap_or_default(),
            lat,
            lat_h,
            lon,
            lon_h,
            self.fix_quality
                .code()
                .map(String::from)
                .unwrap_or_default(),
            fields::format_opt(self.satellite_count),
            fields::format_opt(self.hdop.map(|d| d.value())),
            fields::format_opt(self.altitude.map(|a| a.value)),
            "M".to_owned(),
            fields::format_opt(self.geoidal_separation.map(|g| g.value)),
            "M".to_owned(),
            fields::format_opt(self.age_of_dgps.map(|d| d.as_secs_f64())),
            fields::format_opt(self.ref_station_id),
        ];

        Envelope::new("GPGGA", words).with_checksum()
    }
}

impl PositionSentence for GGA {
    fn position(&self) -> Option<Position> {
        self.position
    }
}

impl FixQualitySentence for GGA {
    fn fix_quality(&self) -> FixQuality {
        self.fix_quality
    }
}

impl AltitudeSentence for GGA {
    fn altitude(&self) -> Option<Distance> {
        self.altitude
    }
}

impl HdopSentence for GGA {
    fn horizontal_dop(&self) -> Option<Dop> {
        self.hdop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gga_decoding() {
        let gga =
            GGA::from_line("$GPGGA,092725.00,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,*62")
                .unwrap();

        let t = gga.fix_time.unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (9, 27, 25));

        let p = gga.position.unwrap();
        assert!((p.latitude - (47.0 + 17.113 / 60.0)).abs() < 1e-9);
        assert!((p.longitude - (8.0 + 33.915 / 60.0)).abs() < 1e-9);

        assert_eq!(gga.fix_quality, FixQuality::GpsFix);
        assert_eq!(gga.satellite_count, Some(8));
        assert_eq!(gga.hdop, Some(Dop(1.0)));
        assert_eq!(gga.altitude, Some(Distance::new(499.7, DistanceUnit::Meters)));
        assert_eq!(
            gga.geoidal_separation,
            Some(Distance::new(48.0, DistanceUnit::Meters))
        );
        assert_eq!(gga.age_of_dgps, None);
        assert_eq!(gga.ref_station_id, None);
    }

    #[test]
    fn test_gga_empty_optional_fields() {
        // no fix: everything but the quality indicator omitted
        let gga = GGA::from_line("$GPGGA,,,,,,0,,,,M,,M,,*66").unwrap();
        assert_eq!(gga.fix_time, None);
        assert_eq!(gga.position, None);
        assert_eq!(gga.fix_quality, FixQuality::NoFix);
        assert_eq!(gga.altitude, None, "empty altitude is a sentinel, not an error");
        assert_eq!(gga.hdop, None);
    }

    #[test]
    fn test_gga_corrupt_field_fails() {
        let corrupt = [
            "$GPGGA,092725.00,4717.113,X,00833.915,E,1,08,1.0,499.7,M,48.0,M,,",
            "$GPGGA,092725.00,4717.113,N,00833.915,E,1,A8,1.0,499.7,M,48.0,M,,",
            "$GPGGA,notatime,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,",
        ];
        for line in corrupt {
            assert!(GGA::from_line(line).is_err(), "accepted {line:?}");
        }
    }

    #[test]
    fn test_gga_round_trip() {
        let original =
            GGA::from_line("$GPGGA,092725.00,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,*62")
                .unwrap();

        let env = original.to_envelope();
        assert!(env.is_valid());

        let decoded = GGA::from_envelope(&env).unwrap();
        assert_eq!(decoded.fix_time, original.fix_time);
        assert_eq!(decoded.fix_quality, original.fix_quality);
        assert_eq!(decoded.satellite_count, original.satellite_count);
        let (a, b) = (decoded.position.unwrap(), original.position.unwrap());
        assert!((a.latitude - b.latitude).abs() < 1e-7);
        assert!((a.longitude - b.longitude).abs() < 1e-7);
        assert_eq!(decoded.altitude, original.altitude);
    }

    #[test]
    fn test_gga_decode_is_idempotent() {
        let line = "$GPGGA,092725.00,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,*62";
        assert_eq!(GGA::from_line(line).unwrap(), GGA::from_line(line).unwrap());
    }
}
