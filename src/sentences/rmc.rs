#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    capabilities::{BearingSentence, PositionSentence, SpeedSentence, UtcDateTimeSentence},
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
    values::{FixStatus, Position, Speed, SpeedUnit},
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RMC {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Whether a fix is currently held
    pub fix_status: FixStatus,
    /// Position (latitude and longitude)
    pub position: Option<Position>,
    /// Speed over ground, knots
    pub speed: Option<Speed>,
    /// Course over ground in degrees true, 0-360
    pub bearing: Option<f64>,
    /// Fix date in UTC
    pub fix_date: Option<time::Date>,
    /// Magnetic variation in degrees; negative is West
    pub magnetic_variation: Option<f64>,
}

impl RMC {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "RMC")?;
        let f = FieldReader::new(env, "RMC");

        let magnetic_variation = match f.number::<f64>(9)? {
            None => None,
            Some(variation) => match f.code(10) {
                Some('E') => Some(variation),
                Some('W') => Some(-variation),
                _ => return Err(f.invalid(10)),
            },
        };

        Ok(RMC {
            fix_time: f.utc_time(0)?,
            fix_status: FixStatus::from_code(f.code(1)),
            position: f.position(2)?,
            speed: f.speed(6, SpeedUnit::Knots)?,
            bearing: f.bearing(7)?,
            fix_date: f.utc_date(8)?,
            magnetic_variation,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let (lat, lat_h, lon, lon_h) = fields::format_position(self.position);
        let (variation, variation_h) = match self.magnetic_variation {
            Some(v) if v < 0.0 => ((-v).to_string(), "W".to_owned()),
            Some(v) => (v.to_string(), "E".to_owned()),
            None => Default::default(),
        };

        let words = vec![
            self.fix_time.map(fields::format_time).unwrap_or_default(),
            self.fix_status
                .code()
                .map(String::from)
                .unwrap_or_default(),
            lat,
            lat_h,
            lon,
            lon_h,
            fields::format_opt(self.speed.map(|s| s.to_knots())),
            fields::format_opt(self.bearing),
            self.fix_date.map(fields::format_date).unwrap_or_default(),
            variation,
            variation_h,
        ];

        Envelope::new("GPRMC", words).with_checksum()
    }
}

impl PositionSentence for RMC {
    fn position(&self) -> Option<Position> {
        self.position
    }
}

impl SpeedSentence for RMC {
    fn speed(&self) -> Option<Speed> {
        self.speed
    }
}

impl BearingSentence for RMC {
    fn bearing(&self) -> Option<f64> {
        self.bearing
    }
}

impl UtcDateTimeSentence for RMC {
    fn utc_datetime(&self) -> Option<PrimitiveDateTime> {
        match (self.fix_date, self.fix_time) {
            (Some(date), Some(time)) => Some(PrimitiveDateTime::new(date, time)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

    #[test]
    fn test_rmc_decoding() {
        let rmc = RMC::from_line(LINE).unwrap();

        let t = rmc.fix_time.unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (12, 35, 19));
        assert_eq!(rmc.fix_status, FixStatus::Fix);

        let p = rmc.position.unwrap();
        assert!((p.latitude - (48.0 + 7.038 / 60.0)).abs() < 1e-9);
        assert!((p.longitude - (11.0 + 31.0 / 60.0)).abs() < 1e-9);

        assert_eq!(rmc.speed, Some(Speed::new(22.4, SpeedUnit::Knots)));
        assert_eq!(rmc.bearing, Some(84.4));

        let d = rmc.fix_date.unwrap();
        assert_eq!((d.year(), d.month() as u8, d.day()), (1994, 3, 23));

        assert_eq!(rmc.magnetic_variation, Some(-3.1));
    }

    #[test]
    fn test_rmc_utc_datetime_capability() {
        let rmc = RMC::from_line(LINE).unwrap();
        let dt = rmc.utc_datetime().unwrap();
        assert_eq!((dt.year(), dt.hour(), dt.minute()), (1994, 12, 35));

        // time without date yields no combined value
        let rmc = RMC::from_line("$GPRMC,123519,V,,,,,,,,,").unwrap();
        assert_eq!(rmc.utc_datetime(), None);
    }

    #[test]
    fn test_rmc_corrupt_fields_fail() {
        assert!(RMC::from_line("$GPRMC,123519,A,4807.038,N,01131.000,E,abc,084.4,230394,,").is_err());
        assert!(
            RMC::from_line("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,Q")
                .is_err(),
            "variation present but direction letter bogus"
        );
    }

    #[test]
    fn test_rmc_round_trip() {
        let original = RMC::from_line(LINE).unwrap();

        let env = original.to_envelope();
        assert!(env.is_valid());

        let decoded = RMC::from_envelope(&env).unwrap();
        let (a, b) = (decoded.position.unwrap(), original.position.unwrap());
        assert!((a.latitude - b.latitude).abs() < 1e-7);
        assert!((a.longitude - b.longitude).abs() < 1e-7);
        assert_eq!(decoded.fix_time, original.fix_time);
        assert_eq!(decoded.fix_date, original.fix_date);
        assert_eq!(decoded.speed, original.speed);
        assert_eq!(decoded.bearing, original.bearing);
        assert_eq!(decoded.magnetic_variation, original.magnetic_variation);
    }
}
