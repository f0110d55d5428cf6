#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    capabilities::{BearingSentence, SpeedSentence},
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
    values::{Speed, SpeedUnit},
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8
///          |  |  |  |  |  |  |  |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct VTG {
    /// Course over ground in degrees true, 0-360
    pub bearing_true: Option<f64>,
    /// Course over ground in degrees magnetic, 0-360
    pub bearing_magnetic: Option<f64>,
    /// Speed over ground, knots
    pub speed_knots: Option<Speed>,
    /// Speed over ground, kilometers per hour
    pub speed_kmh: Option<Speed>,
}

impl VTG {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "VTG")?;
        let f = FieldReader::new(env, "VTG");

        Ok(VTG {
            bearing_true: f.bearing(0)?,
            bearing_magnetic: f.bearing(2)?,
            speed_knots: f.speed(4, SpeedUnit::Knots)?,
            speed_kmh: f.speed(6, SpeedUnit::KmPerHour)?,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let words = vec![
            fields::format_opt(self.bearing_true),
            "T".to_owned(),
            fields::format_opt(self.bearing_magnetic),
            "M".to_owned(),
            fields::format_opt(self.speed_knots.map(|s| s.value)),
            "N".to_owned(),
            fields::format_opt(self.speed_kmh.map(|s| s.value)),
            "K".to_owned(),
        ];

        Envelope::new("GPVTG", words).with_checksum()
    }
}

impl BearingSentence for VTG {
    fn bearing(&self) -> Option<f64> {
        self.bearing_true
    }
}

impl SpeedSentence for VTG {
    fn speed(&self) -> Option<Speed> {
        // prefer knots; the km/h field is an alternate encoding of the same datum
        self.speed_knots.or(self.speed_kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtg_decoding() {
        let vtg = VTG::from_line("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48").unwrap();

        assert_eq!(vtg.bearing_true, Some(54.7));
        assert_eq!(vtg.bearing_magnetic, Some(34.4));
        assert_eq!(vtg.speed_knots, Some(Speed::new(5.5, SpeedUnit::Knots)));
        assert_eq!(vtg.speed_kmh, Some(Speed::new(10.2, SpeedUnit::KmPerHour)));
        assert_eq!(vtg.speed(), Some(Speed::new(5.5, SpeedUnit::Knots)));
    }

    #[test]
    fn test_vtg_speed_falls_back_to_kmh() {
        let vtg = VTG::from_line("$GPVTG,054.7,T,034.4,M,,N,010.2,K").unwrap();
        let speed = vtg.speed().unwrap();
        assert_eq!(speed.unit, SpeedUnit::KmPerHour);
        assert!((speed.to_knots() - 10.2 / 1.852).abs() < 1e-9);
    }

    #[test]
    fn test_vtg_all_fields_empty() {
        let vtg = VTG::from_line("$GPVTG,,T,,M,,N,,K").unwrap();
        assert_eq!(vtg.bearing_true, None);
        assert_eq!(vtg.speed(), None);
    }

    #[test]
    fn test_vtg_round_trip() {
        let original = VTG::from_line("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48").unwrap();
        let env = original.to_envelope();
        assert!(env.is_valid());
        assert_eq!(VTG::from_envelope(&env).unwrap(), original);
    }
}
