#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    capabilities::HeadingSentence,
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
};

/// HDT - Heading - True
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_hdt_heading_true>
///
/// ```text
///         1   2
///         |   |
///  $--HDT,x.x,T*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct HDT {
    /// Heading in degrees true, 0-360
    pub heading: Option<f64>,
}

impl HDT {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "HDT")?;
        let f = FieldReader::new(env, "HDT");

        Ok(HDT {
            heading: f.bearing(0)?,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let words = vec![fields::format_opt(self.heading), "T".to_owned()];
        Envelope::new("GPHDT", words).with_checksum()
    }
}

impl HeadingSentence for HDT {
    fn heading(&self) -> Option<f64> {
        self.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdt_decoding() {
        let hdt = HDT::from_line("$GPHDT,274.07,T*03").unwrap();
        assert_eq!(hdt.heading, Some(274.07));

        let hdt = HDT::from_line("$GPHDT,,T").unwrap();
        assert_eq!(hdt.heading, None);

        assert!(HDT::from_line("$GPHDT,north,T").is_err());
    }

    #[test]
    fn test_hdt_round_trip() {
        let original = HDT::from_line("$GPHDT,274.07,T*03").unwrap();
        let env = original.to_envelope();
        assert!(env.is_valid());
        assert_eq!(HDT::from_envelope(&env).unwrap(), original);
    }
}
