#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
    values::Satellite,
};

/// How many satellites one GSV message can carry.
const SATS_PER_MESSAGE: usize = 4;

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// One message carries at most four satellites; a full listing is split
/// across sequential messages. This decoder only ever yields the satellites
/// carried by one message — use [`SatellitesInView`] to reassemble a group.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSV {
    /// Total number of GSV messages in this group
    pub total_messages: u8,
    /// One-based index of this message within the group
    pub message_number: u8,
    /// Total number of satellites in view, across the whole group
    pub satellites_in_view: u8,
    /// The satellites carried by this message
    pub satellites: heapless::Vec<Satellite, SATS_PER_MESSAGE>,
}

impl GSV {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "GSV")?;
        let f = FieldReader::new(env, "GSV");

        let mut satellites = heapless::Vec::new();
        for group in 0..SATS_PER_MESSAGE {
            let base = 3 + group * 4;
            // a blank PRN slot means the message carries fewer than four
            let Some(prn) = f.number(base)? else {
                continue;
            };

            let satellite = Satellite {
                prn,
                elevation: f.number(base + 1)?,
                azimuth: f.number(base + 2)?,
                snr: f.number(base + 3)?,
            };
            let _ = satellites.push(satellite);
        }

        Ok(GSV {
            total_messages: f.require(0)?,
            message_number: f.require(1)?,
            satellites_in_view: f.require(2)?,
            satellites,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let mut words = vec![
            self.total_messages.to_string(),
            self.message_number.to_string(),
            format!("{:02}", self.satellites_in_view),
        ];
        for satellite in &self.satellites {
            words.push(format!("{:02}", satellite.prn));
            words.push(fields::format_opt(satellite.elevation));
            words.push(fields::format_opt(satellite.azimuth));
            words.push(fields::format_opt(satellite.snr));
        }

        Envelope::new("GPGSV", words).with_checksum()
    }
}

/// Reassembles a satellite listing split across sequential GSV messages.
///
/// Messages are absorbed in index order; a `message_number` of 1 starts a
/// new group, and anything out of sequence discards the partial group
/// rather than producing a listing with holes. The final message of a group
/// may carry fewer than four satellites.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SatellitesInView {
    total_messages: u8,
    absorbed: u8,
    in_view: u8,
    satellites: Vec<Satellite>,
}

impl SatellitesInView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs one message of a group. Returns `true` once the group is
    /// complete.
    pub fn absorb(&mut self, gsv: &GSV) -> bool {
        let in_sequence =
            gsv.total_messages == self.total_messages && gsv.message_number == self.absorbed + 1;

        if gsv.message_number == 1 {
            self.total_messages = gsv.total_messages;
            self.absorbed = 0;
            self.in_view = gsv.satellites_in_view;
            self.satellites.clear();
        } else if !in_sequence {
            *self = Self::default();
            return false;
        }

        self.absorbed = gsv.message_number;
        self.satellites.extend(gsv.satellites.iter().copied());
        self.is_complete()
    }

    /// Whether every message of the current group has been absorbed.
    pub fn is_complete(&self) -> bool {
        self.total_messages != 0 && self.absorbed == self.total_messages
    }

    /// Total number of satellites the device reports in view.
    pub fn in_view(&self) -> u8 {
        self.in_view
    }

    /// The satellites absorbed so far, in original listing order.
    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP: [&str; 3] = [
        "$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74",
        "$GPGSV,3,2,11,14,25,170,00,16,57,208,39,18,67,296,40,19,40,246,00*74",
        "$GPGSV,3,3,11,22,42,067,42,24,14,311,43,27,05,244,00*4D",
    ];

    #[test]
    fn test_gsv_decoding() {
        let gsv = GSV::from_line(GROUP[0]).unwrap();
        assert_eq!(gsv.total_messages, 3);
        assert_eq!(gsv.message_number, 1);
        assert_eq!(gsv.satellites_in_view, 11);
        assert_eq!(gsv.satellites.len(), 4);
        assert_eq!(
            gsv.satellites[0],
            Satellite {
                prn: 3,
                elevation: Some(3),
                azimuth: Some(111),
                snr: Some(0),
            }
        );
    }

    #[test]
    fn test_gsv_blank_signal_fields_are_sentinels() {
        // signal not yet acquired: elevation/azimuth/snr blank, satellite kept
        let gsv = GSV::from_line("$GPGSV,1,1,01,05,45,120,*4F").unwrap();
        assert_eq!(gsv.satellites.len(), 1);
        assert_eq!(
            gsv.satellites[0],
            Satellite {
                prn: 5,
                elevation: Some(45),
                azimuth: Some(120),
                snr: None,
            }
        );
    }

    #[test]
    fn test_gsv_missing_header_fields_fail() {
        assert!(GSV::from_line("$GPGSV,3,,11,03,03,111,00").is_err());
        assert!(GSV::from_line("$GPGSV,3,1,XX,03,03,111,00").is_err());
    }

    #[test]
    fn test_reassembly_in_order() {
        let mut listing = SatellitesInView::new();

        // 4 + 4 + 3 satellites reassemble into one 11-satellite collection
        assert!(!listing.absorb(&GSV::from_line(GROUP[0]).unwrap()));
        assert!(!listing.absorb(&GSV::from_line(GROUP[1]).unwrap()));
        assert!(listing.absorb(&GSV::from_line(GROUP[2]).unwrap()));

        assert!(listing.is_complete());
        assert_eq!(listing.in_view(), 11);
        assert_eq!(listing.satellites().len(), 11);

        let prns: Vec<u8> = listing.satellites().iter().map(|s| s.prn).collect();
        assert_eq!(prns, [3, 4, 6, 13, 14, 16, 18, 19, 22, 24, 27]);
    }

    #[test]
    fn test_reassembly_discards_out_of_sequence() {
        let mut listing = SatellitesInView::new();
        assert!(!listing.absorb(&GSV::from_line(GROUP[0]).unwrap()));
        // message 2 lost; message 3 arrives next
        assert!(!listing.absorb(&GSV::from_line(GROUP[2]).unwrap()));
        assert!(!listing.is_complete());
        assert!(listing.satellites().is_empty());

        // a fresh group restarts cleanly afterwards
        assert!(!listing.absorb(&GSV::from_line(GROUP[0]).unwrap()));
        assert!(!listing.absorb(&GSV::from_line(GROUP[1]).unwrap()));
        assert!(listing.absorb(&GSV::from_line(GROUP[2]).unwrap()));
        assert_eq!(listing.satellites().len(), 11);
    }

    #[test]
    fn test_gsv_round_trip() {
        for line in GROUP {
            let original = GSV::from_line(line).unwrap();
            let env = original.to_envelope();
            assert!(env.is_valid());
            assert_eq!(GSV::from_envelope(&env).unwrap(), original);
        }
    }
}
