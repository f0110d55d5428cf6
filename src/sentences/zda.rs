#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    capabilities::UtcDateTimeSentence,
    envelope::Envelope,
    error::Result,
    fields::{self, FieldReader},
};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ZDA {
    /// Time of day in UTC
    pub time: Option<time::Time>,
    /// Date in UTC (four-digit year on the wire)
    pub date: Option<time::Date>,
    /// Local zone description, offset from UTC
    pub utc_offset: Option<time::UtcOffset>,
}

impl ZDA {
    /// Decodes from one raw line, tokenizing an [`Envelope`] first.
    pub fn from_line(line: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(line))
    }

    /// Decodes from an already-tokenized envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        fields::expect_type(env, "ZDA")?;
        let f = FieldReader::new(env, "ZDA");

        let date = match (
            f.number::<u8>(1)?,
            f.number::<u8>(2)?,
            f.number::<u16>(3)?,
        ) {
            (None, None, None) => None,
            (Some(day), Some(month), Some(year)) => {
                let month: time::Month = month.try_into().map_err(|_| f.invalid(2))?;
                let date = time::Date::from_calendar_date(year as i32, month, day)
                    .map_err(|_| f.invalid(1))?;
                Some(date)
            }
            // a date with only some of its parts is corrupt, not optional
            _ => return Err(f.invalid(1)),
        };

        let utc_offset = match f.raw(4) {
            None => None,
            Some(text) => {
                let hours: i8 = text.parse().map_err(|_| f.invalid(4))?;
                let minutes = f.number::<i8>(5)?.unwrap_or(0);
                // the sign lives on the hours token; "-0" still negates
                let minutes = if text.starts_with('-') { -minutes } else { minutes };
                let offset =
                    time::UtcOffset::from_whole_seconds(hours as i32 * 3600 + minutes as i32 * 60)
                        .map_err(|_| f.invalid(4))?;
                Some(offset)
            }
        };

        Ok(ZDA {
            time: f.utc_time(0)?,
            date,
            utc_offset,
        })
    }

    /// Re-encodes the decoded values as a checksum-valid envelope.
    pub fn to_envelope(&self) -> Envelope {
        let (day, month, year) = match self.date {
            Some(d) => (
                format!("{:02}", d.day()),
                format!("{:02}", d.month() as u8),
                format!("{:04}", d.year()),
            ),
            None => Default::default(),
        };
        let (offset_hours, offset_minutes) = match self.utc_offset {
            Some(offset) => {
                // the sign belongs on the hours word even when they are zero
                let sign = if offset.whole_seconds() < 0 { '-' } else { '+' };
                (
                    format!("{sign}{:02}", offset.whole_hours().abs()),
                    format!("{:02}", offset.minutes_past_hour().abs()),
                )
            }
            None => Default::default(),
        };

        let words = vec![
            self.time.map(fields::format_time).unwrap_or_default(),
            day,
            month,
            year,
            offset_hours,
            offset_minutes,
        ];

        Envelope::new("GPZDA", words).with_checksum()
    }
}

impl UtcDateTimeSentence for ZDA {
    fn utc_datetime(&self) -> Option<PrimitiveDateTime> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(PrimitiveDateTime::new(date, time)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zda_decoding() {
        let zda = ZDA::from_line("$GPZDA,160012.71,11,03,2004,-1,00*7D").unwrap();

        let t = zda.time.unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (16, 0, 12));

        let d = zda.date.unwrap();
        assert_eq!((d.year(), d.month() as u8, d.day()), (2004, 3, 11));

        assert_eq!(
            zda.utc_offset,
            Some(time::UtcOffset::from_hms(-1, 0, 0).unwrap())
        );

        let dt = zda.utc_datetime().unwrap();
        assert_eq!((dt.year(), dt.hour()), (2004, 16));
    }

    #[test]
    fn test_zda_optional_fields() {
        let zda = ZDA::from_line("$GPZDA,,,,,,").unwrap();
        assert_eq!(zda.time, None);
        assert_eq!(zda.date, None);
        assert_eq!(zda.utc_offset, None);
        assert_eq!(zda.utc_datetime(), None);
    }

    #[test]
    fn test_zda_negative_zero_hour_offset() {
        // a zone west of UTC by less than an hour signs only the hours word
        let zda = ZDA::from_line("$GPZDA,160012.71,11,03,2004,-0,30*7F").unwrap();
        assert_eq!(
            zda.utc_offset,
            Some(time::UtcOffset::from_whole_seconds(-30 * 60).unwrap())
        );

        let env = zda.to_envelope();
        assert!(env.is_valid());
        assert_eq!(ZDA::from_envelope(&env).unwrap().utc_offset, zda.utc_offset);
    }

    #[test]
    fn test_zda_partial_date_is_corrupt() {
        assert!(ZDA::from_line("$GPZDA,160012.71,11,,2004,,").is_err());
        assert!(ZDA::from_line("$GPZDA,160012.71,32,03,2004,,").is_err());
        assert!(ZDA::from_line("$GPZDA,160012.71,11,13,2004,,").is_err());
    }

    #[test]
    fn test_zda_round_trip() {
        let original = ZDA::from_line("$GPZDA,160012.71,11,03,2004,-1,00*7D").unwrap();
        let env = original.to_envelope();
        assert!(env.is_valid());

        let decoded = ZDA::from_envelope(&env).unwrap();
        assert_eq!(decoded.date, original.date);
        assert_eq!(decoded.utc_offset, original.utc_offset);
        let (a, b) = (decoded.time.unwrap(), original.time.unwrap());
        assert_eq!((a.hour(), a.minute(), a.second()), (b.hour(), b.minute(), b.second()));
    }
}
