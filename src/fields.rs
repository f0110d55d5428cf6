//! # Field Parsers
//!
//! Pure conversions between one envelope field and one domain value, plus
//! the formatting counterparts used to re-encode sentences.
//!
//! Every parser follows the same policy: an out-of-range index or an empty
//! field is *missing* and resolves to `Ok(None)`; a field that is present
//! but cannot be converted is a corruption signal and fails with
//! [`Error::InvalidField`]. Enumerated codes are the exception — they decode
//! infallibly to their fallback variant, because devices routinely omit or
//! extend them.

use std::str::FromStr;

use nom::{
    Parser,
    bytes::complete::take,
    combinator::{map_res, rest},
    error::{ErrorKind, make_error},
};

use crate::{
    envelope::Envelope,
    error::{Error, Result},
    values::{Distance, DistanceUnit, Dop, Position, Speed, SpeedUnit},
};

type NomResult<'a, O> = nom::IResult<&'a str, O, nom::error::Error<&'a str>>;

/// Fails a typed decoder handed an envelope of another kind.
pub(crate) fn expect_type(env: &Envelope, expected: &'static str) -> Result<()> {
    if env.type_suffix() == expected {
        Ok(())
    } else {
        Err(Error::WrongSentenceType {
            expected,
            found: env.command_word().to_owned(),
        })
    }
}

/// Indexed, error-annotating access to one envelope's fields.
///
/// Bundles the envelope with the sentence kind so that field errors name
/// the sentence and index they came from.
pub(crate) struct FieldReader<'a> {
    env: &'a Envelope,
    sentence: &'static str,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(env: &'a Envelope, sentence: &'static str) -> Self {
        FieldReader { env, sentence }
    }

    /// The raw field text; `None` when out of range or empty.
    pub(crate) fn raw(&self, index: usize) -> Option<&'a str> {
        self.env.word(index)
    }

    pub(crate) fn invalid(&self, index: usize) -> Error {
        Error::invalid_field(self.sentence, index, self.raw(index).unwrap_or(""))
    }

    /// A plain numeric field (`u8`, `u16`, `f64`, ...).
    pub(crate) fn number<T: FromStr>(&self, index: usize) -> Result<Option<T>> {
        match self.raw(index) {
            None => Ok(None),
            Some(text) => text.parse().map(Some).map_err(|_| self.invalid(index)),
        }
    }

    /// A numeric field the sentence structure cannot do without; missing is
    /// as much a corruption signal as unparsable.
    pub(crate) fn require<T: FromStr>(&self, index: usize) -> Result<T> {
        self.number(index)?.ok_or_else(|| self.invalid(index))
    }

    /// The first character of a single-letter code field.
    pub(crate) fn code(&self, index: usize) -> Option<char> {
        self.raw(index).and_then(|w| w.chars().next())
    }

    /// A latitude split over two fields: the value at `index` and the N/S
    /// hemisphere letter at `index + 1`.
    ///
    /// Accepts both plain decimal degrees (`"49.2742"`) and the packed
    /// `ddmm.mmmm` encoding (`"4916.45"`).
    pub(crate) fn latitude(&self, index: usize) -> Result<Option<f64>> {
        let Some(value) = self.raw(index) else {
            return Ok(None);
        };

        let degrees = angle_degrees(value, 3).ok_or_else(|| self.invalid(index))?;
        if degrees > 90.0 {
            return Err(self.invalid(index));
        }

        match self.code(index + 1) {
            Some('N') => Ok(Some(degrees)),
            Some('S') => Ok(Some(-degrees)),
            _ => Err(self.invalid(index + 1)),
        }
    }

    /// A longitude split over two fields: the value at `index` and the E/W
    /// hemisphere letter at `index + 1`.
    pub(crate) fn longitude(&self, index: usize) -> Result<Option<f64>> {
        let Some(value) = self.raw(index) else {
            return Ok(None);
        };

        let degrees = angle_degrees(value, 4).ok_or_else(|| self.invalid(index))?;
        if degrees > 180.0 {
            return Err(self.invalid(index));
        }

        match self.code(index + 1) {
            Some('E') => Ok(Some(degrees)),
            Some('W') => Ok(Some(-degrees)),
            _ => Err(self.invalid(index + 1)),
        }
    }

    /// A position spanning four fields starting at `index`:
    /// latitude, N/S, longitude, E/W. Missing when either half is missing.
    pub(crate) fn position(&self, index: usize) -> Result<Option<Position>> {
        let latitude = self.latitude(index)?;
        let longitude = self.longitude(index + 2)?;

        Ok(match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        })
    }

    /// A bearing in degrees, normalized into `[0, 360)`.
    pub(crate) fn bearing(&self, index: usize) -> Result<Option<f64>> {
        Ok(self
            .number::<f64>(index)?
            .map(|v| v.rem_euclid(360.0)))
    }

    /// A distance whose unit is implied by the sentence's field position.
    pub(crate) fn distance(&self, index: usize, unit: DistanceUnit) -> Result<Option<Distance>> {
        Ok(self.number(index)?.map(|value| Distance { value, unit }))
    }

    /// A speed whose unit is implied by the sentence's field position.
    pub(crate) fn speed(&self, index: usize, unit: SpeedUnit) -> Result<Option<Speed>> {
        Ok(self.number(index)?.map(|value| Speed { value, unit }))
    }

    /// A dilution-of-precision field.
    pub(crate) fn dop(&self, index: usize) -> Result<Option<Dop>> {
        Ok(self.number(index)?.map(Dop))
    }

    /// A UTC time-of-day field, `hhmmss` with optional fractional seconds.
    pub(crate) fn utc_time(&self, index: usize) -> Result<Option<time::Time>> {
        match self.raw(index) {
            None => Ok(None),
            Some(text) => match utc_time_token(text) {
                Ok((_, t)) => Ok(Some(t)),
                Err(_) => Err(self.invalid(index)),
            },
        }
    }

    /// A UTC date field, `ddmmyy`.
    pub(crate) fn utc_date(&self, index: usize) -> Result<Option<time::Date>> {
        match self.raw(index) {
            None => Ok(None),
            Some(text) => match utc_date_token(text) {
                Ok((_, d)) => Ok(Some(d)),
                Err(_) => Err(self.invalid(index)),
            },
        }
    }
}

/// Converts one angular token to unsigned decimal degrees.
///
/// Tokens with at least `packed_digits` integer digits are the packed
/// sexagesimal encoding (degrees * 100 + decimal minutes); NMEA zero-pads
/// those, so shorter tokens can only be plain decimal degrees.
fn angle_degrees(token: &str, packed_digits: usize) -> Option<f64> {
    let value: f64 = token.parse().ok()?;
    if value < 0.0 {
        // sign comes from the hemisphere letter, never the value
        return None;
    }

    let int_digits = token.split('.').next().unwrap_or("").len();
    if int_digits < packed_digits {
        return Some(value);
    }

    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;
    if minutes >= 60.0 {
        return None;
    }

    Some(degrees + minutes / 60.0)
}

fn utc_time_token(i: &str) -> NomResult<'_, time::Time> {
    let (i, hour) = map_res(take(2u8), str::parse::<u8>).parse(i)?;
    let (i, minute) = map_res(take(2u8), str::parse::<u8>).parse(i)?;
    let (i, second) = map_res(rest, str::parse::<f64>).parse(i)?;

    if !(0.0..60.0).contains(&second) {
        return Err(nom::Err::Error(make_error(i, ErrorKind::Verify)));
    }

    let milliseconds = (second.fract() * 1000.0).round() as u16;
    let time = time::Time::from_hms_milli(hour, minute, second.trunc() as u8, milliseconds)
        .or(Err(nom::Err::Error(make_error(i, ErrorKind::Verify))))?;

    Ok((i, time))
}

fn utc_date_token(i: &str) -> NomResult<'_, time::Date> {
    let (i, day) = map_res(take(2u8), str::parse::<u8>).parse(i)?;
    let (i, month) = map_res(take(2u8), str::parse::<u8>).parse(i)?;
    let (i, year) = map_res(take(2u8), str::parse::<u16>).parse(i)?;

    let month: time::Month = month
        .try_into()
        .or(Err(nom::Err::Error(make_error(i, ErrorKind::Verify))))?;

    // two-digit year pivot: NMEA predates 1983 nowhere
    let year = match year {
        83..=99 => year + 1900,
        _ => year + 2000,
    };

    let date = time::Date::from_calendar_date(year as i32, month, day)
        .or(Err(nom::Err::Error(make_error(i, ErrorKind::Verify))))?;

    Ok((i, date))
}

/// Formats a latitude as the packed `ddmm.mmmm` value and hemisphere letter.
pub(crate) fn format_latitude(degrees: f64) -> (String, char) {
    let hemisphere = if degrees < 0.0 { 'S' } else { 'N' };
    (packed_angle(degrees.abs(), 2), hemisphere)
}

/// Formats a longitude as the packed `dddmm.mmmm` value and hemisphere letter.
pub(crate) fn format_longitude(degrees: f64) -> (String, char) {
    let hemisphere = if degrees < 0.0 { 'W' } else { 'E' };
    (packed_angle(degrees.abs(), 3), hemisphere)
}

fn packed_angle(degrees: f64, degree_width: usize) -> String {
    let whole = degrees.trunc();
    let minutes = (degrees - whole) * 60.0;
    format!("{whole:0degree_width$.0}{minutes:07.4}")
}

/// Formats an optional position as the four wire fields
/// (latitude, N/S, longitude, E/W), all empty when missing.
pub(crate) fn format_position(position: Option<Position>) -> (String, String, String, String) {
    match position {
        Some(p) => {
            let (lat, lat_h) = format_latitude(p.latitude);
            let (lon, lon_h) = format_longitude(p.longitude);
            (lat, lat_h.to_string(), lon, lon_h.to_string())
        }
        None => Default::default(),
    }
}

/// Formats a UTC time-of-day as `hhmmss.sss`.
pub(crate) fn format_time(t: time::Time) -> String {
    format!(
        "{:02}{:02}{:02}.{:03}",
        t.hour(),
        t.minute(),
        t.second(),
        t.millisecond()
    )
}

/// Formats a UTC date as `ddmmyy`.
pub(crate) fn format_date(d: time::Date) -> String {
    format!("{:02}{:02}{:02}", d.day(), d.month() as u8, d.year() % 100)
}

/// Formats an optional numeric field, empty when missing.
pub(crate) fn format_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
