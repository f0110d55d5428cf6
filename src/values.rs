//! # Domain Value Types
//!
//! Strongly-typed values decoded from sentence fields: positions, distances,
//! speeds, dilution of precision, and the closed fix-classification
//! enumerations.
//!
//! Missing-but-optional data is represented as `Option::None` on value
//! types; the closed enumerations instead carry an explicit fallback variant
//! ([`FixQuality::Unknown`], [`FixStatus::NoFix`], ...) so that an
//! unrecognized or missing code never aborts a decode.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geographic position in signed decimal degrees.
///
/// Latitude is negative in the southern hemisphere, longitude negative in
/// the western hemisphere.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in degrees, -90 to 90
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180
    pub longitude: f64,
}

/// Units of distance carried by NMEA sentences.
///
/// The unit is never inferred from the field text; each decoder names the
/// unit its sentence position implies.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    /// Meters (`M`)
    Meters,
    /// Feet (`f`)
    Feet,
    /// Fathoms (`F`)
    Fathoms,
}

/// A distance with an explicit unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Distance { value, unit }
    }

    /// Converts the distance to meters.
    pub fn to_meters(&self) -> f64 {
        match self.unit {
            DistanceUnit::Meters => self.value,
            DistanceUnit::Feet => self.value * 0.3048,
            DistanceUnit::Fathoms => self.value * 1.8288,
        }
    }
}

/// Units of speed carried by NMEA sentences.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    /// Knots (`N`)
    Knots,
    /// Kilometers per hour (`K`)
    KmPerHour,
}

/// A speed with an explicit unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    pub value: f64,
    pub unit: SpeedUnit,
}

impl Speed {
    pub fn new(value: f64, unit: SpeedUnit) -> Self {
        Speed { value, unit }
    }

    /// Converts the speed to knots.
    pub fn to_knots(&self) -> f64 {
        match self.unit {
            SpeedUnit::Knots => self.value,
            SpeedUnit::KmPerHour => self.value / 1.852,
        }
    }
}

/// Dilution of Precision: a unitless quality metric describing satellite
/// geometry. Smaller is better.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dop(pub f32);

impl Dop {
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Classifies the DOP value into the customary confidence buckets.
    pub fn rating(&self) -> DopRating {
        match self.0 {
            v if v < 1.0 => DopRating::Ideal,
            v if v < 2.0 => DopRating::Excellent,
            v if v < 5.0 => DopRating::Good,
            v if v < 10.0 => DopRating::Moderate,
            v if v < 20.0 => DopRating::Fair,
            _ => DopRating::Poor,
        }
    }
}

/// Interpretation of a [`Dop`] value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DopRating {
    Ideal,
    Excellent,
    Good,
    Moderate,
    Fair,
    Poor,
}

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $($code:literal =>)? $variant:ident
            ),* $(,)?
        }
        fallback = $fallback:ident
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Maps a single-character wire code to a variant.
            ///
            /// Unrecognized or missing codes map to the fallback variant
            /// rather than failing; devices legitimately omit these fields.
            pub fn from_code(code: Option<char>) -> Self {
                match code {
                    $($(Some($code) => Self::$variant,)?)*
                    _ => Self::$fallback,
                }
            }

            /// The wire code for this variant, if it has one.
            pub fn code(&self) -> Option<char> {
                #[allow(unreachable_patterns)]
                match self {
                    $($(Self::$variant => Some($code),)?)*
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$fallback
            }
        }
    };
}

code_enum! {
    /// Quality of the GPS fix, as reported by GGA sentences.
    pub enum FixQuality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => GpsFix,
        /// 2 - Differential GPS fix
        '2' => DifferentialGpsFix,
        /// 3 - PPS fix
        '3' => PulsePerSecond,
        /// 4 - Real Time Kinematic
        '4' => FixedRealTimeKinematic,
        /// 5 - Float RTK
        '5' => FloatRealTimeKinematic,
        /// 6 - Estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => ManualInput,
        /// 8 - Simulation mode
        '8' => Simulated,
        /// Quality code missing or not recognized
        Unknown,
    }
    fallback = Unknown
}

code_enum! {
    /// Whether a position solution is currently held.
    pub enum FixStatus {
        /// A - Data valid, a fix is held
        'A' => Fix,
        /// V - Data invalid, no fix
        'V' => NoFix,
    }
    fallback = NoFix
}

code_enum! {
    /// Whether fix acquisition is forced or decided by the device.
    pub enum FixMode {
        /// A - Automatic, allowed to switch between 2D and 3D
        'A' => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
        /// Mode code missing or not recognized
        Unknown,
    }
    fallback = Unknown
}

code_enum! {
    /// Dimensionality of the position solution.
    pub enum FixMethod {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D fix
        '2' => Fix2D,
        /// 3 - 3D fix
        '3' => Fix3D,
    }
    fallback = NoFix
}

/// Information about one satellite in view, as carried by GSV sentences.
///
/// Elevation, azimuth and signal-to-noise ratio are blank until the signal
/// has been acquired; a satellite with blank fields is still listed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    /// Pseudo-random noise number identifying the satellite
    pub prn: u8,
    /// Elevation above the horizon in degrees, 0-90
    pub elevation: Option<u8>,
    /// Azimuth from true north in degrees, 0-359
    pub azimuth: Option<u16>,
    /// Signal-to-noise ratio in dB, 0-99
    pub snr: Option<u8>,
}
