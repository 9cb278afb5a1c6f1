//! HSV thresholds for segmenting the user's glove.
//!
//! The calibration file holds three lines, one each for hue, saturation and
//! brightness, of the form `<label> <lower> <upper>`:
//!
//! ```text
//! hue: 0 20
//! sat: 50 255
//! val: 60 255
//! ```
//!
//! The label is ignored. Values use the OpenCV HSV scale (hue 0-180).

use core::fmt;
use core::str::FromStr;

/// Inclusive lower/upper bound for one HSV channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: i32,
    pub upper: i32,
}

impl HsvRange {
    pub fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvCalibration {
    pub hue: HsvRange,
    pub saturation: HsvRange,
    pub brightness: HsvRange,
}

impl HsvCalibration {
    /// Lower bounds as (h, s, v)
    pub fn lower(&self) -> (i32, i32, i32) {
        (self.hue.lower, self.saturation.lower, self.brightness.lower)
    }

    /// Upper bounds as (h, s, v)
    pub fn upper(&self) -> (i32, i32, i32) {
        (self.hue.upper, self.saturation.upper, self.brightness.upper)
    }

    /// Parse the three-line calibration format
    pub fn parse(text: &str) -> Result<Self, CalibrationError> {
        let mut lines = text.lines();
        let hue = parse_line(lines.next(), "hue")?;
        let saturation = parse_line(lines.next(), "saturation")?;
        let brightness = parse_line(lines.next(), "brightness")?;

        Ok(Self {
            hue,
            saturation,
            brightness,
        })
    }
}

impl FromStr for HsvCalibration {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_line(line: Option<&str>, channel: &'static str) -> Result<HsvRange, CalibrationError> {
    let line = line.ok_or(CalibrationError::MissingLine { channel })?;
    let mut toks = line.split_whitespace().skip(1);

    let mut next_value = || -> Result<i32, CalibrationError> {
        let tok = toks
            .next()
            .ok_or(CalibrationError::MissingField { channel })?;
        tok.parse()
            .map_err(|_| CalibrationError::InvalidNumber { channel })
    };

    let lower = next_value()?;
    let upper = next_value()?;
    Ok(HsvRange::new(lower, upper))
}

/// Why a calibration file could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// Fewer than three lines
    MissingLine { channel: &'static str },
    /// A line without both a lower and an upper value
    MissingField { channel: &'static str },
    InvalidNumber { channel: &'static str },
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::MissingLine { channel } => {
                write!(f, "missing {} line", channel)
            }
            CalibrationError::MissingField { channel } => {
                write!(f, "{} line needs a label, a lower and an upper value", channel)
            }
            CalibrationError::InvalidNumber { channel } => {
                write!(f, "{} line contains a value that is not an integer", channel)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CalibrationError {}
