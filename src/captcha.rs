//! The colour-matching anti-spam check.
//!
//! Commenters are asked to pick a named colour with a colour picker. The
//! answer passes when every channel lies close enough to the reference
//! colour for that name.

use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// The reference colours, keyed by the question shown to the commenter.
pub const PALETTE: &[(&str, &str)] = &[
    ("red", "#CC3333"),
    ("yellow", "#CCCC33"),
    ("green", "#33CC33"),
    ("blue", "#3333CC"),
    ("purple", "#CC33CC"),
];

/// How far each channel may stray from the reference, in percent of 256.
const TOLERANCE_PERCENT: u32 = 20;

/// The tolerance in channel units: 20% of 256, rounded, is 51.
pub fn absolute_tolerance() -> u8 {
    ((256 * TOLERANCE_PERCENT) as f64 / 100.0).round() as u8
}

/// An RGB colour written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Colour { red, green, blue }
    }

    /// Looks up the reference colour for a question, if the question exists.
    pub fn reference_for(question: &str) -> Option<Colour> {
        PALETTE
            .iter()
            .find(|(name, _)| *name == question)
            .and_then(|(_, hex)| hex.parse().ok())
    }

    /// Whether every channel of `self` is within `tolerance` of `other`.
    pub fn is_close_to(&self, other: &Colour, tolerance: u8) -> bool {
        let within = |a: u8, b: u8| (i16::from(a) - i16::from(b)).abs() <= i16::from(tolerance);

        within(self.red, other.red) && within(self.green, other.green) && within(self.blue, other.blue)
    }
}

/// Returned when a string is not a `#RRGGBB` colour.
#[derive(Debug, PartialEq)]
pub struct MalformedColour;

impl FromStr for Colour {
    type Err = MalformedColour;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 7 || !s.starts_with('#') {
            return Err(MalformedColour);
        }

        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or(MalformedColour)
        };

        Ok(Colour::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Checks an answer against the question it was given for.
///
/// An unknown question or an answer that is not a colour fails the same way
/// a colour that is too far off does.
pub fn verify(question: &str, answer: &str) -> Result<(), ValidationError> {
    let too_distinct = || ValidationError::ColourTooDistinct {
        question: question.to_owned(),
    };

    let reference = Colour::reference_for(question).ok_or_else(too_distinct)?;
    let answer: Colour = answer.trim().parse().map_err(|_| too_distinct())?;

    if answer.is_close_to(&reference, absolute_tolerance()) {
        Ok(())
    } else {
        Err(too_distinct())
    }
}
