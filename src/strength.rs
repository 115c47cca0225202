//! A coarse strength estimate, proportional to the number of enabled character classes.
//!
//! This is not an entropy estimate: a 30 character lowercase password scores lower than a 12
//! character password drawn from every class.

use std::fmt;

use serde::Serialize;

use crate::charset::ClassSelection;

/// Number of segments in the strength meter.
pub const SEGMENTS: usize = 4;

const POINTS_PER_CLASS: u8 = 25;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub fn from_selection(selection: &ClassSelection) -> StrengthScore {
        // At most four classes, so this can't overflow.
        StrengthScore(POINTS_PER_CLASS * selection.count() as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Which segments of the meter are lit for this score.
    pub fn segments(self) -> [bool; SEGMENTS] {
        lit_segments(u32::from(self.0))
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map a raw score onto the meter.
///
/// The first three segments light at the thresholds 25, 50 and 75. The last one only lights on
/// exactly 100.
pub fn lit_segments(score: u32) -> [bool; SEGMENTS] {
    [score >= 25, score >= 50, score >= 75, score == 100]
}
