//! Password strength meter.
//!
//! The score is the number of satisfied criteria out of four: length of at
//! least 8, an ASCII uppercase letter, an ASCII digit and a special
//! character. The meter paints the first `score` segments with the color of
//! that score and leaves the rest neutral.

use secrecy::{ExposeSecret, SecretString};

use crate::ui::InlineStyle;
use crate::validators::SPECIAL_CHARS;

const MIN_LENGTH: usize = 8;

/// Number of segments in the meter.
pub const SEGMENT_COUNT: usize = 4;

/// Layout shared by every segment.
pub const SEGMENT_STYLE: InlineStyle = &[
    ("height", "4px"),
    ("width", "23%"),
    ("border-radius", "2px"),
];

/// Layout of the row holding the segments.
pub const METER_STYLE: InlineStyle = &[
    ("display", "flex"),
    ("justify-content", "space-between"),
    ("margin", "5px 0"),
];

pub const METER_CLASS: &str = "strength-indicator";

/// Fixed markup of the meter: row class and style, per-segment style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterLayout {
    pub class: &'static str,
    pub style: InlineStyle,
    pub segment_style: InlineStyle,
}

impl MeterLayout {
    pub const DEFAULT: MeterLayout = MeterLayout {
        class: METER_CLASS,
        style: METER_STYLE,
        segment_style: SEGMENT_STYLE,
    };
}

/// Strength score in `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: StrengthScore = StrengthScore(SEGMENT_COUNT as u8);

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Which of the four criteria a password satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrengthCriteria {
    pub long_enough: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl StrengthCriteria {
    pub fn of(password: &str) -> Self {
        Self {
            long_enough: password.chars().count() >= MIN_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    pub fn score(&self) -> StrengthScore {
        let met = [
            self.long_enough,
            self.has_uppercase,
            self.has_digit,
            self.has_special,
        ]
        .iter()
        .filter(|&&b| b)
        .count();
        StrengthScore(met as u8)
    }
}

/// Scores a password.
pub fn strength_score(password: &SecretString) -> StrengthScore {
    StrengthCriteria::of(password.expose_secret()).score()
}

/// Fill color of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentColor {
    Neutral,
    Weak,
    Fair,
    Good,
    Strong,
}

impl SegmentColor {
    /// Color used for the filled segments at `score`. Score 0 fills nothing.
    pub fn for_score(score: StrengthScore) -> SegmentColor {
        match score.value() {
            0 => SegmentColor::Neutral,
            1 => SegmentColor::Weak,
            2 => SegmentColor::Fair,
            3 => SegmentColor::Good,
            _ => SegmentColor::Strong,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            SegmentColor::Neutral => "#ccc",
            SegmentColor::Weak => "#FF6B6B",
            SegmentColor::Fair => "#FFD700",
            SegmentColor::Good => "#9DE0C0",
            SegmentColor::Strong => "#84c7a8",
        }
    }
}

/// Colors of the four segments, first to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthMeter {
    segments: [SegmentColor; SEGMENT_COUNT],
}

impl Default for StrengthMeter {
    fn default() -> Self {
        Self::neutral()
    }
}

impl StrengthMeter {
    pub fn neutral() -> Self {
        Self {
            segments: [SegmentColor::Neutral; SEGMENT_COUNT],
        }
    }

    /// Resets every segment, then fills the first `score` ones.
    pub fn for_score(score: StrengthScore) -> Self {
        let mut meter = Self::neutral();
        let color = SegmentColor::for_score(score);
        for segment in meter.segments.iter_mut().take(score.value() as usize) {
            *segment = color;
        }
        meter
    }

    pub fn segments(&self) -> &[SegmentColor; SEGMENT_COUNT] {
        &self.segments
    }

    pub fn filled(&self) -> usize {
        self.segments
            .iter()
            .filter(|&&s| s != SegmentColor::Neutral)
            .count()
    }
}
