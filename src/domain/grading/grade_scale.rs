//! Grade Scale - letter grade to grade points and percentage.
//!
//! The scale is a closed table. Lookups are total: a string that is not one
//! of the eleven letters resolves to 0.0 points and 0%, never to an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Percentage, ValidationError};

/// A recognized letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeLetter {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// Letter family used for emphasis when a card is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBand {
    A,
    B,
    C,
    D,
    F,
}

impl GradeLetter {
    /// Every letter, best to worst.
    pub const ALL: [GradeLetter; 11] = [
        GradeLetter::A,
        GradeLetter::AMinus,
        GradeLetter::BPlus,
        GradeLetter::B,
        GradeLetter::BMinus,
        GradeLetter::CPlus,
        GradeLetter::C,
        GradeLetter::CMinus,
        GradeLetter::DPlus,
        GradeLetter::D,
        GradeLetter::F,
    ];

    /// Grade points on the 4.0 scale.
    pub fn points(&self) -> f64 {
        match self {
            GradeLetter::A => 4.0,
            GradeLetter::AMinus => 3.7,
            GradeLetter::BPlus => 3.3,
            GradeLetter::B => 3.0,
            GradeLetter::BMinus => 2.7,
            GradeLetter::CPlus => 2.3,
            GradeLetter::C => 2.0,
            GradeLetter::CMinus => 1.7,
            GradeLetter::DPlus => 1.3,
            GradeLetter::D => 1.0,
            GradeLetter::F => 0.0,
        }
    }

    /// Percentage equivalent recorded alongside the grade.
    pub fn percentage(&self) -> Percentage {
        let value = match self {
            GradeLetter::A => 95,
            GradeLetter::AMinus => 90,
            GradeLetter::BPlus => 87,
            GradeLetter::B => 83,
            GradeLetter::BMinus => 80,
            GradeLetter::CPlus => 77,
            GradeLetter::C => 73,
            GradeLetter::CMinus => 70,
            GradeLetter::DPlus => 67,
            GradeLetter::D => 63,
            GradeLetter::F => 55,
        };
        Percentage::from_table(value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLetter::A => "A",
            GradeLetter::AMinus => "A-",
            GradeLetter::BPlus => "B+",
            GradeLetter::B => "B",
            GradeLetter::BMinus => "B-",
            GradeLetter::CPlus => "C+",
            GradeLetter::C => "C",
            GradeLetter::CMinus => "C-",
            GradeLetter::DPlus => "D+",
            GradeLetter::D => "D",
            GradeLetter::F => "F",
        }
    }

    pub fn band(&self) -> GradeBand {
        match self {
            GradeLetter::A | GradeLetter::AMinus => GradeBand::A,
            GradeLetter::BPlus | GradeLetter::B | GradeLetter::BMinus => GradeBand::B,
            GradeLetter::CPlus | GradeLetter::C | GradeLetter::CMinus => GradeBand::C,
            GradeLetter::DPlus | GradeLetter::D => GradeBand::D,
            GradeLetter::F => GradeBand::F,
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLetter {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GradeLetter::ALL
            .iter()
            .copied()
            .find(|letter| letter.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("grade", format!("unknown letter '{}'", s)))
    }
}

/// Total lookups over raw letter strings.
pub struct GradeScale;

impl GradeScale {
    /// Grade points for `letter`, or 0.0 if it is not on the scale.
    pub fn points_for(letter: &str) -> f64 {
        letter.parse::<GradeLetter>().map(|l| l.points()).unwrap_or(0.0)
    }

    /// Percentage for `letter`, or 0.0 if it is not on the scale.
    pub fn percentage_for(letter: &str) -> f64 {
        letter
            .parse::<GradeLetter>()
            .map(|l| l.percentage().as_f64())
            .unwrap_or(0.0)
    }

    /// The recognized letter, if any.
    pub fn recognize(letter: &str) -> Option<GradeLetter> {
        letter.parse().ok()
    }
}
