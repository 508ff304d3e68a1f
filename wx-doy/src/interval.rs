//! Resolution of user-chosen endpoints into a normalized day-of-year window.
//!
//! The UI never enforces start <= end, so endpoints are swapped silently and
//! clamped into 1..=365. Resolution is symmetric in its two arguments and
//! idempotent on an already-normalized interval.

use crate::calendar::{self, Doy, FIRST_DOY, LAST_DOY};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Inclusive day-of-year window with `1 <= start <= end <= 365`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawInterval")]
pub struct Interval {
    start: Doy,
    end: Doy,
}

/// Wire form of [`Interval`]; bounds are normalized on the way in.
#[derive(Deserialize)]
struct RawInterval {
    start: i32,
    end: i32,
}

impl From<RawInterval> for Interval {
    fn from(raw: RawInterval) -> Self {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    pub const FULL_YEAR: Interval = Interval {
        start: FIRST_DOY,
        end: LAST_DOY,
    };

    /// Normalizes two raw day indices: swaps inverted bounds, clamps to 1..=365.
    pub fn new(a: i32, b: i32) -> Self {
        let (lo, hi) = if b < a { (b, a) } else { (a, b) };
        Self {
            start: clamp_doy(lo),
            end: clamp_doy(hi),
        }
    }

    /// Resolves two endpoint specifications.
    ///
    /// An endpoint that cannot be read (an unparseable date string) falls back
    /// to the full year, regardless of which side it was on.
    pub fn resolve(a: &Endpoint, b: &Endpoint) -> Self {
        match (a.to_doy(), b.to_doy()) {
            (Some(a), Some(b)) => Interval::new(a as i32, b as i32),
            _ => {
                log::warn!(
                    "interval: unreadable endpoint ({:?}, {:?}), showing full year",
                    a,
                    b
                );
                Interval::FULL_YEAR
            }
        }
    }

    pub fn start(&self) -> Doy {
        self.start
    }

    pub fn end(&self) -> Doy {
        self.end
    }

    pub fn contains(&self, doy: Doy) -> bool {
        (self.start..=self.end).contains(&doy)
    }

    pub fn days(&self) -> RangeInclusive<Doy> {
        self.start..=self.end
    }

    /// Number of days in the window.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_full_year(&self) -> bool {
        *self == Interval::FULL_YEAR
    }

    /// The window as month/day endpoints, suitable for feeding back to the UI.
    pub fn endpoints(&self) -> (Endpoint, Endpoint) {
        (Endpoint::from_doy(self.start), Endpoint::from_doy(self.end))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::FULL_YEAR
    }
}

fn clamp_doy(raw: i32) -> Doy {
    raw.clamp(FIRST_DOY as i32, LAST_DOY as i32) as Doy
}

/// One end of an interval as the UI supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `YYYY-MM-DD` from a date input. Only month and day are used.
    Date(String),
    /// Month and day selectors. The day may exceed the month's length.
    MonthDay { month: u32, day: u32 },
}

impl Endpoint {
    pub fn month_day(month: u32, day: u32) -> Self {
        Endpoint::MonthDay { month, day }
    }

    pub fn from_doy(doy: Doy) -> Self {
        let (month, day) = calendar::doy_to_md(doy);
        Endpoint::MonthDay { month, day }
    }

    /// Day-of-year on the reference calendar; Feb 29 clamps to Feb 28.
    pub fn to_doy(&self) -> Option<Doy> {
        match self {
            Endpoint::Date(s) => {
                let date = calendar::parse_iso_date(s)?;
                Some(calendar::md_to_doy(date.month(), date.day()))
            }
            Endpoint::MonthDay { month, day } => Some(calendar::md_to_doy(*month, *day)),
        }
    }
}

/// Named windows, expressed as month/day literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    FullYear,
    Q1,
    Q2,
    Q3,
    Q4,
    Spring,
    Summer,
    Autumn,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::FullYear,
        Preset::Q1,
        Preset::Q2,
        Preset::Q3,
        Preset::Q4,
        Preset::Spring,
        Preset::Summer,
        Preset::Autumn,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Preset::FullYear => "full_year",
            Preset::Q1 => "q1",
            Preset::Q2 => "q2",
            Preset::Q3 => "q3",
            Preset::Q4 => "q4",
            Preset::Spring => "spring",
            Preset::Summer => "summer",
            Preset::Autumn => "autumn",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::FullYear => "Full year",
            Preset::Q1 => "Jan - Mar",
            Preset::Q2 => "Apr - Jun",
            Preset::Q3 => "Jul - Sep",
            Preset::Q4 => "Oct - Dec",
            Preset::Spring => "Spring (Mar - May)",
            Preset::Summer => "Summer (Jun - Aug)",
            Preset::Autumn => "Autumn (Sep - Nov)",
        }
    }

    pub fn endpoints(self) -> (Endpoint, Endpoint) {
        let ((m1, d1), (m2, d2)) = match self {
            Preset::FullYear => ((1, 1), (12, 31)),
            Preset::Q1 => ((1, 1), (3, 31)),
            Preset::Q2 => ((4, 1), (6, 30)),
            Preset::Q3 => ((7, 1), (9, 30)),
            Preset::Q4 => ((10, 1), (12, 31)),
            Preset::Spring => ((3, 1), (5, 31)),
            Preset::Summer => ((6, 1), (8, 31)),
            Preset::Autumn => ((9, 1), (11, 30)),
        };
        (Endpoint::month_day(m1, d1), Endpoint::month_day(m2, d2))
    }

    pub fn interval(self) -> Interval {
        let (a, b) = self.endpoints();
        Interval::resolve(&a, &b)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s.trim())
            .ok_or_else(|| format!("unknown preset: {s}"))
    }
}
