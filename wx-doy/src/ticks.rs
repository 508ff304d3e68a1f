//! X-axis ticks: month starts inside the interval plus both interval ends.

use crate::calendar::{self, Doy};
use crate::interval::Interval;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    pub doy: Doy,
    pub label: String,
}

/// Sorted, distinct ticks for `interval`.
pub fn ticks(interval: Interval) -> Vec<Tick> {
    let mut doys: Vec<Doy> = calendar::month_start_doys()
        .into_iter()
        .filter(|d| interval.contains(*d))
        .collect();
    doys.push(interval.start());
    doys.push(interval.end());
    doys.sort_unstable();
    doys.dedup();
    doys.into_iter()
        .map(|doy| Tick {
            doy,
            label: calendar::doy_label(doy),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doys(interval: Interval) -> Vec<Doy> {
        ticks(interval).into_iter().map(|t| t.doy).collect()
    }

    #[test]
    fn full_year_has_month_starts_and_year_end() {
        let t = ticks(Interval::FULL_YEAR);
        assert_eq!(t.len(), 13);
        assert_eq!(t[0].label, "01-jan");
        assert_eq!(t[2].label, "01-mar");
        assert_eq!(t[12].label, "31-dec");
    }

    #[test]
    fn endpoints_always_included() {
        assert_eq!(doys(Interval::new(45, 100)), vec![45, 60, 91, 100]);
    }

    #[test]
    fn interval_inside_one_month() {
        let t = ticks(Interval::new(33, 40));
        assert_eq!(t.iter().map(|t| t.doy).collect::<Vec<_>>(), vec![33, 40]);
        assert_eq!(t[0].label, "02-feb");
        assert_eq!(t[1].label, "09-feb");
    }

    #[test]
    fn single_day_interval_has_one_tick() {
        assert_eq!(doys(Interval::new(60, 60)), vec![60]);
    }
}
