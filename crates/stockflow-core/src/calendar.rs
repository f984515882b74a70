//! ISO calendar-week arithmetic and the projection horizon.
//!
//! Every projection bucket is an ISO week/year pair. Column labels follow the
//! fixed grammar `CW{week:02}-{year}_{suffix}` and are a compatibility
//! surface for downstream consumers; do not change the format.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::StockflowError;
use crate::StockflowResult;

/// Fixed projection horizon: 104 consecutive calendar weeks (two years).
pub const HORIZON_WEEKS: usize = 104;

/// An ISO calendar week. Ordering is (year, week).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CalWeek {
    pub year: i32,
    pub week: u32,
}

impl CalWeek {
    /// The ISO week containing `date`.
    pub fn from_date(date: NaiveDate) -> CalWeek {
        let iso = date.iso_week();
        CalWeek {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Monday of this week.
    pub fn monday(&self) -> StockflowResult<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon).ok_or_else(|| {
            StockflowError::DateError(format!("no such ISO week: {}-{}", self.year, self.week))
        })
    }

    /// The week immediately after this one. Long ISO years roll through
    /// week 53; all others roll from 52 to week 1 of the next year.
    pub fn succ(&self) -> StockflowResult<CalWeek> {
        let next = self.monday()? + Duration::days(7);
        Ok(CalWeek::from_date(next))
    }

    /// `CW{week:02}-{year}`, e.g. `CW07-2026`.
    pub fn label(&self) -> String {
        format!("CW{:02}-{}", self.week, self.year)
    }

    /// A weekly metric column label, e.g. `CW07-2026_sales_missed_w`.
    pub fn column(&self, suffix: &str) -> String {
        format!("CW{:02}-{}_{}", self.week, self.year, suffix)
    }
}

impl fmt::Display for CalWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The dense, gap-free sequence of [`HORIZON_WEEKS`] weeks starting at the
/// week containing the run date. Fixed length, strictly increasing.
#[derive(Debug, Clone)]
pub struct Horizon {
    weeks: Vec<CalWeek>,
    index: HashMap<CalWeek, usize>,
}

impl Horizon {
    pub fn starting(run_date: NaiveDate) -> StockflowResult<Horizon> {
        let mut weeks = Vec::with_capacity(HORIZON_WEEKS);
        let mut index = HashMap::with_capacity(HORIZON_WEEKS);
        let mut cursor = CalWeek::from_date(run_date).monday()?;

        for i in 0..HORIZON_WEEKS {
            let week = CalWeek::from_date(cursor);
            index.insert(week, i);
            weeks.push(week);
            cursor += Duration::days(7);
        }

        Ok(Horizon { weeks, index })
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn weeks(&self) -> &[CalWeek] {
        &self.weeks
    }

    pub fn first(&self) -> CalWeek {
        self.weeks[0]
    }

    pub fn last(&self) -> CalWeek {
        self.weeks[self.weeks.len() - 1]
    }

    /// Position of `week` in the horizon, if it falls inside it.
    pub fn index_of(&self, week: &CalWeek) -> Option<usize> {
        self.index.get(week).copied()
    }

    /// Position of the week containing `date`, if inside the horizon.
    pub fn index_of_date(&self, date: NaiveDate) -> Option<usize> {
        self.index_of(&CalWeek::from_date(date))
    }

    /// A zeroed quantity vector aligned to the horizon.
    pub fn zeroed(&self) -> Vec<rust_decimal::Decimal> {
        vec![rust_decimal::Decimal::ZERO; self.weeks.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calweek_from_date() {
        // 2026-08-05 is a Wednesday in ISO week 32 of 2026.
        assert_eq!(
            CalWeek::from_date(date(2026, 8, 5)),
            CalWeek { year: 2026, week: 32 }
        );
    }

    #[test]
    fn test_calweek_year_boundary() {
        // 2024-12-30 (Monday) belongs to ISO week 1 of 2025.
        assert_eq!(
            CalWeek::from_date(date(2024, 12, 30)),
            CalWeek { year: 2025, week: 1 }
        );
    }

    #[test]
    fn test_label_zero_pads_week() {
        let week = CalWeek { year: 2026, week: 7 };
        assert_eq!(week.label(), "CW07-2026");
        assert_eq!(week.column("sales_missed_w"), "CW07-2026_sales_missed_w");
    }

    #[test]
    fn test_succ_rolls_over_short_year() {
        // 2025 has 52 ISO weeks.
        let week = CalWeek { year: 2025, week: 52 };
        assert_eq!(week.succ().unwrap(), CalWeek { year: 2026, week: 1 });
    }

    #[test]
    fn test_succ_keeps_week_53_in_long_year() {
        // 2026 is a long ISO year.
        let week = CalWeek { year: 2026, week: 52 };
        assert_eq!(week.succ().unwrap(), CalWeek { year: 2026, week: 53 });
        assert_eq!(
            week.succ().unwrap().succ().unwrap(),
            CalWeek { year: 2027, week: 1 }
        );
    }

    #[test]
    fn test_horizon_is_dense_and_increasing() {
        let horizon = Horizon::starting(date(2026, 8, 5)).unwrap();
        assert_eq!(horizon.len(), HORIZON_WEEKS);
        assert_eq!(horizon.first(), CalWeek { year: 2026, week: 32 });
        for pair in horizon.weeks().windows(2) {
            assert_eq!(pair[0].succ().unwrap(), pair[1]);
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_horizon_includes_week_53() {
        let horizon = Horizon::starting(date(2026, 8, 5)).unwrap();
        assert!(horizon
            .index_of(&CalWeek { year: 2026, week: 53 })
            .is_some());
    }

    #[test]
    fn test_horizon_index_of_date() {
        let horizon = Horizon::starting(date(2026, 8, 5)).unwrap();
        assert_eq!(horizon.index_of_date(date(2026, 8, 5)), Some(0));
        assert_eq!(horizon.index_of_date(date(2026, 8, 14)), Some(1));
        assert_eq!(horizon.index_of_date(date(2026, 8, 1)), None);
    }
}
