//! Day-weighted apportionment of monthly demand into calendar weeks.
//!
//! A month's quantity is split across every ISO week overlapping it,
//! proportionally to the number of month days falling in each week. Weekly
//! shares round to two decimal places; the final overlapping week absorbs
//! the rounding residual so the weekly sum reproduces the monthly input
//! exactly.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calendar::CalWeek;
use crate::types::Qty;

/// Apportion one monthly quantity across the ISO weeks overlapping the
/// month containing `month_anchor`.
///
/// Returns (week, share) pairs in week order. The caller drops weeks
/// outside the horizon and accumulates the rest.
pub fn apportion(month_anchor: NaiveDate, quantity: Qty) -> Vec<(CalWeek, Qty)> {
    let overlaps = week_overlaps(month_anchor);
    let total_days: i64 = overlaps.iter().map(|(_, d)| d).sum();
    if total_days == 0 {
        return Vec::new();
    }
    let total = Decimal::from(total_days);

    let mut shares = Vec::with_capacity(overlaps.len());
    let mut allocated = Decimal::ZERO;
    for (i, (week, days)) in overlaps.iter().enumerate() {
        let share = if i + 1 == overlaps.len() {
            quantity - allocated
        } else {
            (quantity * Decimal::from(*days) / total)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        allocated += share;
        shares.push((*week, share));
    }
    shares
}

/// The ISO weeks overlapping the month, with the day count of each overlap.
fn week_overlaps(month_anchor: NaiveDate) -> Vec<(CalWeek, i64)> {
    let Some(first) = NaiveDate::from_ymd_opt(month_anchor.year(), month_anchor.month(), 1)
    else {
        return Vec::new();
    };

    let mut overlaps: Vec<(CalWeek, i64)> = Vec::new();
    let mut day = first;
    while day.month() == first.month() {
        let week = CalWeek::from_date(day);
        match overlaps.last_mut() {
            Some((last, count)) if *last == week => *count += 1,
            _ => overlaps.push((week, 1)),
        }
        day += Duration::days(1);
    }
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_31_day_month_with_3_7_7_7_7_overlap() {
        // January 2027 starts on a Friday: 3 days in the first week
        // (week 53 of long year 2026), then four full weeks.
        let shares = apportion(date(2027, 1, 15), dec!(310));
        let weeks: Vec<CalWeek> = shares.iter().map(|(w, _)| *w).collect();
        let quantities: Vec<Qty> = shares.iter().map(|(_, q)| *q).collect();

        assert_eq!(weeks[0], CalWeek { year: 2026, week: 53 });
        assert_eq!(weeks[1], CalWeek { year: 2027, week: 1 });
        assert_eq!(
            quantities,
            vec![dec!(30), dec!(70), dec!(70), dec!(70), dec!(70)]
        );
    }

    #[test]
    fn test_weekly_sum_reconciles_exactly() {
        for quantity in [dec!(100), dec!(1), dec!(0.07), dec!(12345.67)] {
            let shares = apportion(date(2026, 9, 10), quantity);
            let sum: Qty = shares.iter().map(|(_, q)| *q).sum();
            assert_eq!(sum, quantity, "monthly sum must reconcile");
        }
    }

    #[test]
    fn test_weeks_are_strictly_increasing() {
        let shares = apportion(date(2026, 12, 1), dec!(500));
        for pair in shares.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn test_full_weeks_share_equally() {
        // February 2027 is exactly four ISO weeks (Mon Feb 1 .. Sun Feb 28).
        let shares = apportion(date(2027, 2, 14), dec!(280));
        assert_eq!(shares.len(), 4);
        for (_, quantity) in shares {
            assert_eq!(quantity, dec!(70));
        }
    }

    #[test]
    fn test_zero_quantity_allocates_zero() {
        let shares = apportion(date(2026, 9, 1), Decimal::ZERO);
        assert!(shares.iter().all(|(_, q)| q.is_zero()));
    }

    #[test]
    fn test_anchor_day_does_not_matter() {
        let a = apportion(date(2026, 10, 1), dec!(93));
        let b = apportion(date(2026, 10, 28), dec!(93));
        assert_eq!(a, b);
    }
}
