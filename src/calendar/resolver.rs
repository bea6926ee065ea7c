use core::iter;

use ::time::{Date, Duration};
use log::debug;
use thiserror::Error;

use crate::calendar::{week_start, DateUnit, SheetKind};

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{weeks} week(s) starting at {start} exceed the supported calendar range")]
pub struct DateOutOfRange {
    start: Date,
    weeks: usize,
}

/// Resolves the units to render, one page per unit, in chronological order.
///
/// The range starts at the monday of the week containing `reference` and spans
/// `weeks` consecutive weeks. A daily sheet has `7 * weeks` units, a weekly sheet
/// has `weeks` units.
///
/// The whole range is checked against the calendar before any unit is made.
pub fn resolve_units(
    kind: SheetKind,
    reference: Date,
    weeks: usize,
) -> Result<Vec<DateUnit>, DateOutOfRange> {
    let start = week_start(reference).ok_or(DateOutOfRange {
        start: reference,
        weeks,
    })?;
    debug!("resolved {} to the week starting at {}", reference, start);

    let out_of_range = || DateOutOfRange { start, weeks };

    let (count, step) = match kind {
        SheetKind::Daily => (weeks.checked_mul(7).ok_or_else(out_of_range)?, 1),
        SheetKind::Weekly => (weeks, 7),
    };

    let Some(last) = count.checked_sub(1) else {
        return Ok(Vec::new());
    };

    // days between the first and the last unit
    let span = i64::try_from(last)
        .ok()
        .and_then(|last| last.checked_mul(step))
        .ok_or_else(out_of_range)?;

    if span > (Date::MAX - start).whole_days() {
        return Err(out_of_range());
    }

    let step = Duration::days(step);
    let units = iter::successors(Some(start), |date| date.checked_add(step))
        .take(count)
        .map(|date| kind.unit(date))
        .collect::<Vec<_>>();

    debug_assert_eq!(units.len(), count);
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::time::macros::date;
    use ::time::Weekday;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_weekly_units() {
        assert_eq!(
            resolve_units(SheetKind::Weekly, date!(2024 - 06 - 12), 1),
            Ok(vec![DateUnit::Week(date!(2024 - 06 - 10))])
        );
        assert_eq!(
            resolve_units(SheetKind::Weekly, date!(2024 - 06 - 12), 3),
            Ok(vec![
                DateUnit::Week(date!(2024 - 06 - 10)),
                DateUnit::Week(date!(2024 - 06 - 17)),
                DateUnit::Week(date!(2024 - 06 - 24)),
            ])
        );
    }

    #[test]
    fn test_daily_units_are_consecutive() {
        let units = resolve_units(SheetKind::Daily, date!(2024 - 06 - 12), 2).unwrap();

        assert_eq!(units.len(), 14);
        assert_eq!(units[0], DateUnit::Day(date!(2024 - 06 - 10)));
        assert_eq!(units[13], DateUnit::Day(date!(2024 - 06 - 23)));
        assert_eq!(units[0].date().weekday(), Weekday::Monday);

        for pair in units.windows(2) {
            assert_eq!(pair[0].date().next_day(), Some(pair[1].date()));
        }
    }

    #[test]
    fn test_unit_counts() {
        for weeks in 0..6 {
            assert_eq!(
                resolve_units(SheetKind::Daily, date!(2024 - 02 - 29), weeks)
                    .unwrap()
                    .len(),
                7 * weeks
            );
            assert_eq!(
                resolve_units(SheetKind::Weekly, date!(2024 - 02 - 29), weeks)
                    .unwrap()
                    .len(),
                weeks
            );
        }
    }

    #[test]
    fn test_zero_weeks() {
        assert_eq!(
            resolve_units(SheetKind::Daily, date!(2024 - 06 - 12), 0),
            Ok(Vec::new())
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(resolve_units(SheetKind::Daily, Date::MAX, 1).is_err());
        assert!(resolve_units(SheetKind::Weekly, Date::MAX, 2).is_err());
    }

    #[test]
    fn test_last_week_of_calendar() {
        let start = week_start(Date::MAX).unwrap();
        let available = (Date::MAX - start).whole_days();

        assert_eq!(
            resolve_units(SheetKind::Weekly, Date::MAX, 1),
            Ok(vec![DateUnit::Week(start)])
        );
        assert_eq!(
            resolve_units(SheetKind::Daily, Date::MAX, 1).is_ok(),
            available >= 6
        );
    }

    #[test]
    fn test_huge_week_counts() {
        for weeks in [1 << 40, usize::MAX / 2, usize::MAX] {
            assert_eq!(
                resolve_units(SheetKind::Weekly, date!(2024 - 06 - 12), weeks),
                Err(DateOutOfRange {
                    start: date!(2024 - 06 - 10),
                    weeks,
                })
            );
            assert_eq!(
                resolve_units(SheetKind::Daily, date!(2024 - 06 - 12), weeks),
                Err(DateOutOfRange {
                    start: date!(2024 - 06 - 10),
                    weeks,
                })
            );
        }
    }
}
