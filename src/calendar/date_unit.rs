use core::fmt;
use core::iter;

use ::time::Date;
use derive_more::Display;

use crate::calendar::format_date;

/// Which generator variant is run, which decides the unit of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SheetKind {
    /// One portrait page per day.
    #[display("Daily")]
    Daily,
    /// One landscape page per week.
    #[display("Weekly")]
    Weekly,
}

impl SheetKind {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Daily => "Daily Stats Sheet",
            Self::Weekly => "Weekly Stats Sheet",
        }
    }

    /// Makes the unit of this kind starting at `date`.
    #[must_use]
    pub const fn unit(&self, date: Date) -> DateUnit {
        match self {
            Self::Daily => DateUnit::Day(date),
            Self::Weekly => DateUnit::Week(date),
        }
    }
}

/// A single day or a monday-anchored week, rendered on exactly one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateUnit {
    Day(Date),
    Week(Date),
}

impl DateUnit {
    /// The first day of the unit.
    #[must_use]
    pub const fn date(&self) -> Date {
        match self {
            Self::Day(date) | Self::Week(date) => *date,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Day(_) => 1,
            Self::Week(_) => 7,
        }
    }

    /// All days covered by this unit, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        iter::successors(Some(self.date()), |date| date.next_day()).take(self.len())
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "Date {}", format_date(*date)),
            Self::Week(date) => write!(f, "Week of {}", format_date(*date)),
        }
    }
}

/// Label of a day separator row, for example `Monday 2024-06-10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLabel(pub Date);

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.weekday(), format_date(self.0))
    }
}
