use crate::locale::LocaleNames;
use time::{Date, Month};

/// Smallest and largest allowed page sizes; the navigation controller
/// clamps whatever the host asks for into this range.
pub(super) const MIN_MONTHS: u8 = 1;
pub(super) const MAX_MONTHS: u8 = 12;

/// One displayed month: its label parts and a padded cell sequence.  Cells
/// hold `None` for the leading slots before the month's first weekday
/// (Monday-first), then one `Some` per calendar day.  There is no trailing
/// padding: the final week may be partial.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    pub(crate) year: i32,
    pub(crate) month: Month,
    pub(crate) name: String,
    pub(crate) cells: Vec<Option<Date>>,
}

impl MonthGrid {
    pub(crate) fn first_date(&self) -> Option<Date> {
        self.cells.iter().flatten().copied().next()
    }

    pub(crate) fn last_date(&self) -> Option<Date> {
        self.cells.iter().rev().flatten().copied().next()
    }
}

/// Builds month grids, deferring name formatting to the injected locale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GridBuilder<L> {
    locale: L,
}

impl<L: LocaleNames> GridBuilder<L> {
    pub(super) fn new(locale: L) -> GridBuilder<L> {
        GridBuilder { locale }
    }

    pub(super) fn locale(&self) -> &L {
        &self.locale
    }

    /// Grids for `count` consecutive months starting at `anchor`'s month.
    /// Truncated early only when the calendar runs past the supported year
    /// range.
    pub(super) fn months_from(&self, anchor: Date, count: u8) -> Vec<MonthGrid> {
        let mut grids = Vec::with_capacity(usize::from(count));
        let mut first = first_of_month(anchor);
        for _ in 0..count {
            grids.push(self.month_of(first));
            match add_months(first, 1) {
                Some(next) => first = next,
                None => break,
            }
        }
        grids
    }

    fn month_of(&self, first: Date) -> MonthGrid {
        let year = first.year();
        let month = first.month();
        let leading = usize::from(first.weekday().number_days_from_monday());
        let mut cells = vec![None; leading];
        cells.reserve(usize::from(month.length(year)));
        for day in 1..=month.length(year) {
            let date = Date::from_calendar_date(year, month, day)
                .expect("every day up to the month's length should be a valid date");
            cells.push(Some(date));
        }
        MonthGrid {
            year,
            month,
            name: self.locale.month_name(month),
            cells,
        }
    }
}

/// The first day of `date`'s month.
pub(super) fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("day 1 should be valid in every month")
}

/// The first day of the month `delta` months away from `date`'s month, or
/// `None` past the supported year range.
pub(super) fn add_months(date: Date, delta: i32) -> Option<Date> {
    let months =
        i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1 + i64::from(delta);
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(months.rem_euclid(12) + 1).ok()?).ok()?;
    Date::from_calendar_date(year, month, 1).ok()
}
