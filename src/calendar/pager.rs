use super::grid::{add_months, first_of_month, GridBuilder, MonthGrid, MAX_MONTHS, MIN_MONTHS};
use crate::locale::LocaleNames;
use thiserror::Error;
use time::Date;

/// The navigation state: an anchor month, a page size, and the grids
/// generated for the current page.  Navigating replaces the grids
/// wholesale; nothing from the previous page is kept.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthWindow<L> {
    anchor: Date,
    months_to_show: u8,
    grids: Vec<MonthGrid>,
    builder: GridBuilder<L>,
}

impl<L: LocaleNames> MonthWindow<L> {
    /// `months_to_show` is clamped into `[1, 12]`; `start` may be any day
    /// and is normalized to the first of its month.
    pub(crate) fn new(start: Date, months_to_show: u8, locale: L) -> MonthWindow<L> {
        let months_to_show = months_to_show.clamp(MIN_MONTHS, MAX_MONTHS);
        let builder = GridBuilder::new(locale);
        let anchor = first_of_month(start);
        let grids = builder.months_from(anchor, months_to_show);
        MonthWindow {
            anchor,
            months_to_show,
            grids,
            builder,
        }
    }

    pub(crate) fn grids(&self) -> &[MonthGrid] {
        &self.grids
    }

    pub(crate) fn locale(&self) -> &L {
        self.builder.locale()
    }

    pub(crate) fn anchor(&self) -> Date {
        self.anchor
    }

    pub(crate) fn months_to_show(&self) -> u8 {
        self.months_to_show
    }

    /// Advances by one full page of months, so consecutive pages neither
    /// overlap nor skip.  On failure the window is left untouched.
    pub(crate) fn next(&mut self) -> Result<(), OutOfRangeError> {
        self.shift(i32::from(self.months_to_show))
    }

    /// Retreats by one full page of months.
    pub(crate) fn previous(&mut self) -> Result<(), OutOfRangeError> {
        self.shift(-i32::from(self.months_to_show))
    }

    fn shift(&mut self, months: i32) -> Result<(), OutOfRangeError> {
        let anchor = add_months(self.anchor, months).ok_or(OutOfRangeError)?;
        self.anchor = anchor;
        self.regenerate();
        Ok(())
    }

    /// Re-anchors the window on `date`'s month.
    pub(crate) fn jump_to(&mut self, date: Date) {
        self.anchor = first_of_month(date);
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.grids = self.builder.months_from(self.anchor, self.months_to_show);
    }

    /// The first non-padding date of the first displayed month.
    pub(crate) fn first_visible_date(&self) -> Option<Date> {
        self.grids.first().and_then(MonthGrid::first_date)
    }

    /// The last date of the last displayed month.
    pub(crate) fn last_visible_date(&self) -> Option<Date> {
        self.grids.last().and_then(MonthGrid::last_date)
    }

    /// The year of the first displayed month, independent of padding.
    pub(crate) fn start_year(&self) -> Option<i32> {
        self.grids.first().map(|grid| grid.year)
    }

    /// The year of the last displayed month.
    pub(crate) fn end_year(&self) -> Option<i32> {
        self.grids.last().map(|grid| grid.year)
    }
}

/// A navigation action would move the window outside the years `time` can
/// represent.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("paged past the supported date range")]
pub(crate) struct OutOfRangeError;
