mod grid;
mod pager;
mod widget;
pub(crate) use self::pager::MonthWindow;
pub(crate) use self::widget::MonthsView;
use ratatui::style::Style;
use time::Date;

/// Maps a date to the terminal style of its day cell.  The grid and the
/// widget know nothing about styling rules; the style resolver implements
/// this seam.
pub(crate) trait DateStyler {
    fn date_style(&self, date: Date) -> Style;
}

/// Formats a date as `YYYY-MM-DD`.
pub(crate) fn ymd(date: Date) -> String {
    let year = date.year();
    let month = u8::from(date.month());
    let day = date.day();
    format!("{year:04}-{month:02}-{day:02}")
}
