use super::grid::MonthGrid;
use super::pager::MonthWindow;
use super::DateStyler;
use crate::locale::{LocaleNames, WeekStart};
use crate::theme::{TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Span, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use std::marker::PhantomData;
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of one month block: seven day columns
const MONTH_WIDTH: u16 = DAY_WIDTH * 7;

/// Lines taken up by the month label and the weekday header
const HEADER_LINES: u16 = 2;

/// A 31-day month starting on the weekend needs six week rows
const MAX_WEEK_ROWS: u16 = 6;

const MONTH_HEIGHT: u16 = HEADER_LINES + MAX_WEEK_ROWS;

/// Blank columns between horizontally adjacent month blocks
const COLUMN_GUTTER: u16 = 3;

/// Blank lines between vertically adjacent month blocks
const ROW_GUTTER: u16 = 1;

/// Renders a `MonthWindow`'s grids in a column layout, one block per month,
/// asking the styler for every day cell's style.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthsView<'a, S, L> {
    styler: &'a S,
    week_start: WeekStart,
    columns: u16,
    today: Date,
    _locale: PhantomData<L>,
}

impl<'a, S, L> MonthsView<'a, S, L> {
    pub(crate) fn new(
        styler: &'a S,
        week_start: WeekStart,
        columns: u16,
        today: Date,
    ) -> MonthsView<'a, S, L> {
        MonthsView {
            styler,
            week_start,
            columns: columns.max(1),
            today,
            _locale: PhantomData,
        }
    }
}

impl<S: DateStyler, L: LocaleNames> StatefulWidget for MonthsView<'_, S, L> {
    type State = MonthWindow<L>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let labels = state.locale().weekday_names(self.week_start);
        let mut canvas = BufferCanvas::new(area, buf);
        for (i, grid) in (0u16..).zip(state.grids()) {
            let x = (i % self.columns).saturating_mul(MONTH_WIDTH + COLUMN_GUTTER);
            let y = (i / self.columns).saturating_mul(MONTH_HEIGHT + ROW_GUTTER);
            self.draw_month(&mut canvas, grid, &labels, x, y);
        }
    }
}

impl<S: DateStyler, L> MonthsView<'_, S, L> {
    fn draw_month(
        &self,
        canvas: &mut BufferCanvas<'_>,
        grid: &MonthGrid,
        labels: &[String; 7],
        x: u16,
        y: u16,
    ) {
        let title = format!("{} {}", grid.name, grid.year);
        let indent = MONTH_WIDTH.saturating_sub(u16::try_from(title.len()).unwrap_or(u16::MAX)) / 2;
        canvas.print(y, x + indent, title, TITLE_STYLE);
        for (col, label) in (0u16..).zip(labels) {
            canvas.print(y + 1, x + col * DAY_WIDTH, format!("{label:>3} "), WEEKDAY_STYLE);
        }
        for (slot, cell) in (0u16..).zip(&grid.cells) {
            let Some(date) = *cell else {
                continue;
            };
            let span = self.day_span(date);
            canvas.print(
                y + HEADER_LINES + slot / 7,
                x + (slot % 7) * DAY_WIDTH,
                span.content,
                span.style,
            );
        }
    }

    fn day_span(&self, date: Date) -> Span<'static> {
        let day = date.day();
        let text = if date == self.today {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        };
        Span::styled(text, self.styler.date_style(date))
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn print<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
