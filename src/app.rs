use crate::calendar::{ymd, DateStyler, MonthWindow, MonthsView};
use crate::help::Help;
use crate::locale::{LocaleNames, WeekStart};
use crate::theme::{BASE_STYLE, FOOTER_STYLE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, read};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
};
use std::io::{self, Write};
use time::Date;

/// Display options fixed at startup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ViewOptions {
    pub(crate) week_start: WeekStart,
    pub(crate) columns: u16,
    pub(crate) today: Date,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S, L> {
    window: MonthWindow<L>,
    styler: S,
    view: ViewOptions,
    home: Date,
    state: AppState,
}

impl<S: DateStyler, L: LocaleNames> App<S, L> {
    pub(crate) fn new(window: MonthWindow<L>, styler: S, view: ViewOptions) -> App<S, L> {
        let home = window.anchor();
        App {
            window,
            styler,
            view,
            home,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => self.next_page(),
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => self.previous_page(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.window.jump_to(self.home);
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn next_page(&mut self) -> bool {
        self.window.next().is_ok()
    }

    fn previous_page(&mut self) -> bool {
        self.window.previous().is_ok()
    }

    /// One line summarizing the visible range, its years, and the page
    /// size.
    fn footer_line(&self) -> String {
        let range = match (self.window.first_visible_date(), self.window.last_visible_date()) {
            (Some(first), Some(last)) => format!("{} .. {}", ymd(first), ymd(last)),
            _ => String::new(),
        };
        let years = match (self.window.start_year(), self.window.end_year()) {
            (Some(start), Some(end)) if start == end => format!("{start}"),
            (Some(start), Some(end)) => format!("{start}-{end}"),
            _ => String::new(),
        };
        let months = self.window.months_to_show();
        format!(" {range}  [{years}]  {months}mo ")
    }
}

impl<S: DateStyler, L: LocaleNames> Widget for &mut App<S, L> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let footer_y = area.height.saturating_sub(1);
        let cal_area = Rect {
            height: footer_y,
            ..area
        };
        let view = MonthsView::new(
            &self.styler,
            self.view.week_start,
            self.view.columns,
            self.view.today,
        );
        view.render(cal_area, buf, &mut self.window);
        if area.height > 0 {
            buf.set_string(area.x, area.y + footer_y, self.footer_line(), FOOTER_STYLE);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
