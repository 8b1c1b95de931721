mod app;
mod calendar;
mod export;
mod help;
mod locale;
mod rules;
mod style;
mod theme;
use crate::app::{App, ViewOptions};
use crate::calendar::MonthWindow;
use crate::export::css_report;
use crate::locale::{EnglishLocale, WeekStart};
use crate::rules::{load_rules, RuleSet};
use crate::style::{StyleMode, StyleResolver};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, Month, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    start: Option<Date>,
    months: u8,
    columns: u16,
    mode: StyleMode,
    week_start: WeekStart,
    fallback_var: Option<String>,
    css: bool,
    rules_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            start: None,
            months: 3,
            columns: 1,
            mode: StyleMode::Filled,
            week_start: WeekStart::Monday,
            fallback_var: None,
            css: false,
            rules_file: None,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('d') | Arg::Long("date") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(date) => opts.start = Some(date),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Short('m') | Arg::Long("months") => opts.months = parser.value()?.parse()?,
                Arg::Short('c') | Arg::Long("columns") => opts.columns = parser.value()?.parse()?,
                Arg::Long("pilled") => opts.mode = StyleMode::Pilled,
                Arg::Long("sunday") => opts.week_start = WeekStart::Sunday,
                Arg::Long("bg-var") => opts.fallback_var = Some(parser.value()?.string()?),
                Arg::Long("css") => opts.css = true,
                Arg::Value(value) if opts.rules_file.is_none() => {
                    opts.rules_file = Some(value.into());
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let Options {
                    start,
                    months,
                    columns,
                    mode,
                    week_start,
                    fallback_var,
                    css,
                    rules_file,
                } = opts;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let start = match start {
                    Some(date) => date,
                    None => Date::from_calendar_date(today.year(), Month::January, 1)
                        .expect("January 1 should exist in every year"),
                };
                let rule_set = match &rules_file {
                    Some(path) => load_rules(path)?,
                    None => RuleSet::default(),
                };
                let resolver = StyleResolver::new(rule_set, mode, fallback_var);
                let window = MonthWindow::new(start, months, EnglishLocale);
                if css {
                    print!("{}", css_report(&window, &resolver));
                    return Ok(());
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let view = ViewOptions {
                        week_start,
                        columns,
                        today,
                    };
                    App::new(window, resolver, view).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: tintcal [OPTIONS] [RULES-FILE]");
                println!();
                println!("Scrollable terminal calendar painting dates from a JSON rules file");
                println!();
                println!("Options:");
                println!("  -d, --date <YYYY-MM-DD>  Start the calendar at the given date");
                println!("                           [default: January 1 of the current year]");
                println!("  -m, --months <N>         Months per page, clamped to 1-12 [default: 3]");
                println!("  -c, --columns <N>        Month columns in the layout [default: 1]");
                println!("      --pilled             Pill styling instead of filled cells");
                println!("      --sunday             Start weekday labels on Sunday");
                println!("      --bg-var <NAME>      CSS variable used as the fallback background");
                println!("      --css                Print resolved CSS per visible date and exit");
                println!("  -h, --help               Display this help message and exit");
                println!("  -V, --version            Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
