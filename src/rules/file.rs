use super::{RangeEvent, RuleSet, SpecialDate, WeekTemplate, WeekdayColors};
use crate::style::{ParseColorError, Rgb};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Weekday};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Reads a JSON rules file and converts it into a validated `RuleSet`.
pub(crate) fn load_rules(path: &Path) -> anyhow::Result<RuleSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    let parsed = serde_json::from_str::<RulesFile>(&text)
        .with_context(|| format!("failed to parse rules file {}", path.display()))?;
    let rules = parsed
        .into_rules()
        .with_context(|| format!("invalid rule in {}", path.display()))?;
    Ok(rules)
}

/// A rules-file entry that could not be converted into a rule.
#[derive(Debug, Error)]
pub(crate) enum RuleFileError {
    #[error("invalid date {value:?}")]
    Date {
        value: String,
        source: time::error::Parse,
    },
    #[error(transparent)]
    Color(#[from] ParseColorError),
}

/// On-disk mirror of `RuleSet`: dates and colors arrive as strings and are
/// validated during conversion.
#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RulesFile {
    #[serde(default)]
    events: Vec<EventEntry>,
    #[serde(default)]
    templates: Vec<TemplateEntry>,
    #[serde(default)]
    special_dates: Vec<SpecialDateEntry>,
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EventEntry {
    start: String,
    end: String,
    #[serde(default)]
    colors: Vec<String>,
    text_color: String,
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TemplateEntry {
    accept_from: String,
    #[serde(default)]
    weekdays: WeekdayEntry,
    text_color: String,
}

#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct WeekdayEntry {
    monday: Option<Vec<String>>,
    tuesday: Option<Vec<String>>,
    wednesday: Option<Vec<String>>,
    thursday: Option<Vec<String>>,
    friday: Option<Vec<String>>,
    saturday: Option<Vec<String>>,
    sunday: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SpecialDateEntry {
    date: String,
    #[serde(default)]
    colors: Vec<String>,
    text_color: String,
}

impl RulesFile {
    fn into_rules(self) -> Result<RuleSet, RuleFileError> {
        let mut events = Vec::with_capacity(self.events.len());
        for entry in self.events {
            events.push(RangeEvent {
                start: parse_date(&entry.start)?,
                end: parse_date(&entry.end)?,
                background: parse_colors(&entry.colors)?,
                text_color: entry.text_color.parse()?,
            });
        }
        let mut templates = Vec::with_capacity(self.templates.len());
        for entry in self.templates {
            templates.push(WeekTemplate {
                accept_from: parse_date(&entry.accept_from)?,
                weekdays: entry.weekdays.into_colors()?,
                text_color: entry.text_color.parse()?,
            });
        }
        let mut special_dates = Vec::with_capacity(self.special_dates.len());
        for entry in self.special_dates {
            special_dates.push(SpecialDate {
                date: parse_date(&entry.date)?,
                colors: parse_colors(&entry.colors)?,
                text_color: entry.text_color.parse()?,
            });
        }
        Ok(RuleSet::new(events, templates, special_dates))
    }
}

impl WeekdayEntry {
    /// Weekdays left out of the file stay absent in the template; the
    /// resolver treats them as lookup misses rather than empty color lists.
    fn into_colors(self) -> Result<WeekdayColors, RuleFileError> {
        let slots = [
            (Weekday::Monday, self.monday),
            (Weekday::Tuesday, self.tuesday),
            (Weekday::Wednesday, self.wednesday),
            (Weekday::Thursday, self.thursday),
            (Weekday::Friday, self.friday),
            (Weekday::Saturday, self.saturday),
            (Weekday::Sunday, self.sunday),
        ];
        let mut colors = WeekdayColors::default();
        for (weekday, entry) in slots {
            if let Some(values) = entry {
                colors.set(weekday, parse_colors(&values)?);
            }
        }
        Ok(colors)
    }
}

fn parse_date(value: &str) -> Result<Date, RuleFileError> {
    Date::parse(value, &YMD_FMT).map_err(|source| RuleFileError::Date {
        value: value.to_owned(),
        source,
    })
}

fn parse_colors(values: &[String]) -> Result<Vec<Rgb>, RuleFileError> {
    let colors = values
        .iter()
        .map(|value| value.parse())
        .collect::<Result<Vec<Rgb>, ParseColorError>>()?;
    Ok(colors)
}
