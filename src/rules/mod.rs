mod file;
pub(crate) use self::file::load_rules;
use crate::style::Rgb;
use std::collections::HashSet;
use time::{Date, Weekday};

/// A styling rule covering an inclusive range of dates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RangeEvent {
    pub(crate) start: Date,
    pub(crate) end: Date,
    pub(crate) background: Vec<Rgb>,
    pub(crate) text_color: Rgb,
}

impl RangeEvent {
    /// Whether `date` falls inside the event.  A reversed range
    /// (`start > end`) covers no dates at all.
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Per-weekday color sequences for a week template, Monday first.  A slot
/// that was never set is a lookup miss, distinct from a weekday configured
/// with an explicitly empty color list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct WeekdayColors([Option<Vec<Rgb>>; 7]);

impl WeekdayColors {
    pub(crate) fn set(&mut self, weekday: Weekday, colors: Vec<Rgb>) {
        self.0[usize::from(weekday.number_days_from_monday())] = Some(colors);
    }

    pub(crate) fn get(&self, weekday: Weekday) -> Option<&[Rgb]> {
        self.0[usize::from(weekday.number_days_from_monday())].as_deref()
    }
}

/// A weekday-keyed styling rule that takes effect strictly after its
/// `accept_from` date and stays in force until a later template supersedes
/// it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekTemplate {
    pub(crate) accept_from: Date,
    pub(crate) weekdays: WeekdayColors,
    pub(crate) text_color: Rgb,
}

/// A single-day override that beats any template covering the same date.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SpecialDate {
    pub(crate) date: Date,
    pub(crate) colors: Vec<Rgb>,
    pub(crate) text_color: Rgb,
}

/// The three rule collections consulted by the style resolver.  These are
/// host-supplied snapshots: lookups re-scan them on every call and nothing
/// is cached.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RuleSet {
    events: Vec<RangeEvent>,
    templates: Vec<WeekTemplate>,
    special_dates: Vec<SpecialDate>,
}

impl RuleSet {
    /// Duplicate special dates are dropped here, keeping the first entry
    /// for each date, so later lookups never depend on scan order.
    pub(crate) fn new(
        events: Vec<RangeEvent>,
        templates: Vec<WeekTemplate>,
        special_dates: Vec<SpecialDate>,
    ) -> RuleSet {
        let mut seen = HashSet::new();
        let special_dates = special_dates
            .into_iter()
            .filter(|sd| seen.insert(sd.date))
            .collect();
        RuleSet {
            events,
            templates,
            special_dates,
        }
    }

    /// The first event in collection order covering `date`; earlier entries
    /// take priority over later overlapping ones.
    pub(crate) fn event_for(&self, date: Date) -> Option<&RangeEvent> {
        self.events.iter().find(|ev| ev.contains(date))
    }

    pub(crate) fn special_for(&self, date: Date) -> Option<&SpecialDate> {
        self.special_dates.iter().find(|sd| sd.date == date)
    }

    /// The closest past template: the greatest `accept_from` strictly
    /// before `date`.  A template effective exactly on `date` does not
    /// qualify, and ties keep the earliest entry in collection order.
    pub(crate) fn template_for(&self, date: Date) -> Option<&WeekTemplate> {
        let mut best: Option<&WeekTemplate> = None;
        for template in &self.templates {
            if template.accept_from >= date {
                continue;
            }
            match best {
                Some(b) if template.accept_from <= b.accept_from => (),
                _ => best = Some(template),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    #![allow(trivial_casts)]
    use super::*;
    use time::macros::date;
    use time::Weekday::{Monday, Sunday};

    const GRAY: Rgb = Rgb::new(128, 128, 128);

    fn event(start: Date, end: Date) -> RangeEvent {
        RangeEvent {
            start,
            end,
            background: vec![GRAY],
            text_color: GRAY,
        }
    }

    fn template(accept_from: Date) -> WeekTemplate {
        WeekTemplate {
            accept_from,
            weekdays: WeekdayColors::default(),
            text_color: GRAY,
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let ev = event(date!(2025 - 01 - 01), date!(2025 - 01 - 10));
        assert!(ev.contains(date!(2025 - 01 - 01)));
        assert!(ev.contains(date!(2025 - 01 - 10)));
        assert!(!ev.contains(date!(2024 - 12 - 31)));
        assert!(!ev.contains(date!(2025 - 01 - 11)));
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let ev = event(date!(2025 - 01 - 10), date!(2025 - 01 - 01));
        assert!(!ev.contains(date!(2025 - 01 - 05)));
    }

    #[test]
    fn test_first_overlapping_event_wins() {
        let rules = RuleSet::new(
            vec![
                event(date!(2025 - 01 - 01), date!(2025 - 01 - 10)),
                event(date!(2025 - 01 - 05), date!(2025 - 01 - 20)),
            ],
            Vec::new(),
            Vec::new(),
        );
        let found = rules.event_for(date!(2025 - 01 - 07)).unwrap();
        assert_eq!(found.start, date!(2025 - 01 - 01));
    }

    #[test]
    fn test_duplicate_special_dates_keep_first() {
        let first = SpecialDate {
            date: date!(2025 - 01 - 20),
            colors: vec![Rgb::new(255, 215, 0)],
            text_color: GRAY,
        };
        let second = SpecialDate {
            date: date!(2025 - 01 - 20),
            colors: vec![Rgb::new(0, 0, 0)],
            text_color: GRAY,
        };
        let rules = RuleSet::new(Vec::new(), Vec::new(), vec![first.clone(), second]);
        assert_eq!(rules.special_for(date!(2025 - 01 - 20)), Some(&first));
    }

    #[test]
    fn test_closest_past_template_wins() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![template(date!(2025 - 01 - 01)), template(date!(2025 - 01 - 15))],
            Vec::new(),
        );
        let found = rules.template_for(date!(2025 - 01 - 20)).unwrap();
        assert_eq!(found.accept_from, date!(2025 - 01 - 15));
        let found = rules.template_for(date!(2025 - 01 - 10)).unwrap();
        assert_eq!(found.accept_from, date!(2025 - 01 - 01));
    }

    #[test]
    fn test_template_effective_on_the_query_date_is_excluded() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![template(date!(2025 - 01 - 15))],
            Vec::new(),
        );
        assert_eq!(rules.template_for(date!(2025 - 01 - 15)), None);
        assert!(rules.template_for(date!(2025 - 01 - 16)).is_some());
    }

    #[test]
    fn test_no_template_before_the_earliest() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![template(date!(2025 - 01 - 01))],
            Vec::new(),
        );
        assert_eq!(rules.template_for(date!(2024 - 12 - 01)), None);
    }

    #[test]
    fn test_template_ties_keep_the_earliest_entry() {
        let mut first = template(date!(2025 - 01 - 01));
        first.text_color = Rgb::new(1, 1, 1);
        let mut second = template(date!(2025 - 01 - 01));
        second.text_color = Rgb::new(2, 2, 2);
        let rules = RuleSet::new(Vec::new(), vec![first, second], Vec::new());
        let found = rules.template_for(date!(2025 - 02 - 01)).unwrap();
        assert_eq!(found.text_color, Rgb::new(1, 1, 1));
    }

    #[test]
    fn test_weekday_colors_distinguish_absent_from_empty() {
        let mut colors = WeekdayColors::default();
        colors.set(Monday, Vec::new());
        assert_eq!(colors.get(Monday), Some(&[] as &[Rgb]));
        assert_eq!(colors.get(Sunday), None);
    }
}
