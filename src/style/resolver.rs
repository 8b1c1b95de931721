use super::color::Rgb;
use super::gradient::{background_image, GradientDirection};
use crate::calendar::DateStyler;
use crate::rules::{RangeEvent, RuleSet, SpecialDate, WeekTemplate};
use ratatui::style::Style;
use time::Date;

/// Visual mode of a calendar variant: Filled paints the whole cell with a
/// diagonal gradient, Pilled paints a horizontal pill behind the date.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum StyleMode {
    #[default]
    Filled,
    Pilled,
}

/// The computed styling for one date: a CSS background value (gradient,
/// `var(…)` reference, or empty for none) and an optional text color.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ResolvedStyle {
    pub(crate) background: String,
    pub(crate) text_color: Option<String>,
}

/// The rule that won a date.
#[derive(Clone, Copy, Debug)]
enum StyleSource<'a> {
    Event(&'a RangeEvent),
    Special(&'a SpecialDate),
    Template(&'a WeekTemplate),
}

impl StyleSource<'_> {
    fn colors(&self, date: Date) -> &[Rgb] {
        match self {
            StyleSource::Event(event) => &event.background,
            StyleSource::Special(special) => &special.colors,
            // A template that omits the looked-up weekday contributes no
            // colors; the cell renders unstyled rather than faulting.
            StyleSource::Template(template) => {
                template.weekdays.get(date.weekday()).unwrap_or(&[])
            }
        }
    }

    fn text_color(&self) -> Rgb {
        match self {
            StyleSource::Event(event) => event.text_color,
            StyleSource::Special(special) => special.text_color,
            StyleSource::Template(template) => template.text_color,
        }
    }
}

/// The precedence chain, evaluated in order; the first source to claim a
/// date wins and evaluation stops.
const PRECEDENCE: [for<'a> fn(&'a RuleSet, Date) -> Option<StyleSource<'a>>; 3] =
    [event_source, special_source, template_source];

fn event_source(rules: &RuleSet, date: Date) -> Option<StyleSource<'_>> {
    rules.event_for(date).map(StyleSource::Event)
}

fn special_source(rules: &RuleSet, date: Date) -> Option<StyleSource<'_>> {
    rules.special_for(date).map(StyleSource::Special)
}

fn template_source(rules: &RuleSet, date: Date) -> Option<StyleSource<'_>> {
    rules.template_for(date).map(StyleSource::Template)
}

/// Resolves the styling of displayed dates for one calendar variant.  The
/// resolver is mode-exclusive: it answers queries for its configured mode
/// and yields the fallback for the other, so a Filled calendar never leaks
/// event colors into pill queries and vice versa.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct StyleResolver {
    rules: RuleSet,
    mode: StyleMode,
    fallback_var: Option<String>,
}

impl StyleResolver {
    /// `fallback_var` names a CSS variable (e.g. `--cal-bg`) referenced
    /// when no rule claims a date; blank names count as unset.
    pub(crate) fn new(
        rules: RuleSet,
        mode: StyleMode,
        fallback_var: Option<String>,
    ) -> StyleResolver {
        let fallback_var = fallback_var.filter(|name| !name.trim().is_empty());
        StyleResolver {
            rules,
            mode,
            fallback_var,
        }
    }

    fn source_for(&self, date: Date) -> Option<StyleSource<'_>> {
        PRECEDENCE.iter().find_map(|source| source(&self.rules, date))
    }

    /// The style for `date` in the resolver's own mode.
    pub(crate) fn style_for(&self, date: Date) -> ResolvedStyle {
        match self.mode {
            StyleMode::Filled => self.filled_style(date),
            StyleMode::Pilled => self.pilled_style(date),
        }
    }

    /// The whole-cell background for `date`: the winning rule's diagonal
    /// gradient on a Filled calendar, the fallback otherwise.
    pub(crate) fn filled_style(&self, date: Date) -> ResolvedStyle {
        if self.mode == StyleMode::Filled {
            self.resolve(date, GradientDirection::Diagonal)
        } else {
            self.fallback()
        }
    }

    /// The pill background for `date`: the winning rule's horizontal
    /// gradient on a Pilled calendar, the fallback otherwise.
    pub(crate) fn pilled_style(&self, date: Date) -> ResolvedStyle {
        if self.mode == StyleMode::Pilled {
            self.resolve(date, GradientDirection::Horizontal)
        } else {
            self.fallback()
        }
    }

    fn resolve(&self, date: Date, direction: GradientDirection) -> ResolvedStyle {
        match self.source_for(date) {
            Some(source) => ResolvedStyle {
                background: background_image(source.colors(date), direction),
                text_color: Some(source.text_color().to_string()),
            },
            None => self.fallback(),
        }
    }

    fn fallback(&self) -> ResolvedStyle {
        match &self.fallback_var {
            Some(name) => ResolvedStyle {
                background: format!("var({name})"),
                text_color: None,
            },
            None => ResolvedStyle::default(),
        }
    }
}

impl DateStyler for StyleResolver {
    /// Terminal cells approximate the gradient with its leading color.
    fn date_style(&self, date: Date) -> Style {
        match self.source_for(date) {
            Some(source) => {
                let mut style = Style::new().fg(source.text_color().into());
                if let Some(&first) = source.colors(date).first() {
                    style = style.bg(first.into());
                }
                style
            }
            None => Style::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WeekdayColors;
    use ratatui::style::Color;
    use time::macros::date;
    use time::Weekday;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const GOLD: Rgb = Rgb::new(255, 215, 0);
    const BLACK: Rgb = Rgb::new(0, 0, 0);

    fn monday_template(accept_from: Date, color: Rgb) -> WeekTemplate {
        let mut weekdays = WeekdayColors::default();
        weekdays.set(Weekday::Monday, vec![color]);
        WeekTemplate {
            accept_from,
            weekdays,
            text_color: BLACK,
        }
    }

    fn red_event() -> RangeEvent {
        RangeEvent {
            start: date!(2025 - 01 - 01),
            end: date!(2025 - 01 - 10),
            background: vec![RED],
            text_color: BLACK,
        }
    }

    #[test]
    fn test_event_beats_template_and_special_date() {
        let rules = RuleSet::new(
            vec![red_event()],
            vec![monday_template(date!(2024 - 01 - 01), BLUE)],
            vec![SpecialDate {
                date: date!(2025 - 01 - 05),
                colors: vec![GOLD],
                text_color: BLACK,
            }],
        );
        let resolver = StyleResolver::new(rules, StyleMode::Filled, None);
        let style = resolver.filled_style(date!(2025 - 01 - 05));
        assert_eq!(style.background, "repeating-linear-gradient(45deg, #FF0000)");
        assert_eq!(style.text_color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_special_date_beats_template() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![
                monday_template(date!(2025 - 01 - 01), BLUE),
                monday_template(date!(2025 - 01 - 15), GREEN),
            ],
            vec![SpecialDate {
                date: date!(2025 - 01 - 20),
                colors: vec![GOLD],
                text_color: BLACK,
            }],
        );
        let resolver = StyleResolver::new(rules, StyleMode::Filled, None);
        // 2025-01-20 is a Monday the Green template would otherwise win.
        let style = resolver.filled_style(date!(2025 - 01 - 20));
        assert_eq!(style.background, "repeating-linear-gradient(45deg, #FFD700)");
    }

    #[test]
    fn test_closest_past_template_is_selected() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![
                monday_template(date!(2025 - 01 - 01), BLUE),
                monday_template(date!(2025 - 01 - 15), GREEN),
            ],
            Vec::new(),
        );
        let resolver = StyleResolver::new(rules, StyleMode::Filled, None);
        let later = resolver.filled_style(date!(2025 - 01 - 20));
        assert_eq!(later.background, "repeating-linear-gradient(45deg, #00FF00)");
        let earlier = resolver.filled_style(date!(2025 - 01 - 06));
        assert_eq!(earlier.background, "repeating-linear-gradient(45deg, #0000FF)");
    }

    #[test]
    fn test_date_before_all_templates_falls_back() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![monday_template(date!(2025 - 01 - 01), BLUE)],
            Vec::new(),
        );
        let resolver =
            StyleResolver::new(rules, StyleMode::Filled, Some("--cal-bg".to_owned()));
        // 2024-12-02 is a Monday, but no template is effective yet.
        let style = resolver.filled_style(date!(2024 - 12 - 02));
        assert_eq!(style.background, "var(--cal-bg)");
        assert_eq!(style.text_color, None);
    }

    #[test]
    fn test_template_weekday_miss_styles_text_only() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![monday_template(date!(2025 - 01 - 01), BLUE)],
            Vec::new(),
        );
        let resolver = StyleResolver::new(rules, StyleMode::Filled, None);
        // 2025-01-07 is a Tuesday, which the template does not configure.
        let style = resolver.filled_style(date!(2025 - 01 - 07));
        assert_eq!(style.background, "");
        assert_eq!(style.text_color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_pilled_resolver_answers_pill_queries_only() {
        let rules = RuleSet::new(vec![red_event()], Vec::new(), Vec::new());
        let resolver =
            StyleResolver::new(rules, StyleMode::Pilled, Some("--cal-bg".to_owned()));
        let pill = resolver.pilled_style(date!(2025 - 01 - 05));
        assert_eq!(
            pill.background,
            "repeating-linear-gradient(to right, #FF0000)"
        );
        let filled = resolver.filled_style(date!(2025 - 01 - 05));
        assert_eq!(filled.background, "var(--cal-bg)");
        assert_eq!(filled.text_color, None);
    }

    #[test]
    fn test_filled_resolver_ignores_pill_queries() {
        let rules = RuleSet::new(vec![red_event()], Vec::new(), Vec::new());
        let resolver = StyleResolver::new(rules, StyleMode::Filled, None);
        assert_eq!(resolver.pilled_style(date!(2025 - 01 - 05)), ResolvedStyle::default());
    }

    #[test]
    fn test_style_for_follows_the_configured_mode() {
        let rules = RuleSet::new(vec![red_event()], Vec::new(), Vec::new());
        let resolver = StyleResolver::new(rules, StyleMode::Pilled, None);
        assert_eq!(
            resolver.style_for(date!(2025 - 01 - 05)),
            resolver.pilled_style(date!(2025 - 01 - 05))
        );
    }

    #[test]
    fn test_blank_fallback_variable_counts_as_unset() {
        let resolver =
            StyleResolver::new(RuleSet::default(), StyleMode::Filled, Some("  ".to_owned()));
        assert_eq!(resolver.filled_style(date!(2025 - 01 - 05)), ResolvedStyle::default());
    }

    #[test]
    fn test_terminal_style_uses_leading_color() {
        let rules = RuleSet::new(
            vec![RangeEvent {
                start: date!(2025 - 01 - 01),
                end: date!(2025 - 01 - 10),
                background: vec![RED, GREEN],
                text_color: BLACK,
            }],
            Vec::new(),
            Vec::new(),
        );
        let resolver = StyleResolver::new(rules, StyleMode::Filled, None);
        let style = resolver.date_style(date!(2025 - 01 - 05));
        assert_eq!(style.bg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(style.fg, Some(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn test_terminal_style_of_unruled_date_is_plain() {
        let resolver = StyleResolver::new(RuleSet::default(), StyleMode::Filled, None);
        assert_eq!(resolver.date_style(date!(2025 - 01 - 05)), Style::new());
    }
}
