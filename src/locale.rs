use time::Month;

/// Which weekday heads the displayed label row.  Label order only: grid
/// padding is always computed Monday-first (see `calendar::grid`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// Locale-aware name formatting, injected so the grid generator stays
/// locale-agnostic.
pub(crate) trait LocaleNames {
    fn month_name(&self, month: Month) -> String;

    /// Abbreviated weekday names in display order, beginning with `start`.
    fn weekday_names(&self, start: WeekStart) -> [String; 7];
}

static WEEKDAY_ABBREVS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// English names, the default when the host injects nothing else.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct EnglishLocale;

impl LocaleNames for EnglishLocale {
    fn month_name(&self, month: Month) -> String {
        month.to_string()
    }

    fn weekday_names(&self, start: WeekStart) -> [String; 7] {
        let offset = match start {
            WeekStart::Monday => 0,
            WeekStart::Sunday => 6,
        };
        std::array::from_fn(|i| WEEKDAY_ABBREVS[(i + offset) % 7].to_owned())
    }
}
