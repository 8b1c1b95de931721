use crate::calendar::{ymd, MonthWindow};
use crate::locale::LocaleNames;
use crate::style::{ResolvedStyle, StyleResolver};
use std::fmt::Write;

/// Builds one line per visible date with the CSS declarations the resolver
/// produced for its configured mode: `date<TAB>background<TAB>color`, with
/// a declaration left empty when nothing applies to the date.
pub(crate) fn css_report<L: LocaleNames>(
    window: &MonthWindow<L>,
    resolver: &StyleResolver,
) -> String {
    let mut out = String::new();
    for grid in window.grids() {
        for date in grid.cells.iter().flatten() {
            let ResolvedStyle {
                background,
                text_color,
            } = resolver.style_for(*date);
            let background = if background.is_empty() {
                String::new()
            } else {
                format!("background: {background};")
            };
            let color = match text_color {
                Some(color) => format!("color: {color};"),
                None => String::new(),
            };
            let date = ymd(*date);
            writeln!(out, "{date}\t{background}\t{color}")
                .expect("writing to a String should not fail");
        }
    }
    out
}
