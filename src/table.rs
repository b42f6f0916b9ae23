//! Human-readable fixed-width report.
//!
//! ```text
//! Isle of Anglesey / Ynys Môn (W06000001)
//! Population (pop)
//!      1991      1992   Average    Diff.  % Diff.
//! 68.000000 69.000000 68.500000 1.000000 1.449275
//! ```
//!
//! Year headers are right-aligned over their values; every column is as wide as the
//! wider of its header and the rendered value.

use crate::collection::AreaCollection;
use crate::models::{Area, Measure};

pub const NO_NAME: &str = "Unnamed";
pub const NO_MEASURES: &str = "<no measures>";
pub const NO_DATA: &str = "<no data>";

/// Which name languages head each area block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub primary_lang: String,
    pub secondary_lang: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            primary_lang: "eng".into(),
            secondary_lang: "cym".into(),
        }
    }
}

/// Six fixed decimals, the report's number format.
pub fn format_value(v: f64) -> String {
    format!("{v:.6}")
}

pub fn render(areas: &AreaCollection, options: &TableOptions) -> String {
    let mut out = String::new();
    for (_, area) in areas.iter() {
        render_area(&mut out, area, options);
        out.push('\n');
    }
    out
}

/// `primary / secondary (CODE)`, falling back to whichever names exist.
pub fn area_heading(area: &Area, options: &TableOptions) -> String {
    let primary = area.name(&options.primary_lang).ok();
    let secondary = area.name(&options.secondary_lang).ok();
    let names = match (primary, secondary) {
        (Some(p), Some(s)) => format!("{p} / {s}"),
        (Some(n), None) | (None, Some(n)) => n.to_owned(),
        // Neither designated language: use the first name in language order, if any.
        (None, None) => area
            .names()
            .values()
            .next()
            .cloned()
            .unwrap_or_else(|| NO_NAME.to_owned()),
    };
    format!("{names} ({})", area.authority_code())
}

pub fn render_area(out: &mut String, area: &Area, options: &TableOptions) {
    push_line(out, &area_heading(area, options));
    if area.is_empty() {
        push_line(out, NO_MEASURES);
        return;
    }
    for (i, measure) in area.measures().values().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_measure(out, measure);
    }
}

pub fn render_measure(out: &mut String, measure: &Measure) {
    push_line(out, &format!("{} ({})", measure.label(), measure.codename()));
    if measure.is_empty() {
        push_line(out, NO_DATA);
        return;
    }

    let mut columns: Vec<(String, String)> = measure
        .series()
        .iter()
        .map(|(year, value)| (year.to_string(), format_value(*value)))
        .collect();
    columns.push(("Average".into(), format_value(measure.average())));
    columns.push(("Diff.".into(), format_value(measure.difference())));
    columns.push(("% Diff.".into(), format_value(measure.difference_as_percentage())));

    let widths: Vec<usize> = columns
        .iter()
        .map(|(h, v)| h.chars().count().max(v.chars().count()))
        .collect();
    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:>w$}", w = *w))
            .collect::<Vec<_>>()
            .join(" ")
    };
    push_line(out, &line(columns.iter().map(|(h, _)| h.as_str()).collect()));
    push_line(out, &line(columns.iter().map(|(_, v)| v.as_str()).collect()));
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
