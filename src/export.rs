//! Structured export of an [`AreaCollection`].
//!
//! Shape: `{ "<code>": { "names": {lang: name}, "measures"?: {codename: {label, values: {year: value}}} } }`.
//! `measures` is omitted for areas without measures and an empty collection is `{}`.
//!
//! [`save_csv`] writes the same data in tidy long form (one row per observation).

use crate::collection::AreaCollection;
use crate::models::{Area, Measure};
use anyhow::Result;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export tree keyed by authority code.
pub type ExportDocument = BTreeMap<String, AreaExport>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaExport {
    pub names: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub measures: BTreeMap<String, MeasureExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureExport {
    pub label: String,
    pub values: BTreeMap<i32, f64>,
}

impl From<&Measure> for MeasureExport {
    fn from(m: &Measure) -> Self {
        Self {
            label: m.label().to_owned(),
            values: m.series().clone(),
        }
    }
}

impl From<&Area> for AreaExport {
    fn from(a: &Area) -> Self {
        Self {
            names: a.names().clone(),
            measures: a
                .measures()
                .iter()
                .map(|(code, m)| (code.clone(), MeasureExport::from(m)))
                .collect(),
        }
    }
}

pub fn export(areas: &AreaCollection) -> ExportDocument {
    areas
        .iter()
        .map(|(code, area)| (code.to_owned(), AreaExport::from(area)))
        .collect()
}

/// Save the export document as pretty JSON.
pub fn save_json<P: AsRef<Path>>(areas: &AreaCollection, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&export(areas))?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Prefix cells that spreadsheet applications would evaluate as formulas.
fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_owned()
    }
}

/// Save observations as CSV with header, one row per (area, measure, year).
pub fn save_csv<P: AsRef<Path>>(areas: &AreaCollection, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record([
        "authority_code",
        "name_eng",
        "name_cym",
        "measure",
        "label",
        "year",
        "value",
    ])?;
    for (code, area) in areas.iter() {
        let eng = area.name("eng").map(sanitize_cell).unwrap_or_default();
        let cym = area.name("cym").map(sanitize_cell).unwrap_or_default();
        for (codename, measure) in area.measures() {
            for (year, value) in measure.series() {
                wtr.serialize((
                    sanitize_cell(code),
                    &eng,
                    &cym,
                    sanitize_cell(codename),
                    sanitize_cell(measure.label()),
                    year,
                    value,
                ))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
