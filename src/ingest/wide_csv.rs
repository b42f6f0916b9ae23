//! Single-measure CSV: authority code, then one column per year.

use super::{IngestReport, csv_reader};
use crate::collection::AreaCollection;
use crate::columns::{ColumnMapping, SourceColumn};
use crate::error::{Error, Result};
use crate::filters::{Filters, area_included, measure_included, year_included};
use crate::models::{Area, Measure};
use log::debug;

pub(super) fn parse(
    text: &str,
    columns: &ColumnMapping,
    filters: &Filters,
    out: &mut AreaCollection,
    report: &mut IngestReport,
) -> Result<()> {
    let code_col = columns.require(SourceColumn::AuthCode)?;
    let codename = columns.require(SourceColumn::SingleMeasureCode)?;
    let label = columns.require(SourceColumn::SingleMeasureName)?;

    let mut rdr = csv_reader(text);
    let headers = rdr.headers()?.clone();
    if headers.get(0) != Some(code_col) {
        return Err(Error::schema(format!(
            "no column found with title '{code_col}' (first header is {:?})",
            headers.get(0).unwrap_or_default()
        )));
    }
    let width = columns.expected_columns.unwrap_or(headers.len());
    if headers.len() != width {
        return Err(Error::schema(format!(
            "header has {} columns, expected {width}",
            headers.len()
        )));
    }
    let years = headers
        .iter()
        .skip(1)
        .map(|h| {
            h.parse::<i32>()
                .map_err(|_| Error::schema(format!("year column header '{h}' is not a year")))
        })
        .collect::<Result<Vec<i32>>>()?;
    debug!("[{}] {} year columns for measure '{codename}'", report.source, years.len());

    let keep_measure = measure_included(&filters.measures, codename);

    for (row_idx0, result) in rdr.records().enumerate() {
        let row = row_idx0 + 2;
        let record = result?;
        report.rows += 1;

        if record.len() != width {
            return Err(Error::schema(format!(
                "row {row} has {} fields, expected {width}",
                record.len()
            )));
        }
        let code = &record[0];
        if code.is_empty() {
            report.warn(
                row,
                Error::malformed(row, code_col, code, "empty authority code; row skipped"),
            );
            continue;
        }
        if !area_included(&filters.areas, &[code]) {
            report.filtered += 1;
            continue;
        }

        let mut area = Area::new(code);
        if !keep_measure {
            out.upsert(code, area);
            continue;
        }

        let mut measure = Measure::new(codename, label);
        for (&year, raw) in years.iter().zip(record.iter().skip(1)) {
            let field = year.to_string();
            if raw.is_empty() {
                report.warn(row, Error::malformed(row, &field, raw, "empty cell; year skipped"));
                continue;
            }
            let value = raw
                .parse::<f64>()
                .map_err(|e| Error::malformed(row, &field, raw, e.to_string()))?;
            if year_included(&filters.years, year) {
                measure.set_value(year, value);
            }
        }

        area.set_measure(codename, measure);
        out.upsert(code, area);
    }
    Ok(())
}
