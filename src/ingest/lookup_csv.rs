//! `code,eng,cym` lookup table of authority codes and their names.

use super::{IngestReport, csv_reader};
use crate::collection::AreaCollection;
use crate::columns::{ColumnMapping, SourceColumn};
use crate::error::{Error, Result};
use crate::filters::{Filters, area_included};
use crate::models::Area;

pub(super) fn parse(
    text: &str,
    columns: &ColumnMapping,
    filters: &Filters,
    out: &mut AreaCollection,
    report: &mut IngestReport,
) -> Result<()> {
    let expected = [
        columns.require(SourceColumn::AuthCode)?,
        columns.require(SourceColumn::AuthNameEng)?,
        columns.require(SourceColumn::AuthNameCym)?,
    ];

    let mut rdr = csv_reader(text);
    let headers = rdr.headers()?.clone();
    if headers.len() != expected.len() || headers.iter().zip(expected).any(|(h, e)| h != e) {
        return Err(Error::schema(format!(
            "expected header {:?}, found {:?}",
            expected,
            headers.iter().collect::<Vec<_>>()
        )));
    }

    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, +1 for the header line.
        let row = row_idx0 + 2;
        let record = result?;
        report.rows += 1;

        if record.len() != expected.len() {
            return Err(Error::schema(format!(
                "row {row} has {} fields, expected {}",
                record.len(),
                expected.len()
            )));
        }
        let (code, eng, cym) = (&record[0], &record[1], &record[2]);
        if code.is_empty() {
            report.warn(
                row,
                Error::malformed(row, expected[0], code, "empty authority code; row skipped"),
            );
            continue;
        }
        if !area_included(&filters.areas, &[code, eng, cym]) {
            report.filtered += 1;
            continue;
        }

        let mut area = Area::new(code);
        for (lang, name) in [("eng", eng), ("cym", cym)] {
            if let Err(e) = area.set_name(lang, name) {
                report.warn(row, e);
            }
        }
        out.upsert(code, area);
    }
    Ok(())
}
