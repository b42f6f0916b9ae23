//! StatsWales-style JSON: `{"value": [ {record}, ... ]}` with one observation per record.

use super::IngestReport;
use crate::collection::AreaCollection;
use crate::columns::{ColumnMapping, SourceColumn};
use crate::error::{Error, Result};
use crate::filters::{Filters, area_included, measure_included, year_included};
use crate::models::{Area, Measure};
use serde_json::{Map, Value};

/// Key of the record list in the top-level object.
const RECORDS_KEY: &str = "value";

/// Where a measure attribute comes from: a field of each record, or a fixed string.
enum Source<'a> {
    Field(&'a str),
    Fixed(&'a str),
}

impl<'a> Source<'a> {
    fn resolve(
        columns: &'a ColumnMapping,
        field: SourceColumn,
        fixed: SourceColumn,
    ) -> Result<Self> {
        match columns.get(field) {
            Some(name) => Ok(Source::Field(name)),
            None => columns.require(fixed).map(Source::Fixed),
        }
    }

    fn get(&self, obj: &Map<String, Value>, row: usize) -> Result<String> {
        match self {
            Source::Field(name) => string_field(obj, name, row),
            Source::Fixed(s) => Ok((*s).to_owned()),
        }
    }
}

pub(super) fn parse(
    text: &str,
    columns: &ColumnMapping,
    filters: &Filters,
    out: &mut AreaCollection,
    report: &mut IngestReport,
) -> Result<()> {
    let code_col = columns.require(SourceColumn::AuthCode)?;
    let eng_col = columns.require(SourceColumn::AuthNameEng)?;
    let year_col = columns.require(SourceColumn::Year)?;
    let value_col = columns.require(SourceColumn::Value)?;
    let codename_src = Source::resolve(
        columns,
        SourceColumn::MeasureCode,
        SourceColumn::SingleMeasureCode,
    )?;
    let label_src = Source::resolve(
        columns,
        SourceColumn::MeasureName,
        SourceColumn::SingleMeasureName,
    )?;

    let root: Value = serde_json::from_str(text)?;
    let records = root
        .get(RECORDS_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            Error::schema(format!(
                "json must be an object with a '{RECORDS_KEY}' list of records"
            ))
        })?;

    for (idx0, record) in records.iter().enumerate() {
        let row = idx0 + 1;
        let obj = record
            .as_object()
            .ok_or_else(|| Error::schema(format!("record {row} is not a json object")))?;

        let code = string_field(obj, code_col, row)?;
        let eng = string_field(obj, eng_col, row)?;
        let codename = codename_src.get(obj, row)?.to_ascii_lowercase();
        let label = label_src.get(obj, row)?;
        let year = year_field(obj, year_col, row)?;
        let value = value_field(obj, value_col, row)?;
        report.rows += 1;

        let mut area = Area::new(code.as_str());
        if let Err(e) = area.set_name("eng", eng.as_str()) {
            report.warn(row, e);
        }

        // Each filter only suppresses its own step: an out-of-range year still yields
        // an (empty) measure, and an excluded measure still yields the named area.
        let mut measure = Measure::new(codename.as_str(), label);
        if year_included(&filters.years, year) {
            measure.set_value(year, value);
        }
        if measure_included(&filters.measures, &codename) {
            area.set_measure(&codename, measure);
        }
        if area_included(&filters.areas, &[code.as_str(), eng.as_str()]) {
            out.upsert(code, area);
        } else {
            report.filtered += 1;
        }
    }
    Ok(())
}

fn field<'v>(obj: &'v Map<String, Value>, name: &str, row: usize) -> Result<&'v Value> {
    obj.get(name)
        .ok_or_else(|| Error::schema(format!("record {row} missing required field '{name}'")))
}

fn string_field(obj: &Map<String, Value>, name: &str, row: usize) -> Result<String> {
    match field(obj, name, row)? {
        Value::String(s) => Ok(s.trim().to_owned()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::malformed(row, name, other.to_string(), "expected string")),
    }
}

fn year_field(obj: &Map<String, Value>, name: &str, row: usize) -> Result<i32> {
    let v = field(obj, name, row)?;
    let parsed = match v {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::malformed(row, name, v.to_string(), "expected integer year"))
}

fn value_field(obj: &Map<String, Value>, name: &str, row: usize) -> Result<f64> {
    let v = field(obj, name, row)?;
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::malformed(row, name, v.to_string(), "expected number"))
}
